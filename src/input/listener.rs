use glam::Vec2;
use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use super::event::{InputEvent, MouseButton};
use crate::camera::OrbitEngine;
use crate::util::DeferredTask;

/// Cursor affordance the host UI should display over the render surface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Affordance {
    /// Idle: the surface can be grabbed.
    #[default]
    Grab,
    /// A button is held: the surface is being dragged.
    Grabbing,
}

impl Affordance {
    /// CSS `cursor` value for this affordance.
    #[must_use]
    pub fn css_cursor(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// What a held pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMode {
    /// No button held.
    #[default]
    Idle,
    /// Primary drag: orbit around the target.
    Rotating,
    /// Secondary / middle / shift drag: move the target.
    Panning,
}

/// Side effects requested by one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reaction {
    /// New cursor affordance to report, if it changed.
    pub affordance: Option<Affordance>,
    /// Emit the pose now.
    pub emit_pose: bool,
    /// Input was forwarded to the engine; the host camera may need syncing.
    pub camera_moved: bool,
}

/// Transient interaction state. Owned only by the [`InputListener`].
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Current pointer mode.
    pub mode: PointerMode,
    /// Last cursor position, for computing motion deltas.
    pub last_cursor: Option<Vec2>,
    /// Whether shift is held.
    pub shift: bool,
    /// Pending wheel-settle notification.
    pub wheel_debounce: DeferredTask,
}

/// Maps pointer and wheel events onto engine accumulation, cursor
/// affordance and change notifications.
///
/// Handlers only run while the listener is bound. Pointer-up requests an
/// immediate emission if the engine is enabled; wheel input arms a
/// debounce that fires one emission once the wheel has been quiet for
/// `debounce` (regardless of the enabled flag).
#[derive(Debug, Clone)]
pub struct InputListener {
    state: InteractionState,
    debounce: Duration,
    bound: bool,
}

impl InputListener {
    /// Create an unbound listener with the given wheel debounce delay.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: InteractionState::default(),
            debounce,
            bound: false,
        }
    }

    /// Start accepting events.
    pub fn bind(&mut self) {
        self.bound = true;
    }

    /// Stop accepting events and drop any pending wheel notification.
    pub fn unbind(&mut self) {
        self.bound = false;
        let _was_pending = self.state.wheel_debounce.cancel();
        self.state = InteractionState::default();
    }

    /// Whether handlers are active.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Change the wheel debounce delay. Applies to the next wheel event.
    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Read-only view of the interaction state.
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Route one event. Returns what the caller should do next.
    pub fn handle_event<E: OrbitEngine>(
        &mut self,
        event: InputEvent,
        engine: &mut E,
        now: Instant,
    ) -> Reaction {
        if !self.bound {
            return Reaction::default();
        }
        match event {
            InputEvent::MouseButton {
                button,
                pressed: true,
            } => self.pointer_down(button),
            InputEvent::MouseButton { pressed: false, .. } => {
                self.pointer_up(engine)
            }
            InputEvent::ButtonsReleased => {
                if self.state.mode == PointerMode::Idle {
                    Reaction::default()
                } else {
                    self.pointer_up(engine)
                }
            }
            InputEvent::CursorMoved { x, y } => {
                self.cursor_moved(Vec2::new(x, y), engine)
            }
            InputEvent::Scroll { delta } => self.wheel(delta, engine, now),
            InputEvent::ModifiersChanged { shift } => {
                self.state.shift = shift;
                Reaction::default()
            }
        }
    }

    /// Returns true once when a wheel burst has settled.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.bound && self.state.wheel_debounce.fire_if_due(now)
    }

    fn pointer_down(&mut self, button: MouseButton) -> Reaction {
        // The first move of a drag only anchors the cursor.
        self.state.last_cursor = None;
        self.state.mode = match button {
            MouseButton::Left if !self.state.shift => PointerMode::Rotating,
            _ => PointerMode::Panning,
        };
        Reaction {
            affordance: Some(Affordance::Grabbing),
            ..Reaction::default()
        }
    }

    fn pointer_up<E: OrbitEngine>(&mut self, engine: &E) -> Reaction {
        self.state.mode = PointerMode::Idle;
        Reaction {
            affordance: Some(Affordance::Grab),
            emit_pose: engine.is_enabled(),
            camera_moved: false,
        }
    }

    fn cursor_moved<E: OrbitEngine>(
        &mut self,
        position: Vec2,
        engine: &mut E,
    ) -> Reaction {
        let Some(last) = self.state.last_cursor.replace(position) else {
            return Reaction::default();
        };
        let delta = position - last;

        let camera_moved = match self.state.mode {
            PointerMode::Idle => false,
            PointerMode::Rotating => {
                engine.rotate(delta);
                true
            }
            PointerMode::Panning => {
                engine.pan(delta);
                true
            }
        };
        Reaction {
            camera_moved,
            ..Reaction::default()
        }
    }

    fn wheel<E: OrbitEngine>(
        &mut self,
        delta: f32,
        engine: &mut E,
        now: Instant,
    ) -> Reaction {
        engine.zoom(delta);
        self.state.wheel_debounce.schedule(now, self.debounce);
        Reaction {
            camera_moved: true,
            ..Reaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingEngine;

    const FRAME: Duration = Duration::from_millis(16);

    /// Bound listener plus a recording engine at a fixed time.
    struct Rig {
        listener: InputListener,
        engine: RecordingEngine,
        now: Instant,
    }

    impl Rig {
        fn new() -> Self {
            let mut listener = InputListener::new(FRAME);
            listener.bind();
            Self {
                listener,
                engine: RecordingEngine::default(),
                now: Instant::now(),
            }
        }

        fn send(&mut self, event: InputEvent) -> Reaction {
            self.listener.handle_event(event, &mut self.engine, self.now)
        }

        fn send_at(&mut self, event: InputEvent, at: Instant) -> Reaction {
            self.listener.handle_event(event, &mut self.engine, at)
        }
    }

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::MouseButton {
            button,
            pressed: true,
        }
    }

    fn release(button: MouseButton) -> InputEvent {
        InputEvent::MouseButton {
            button,
            pressed: false,
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn wheel(delta: f32) -> InputEvent {
        InputEvent::Scroll { delta }
    }

    #[test]
    fn pointer_down_grips_without_touching_engine() {
        let mut rig = Rig::new();
        let reaction = rig.send(press(MouseButton::Left));
        assert_eq!(reaction.affordance, Some(Affordance::Grabbing));
        assert!(!reaction.emit_pose);
        assert_eq!(rig.engine.calls(), 0);
    }

    #[test]
    fn pointer_up_emits_only_when_enabled() {
        let mut rig = Rig::new();

        let reaction = rig.send(release(MouseButton::Left));
        assert_eq!(reaction.affordance, Some(Affordance::Grab));
        assert!(reaction.emit_pose);

        rig.engine.constraints.enabled = false;
        let reaction = rig.send(release(MouseButton::Left));
        assert_eq!(reaction.affordance, Some(Affordance::Grab));
        assert!(!reaction.emit_pose);
    }

    #[test]
    fn drag_routes_to_rotate_or_pan() {
        let mut rig = Rig::new();

        let _ = rig.send(press(MouseButton::Left));
        let _ = rig.send(moved(10.0, 10.0));
        let reaction = rig.send(moved(15.0, 12.0));
        assert!(reaction.camera_moved);
        assert_eq!(rig.engine.rotations, vec![Vec2::new(5.0, 2.0)]);

        let _ = rig.send(release(MouseButton::Left));
        let _ = rig.send(press(MouseButton::Right));
        let _ = rig.send(moved(20.0, 12.0));
        let _ = rig.send(moved(25.0, 12.0));
        assert_eq!(rig.engine.pans, vec![Vec2::new(5.0, 0.0)]);
    }

    #[test]
    fn first_move_of_a_drag_does_not_jump() {
        let mut rig = Rig::new();

        let _ = rig.send(moved(0.0, 0.0));
        let _ = rig.send(press(MouseButton::Left));
        let reaction = rig.send(moved(300.0, 200.0));
        assert!(!reaction.camera_moved);
        assert!(rig.engine.rotations.is_empty());
    }

    #[test]
    fn release_off_surface_ends_the_drag() {
        let mut rig = Rig::new();

        let _ = rig.send(press(MouseButton::Left));
        let _ = rig.send(moved(10.0, 10.0));
        // Button came up outside the canvas; the next hover reports it.
        let reaction = rig.send(InputEvent::ButtonsReleased);
        assert_eq!(reaction.affordance, Some(Affordance::Grab));
        assert!(reaction.emit_pose);
        assert_eq!(rig.listener.state().mode, PointerMode::Idle);

        let _ = rig.send(moved(90.0, 40.0));
        let _ = rig.send(moved(95.0, 45.0));
        assert!(rig.engine.rotations.is_empty());
    }

    #[test]
    fn buttons_released_while_idle_is_silent() {
        let mut rig = Rig::new();
        let reaction = rig.send(InputEvent::ButtonsReleased);
        assert_eq!(reaction, Reaction::default());
    }

    #[test]
    fn shift_drag_pans() {
        let mut rig = Rig::new();
        let _ = rig.send(InputEvent::ModifiersChanged { shift: true });
        let _ = rig.send(press(MouseButton::Left));
        assert_eq!(rig.listener.state().mode, PointerMode::Panning);
    }

    #[test]
    fn hover_without_button_does_nothing() {
        let mut rig = Rig::new();
        let _ = rig.send(moved(1.0, 1.0));
        let reaction = rig.send(moved(9.0, 9.0));
        assert!(!reaction.camera_moved);
        assert_eq!(rig.engine.calls(), 0);
    }

    #[test]
    fn wheel_burst_settles_once_after_last_event() {
        let mut rig = Rig::new();
        let t0 = rig.now;
        for i in 0..5 {
            let at = t0 + Duration::from_millis(i * 10);
            let _ = rig.send_at(wheel(1.0), at);
            assert!(!rig.listener.poll(at));
        }
        assert_eq!(rig.engine.zooms.len(), 5);

        let last = t0 + Duration::from_millis(40);
        assert!(!rig.listener.poll(last + Duration::from_millis(15)));
        assert!(rig.listener.poll(last + FRAME));
        assert!(!rig.listener.poll(last + FRAME * 4));
    }

    #[test]
    fn wheel_settles_even_when_disabled() {
        let mut rig = Rig::new();
        rig.engine.constraints.enabled = false;
        let _ = rig.send(wheel(-1.0));
        assert!(rig.listener.poll(rig.now + FRAME));
    }

    #[test]
    fn unbound_listener_ignores_everything() {
        let mut rig = Rig::new();
        let _ = rig.send(wheel(1.0));
        rig.listener.unbind();

        assert!(!rig.listener.poll(rig.now + FRAME));
        let reaction = rig.send(release(MouseButton::Left));
        assert_eq!(reaction, Reaction::default());
        assert_eq!(rig.engine.zooms.len(), 1);
    }

    #[test]
    fn affordance_css_values() {
        assert_eq!(Affordance::Grab.css_cursor(), "grab");
        assert_eq!(Affordance::Grabbing.css_cursor(), "grabbing");
    }
}
