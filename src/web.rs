//! Browser binding: drives an [`OrbitControl`] from DOM events on a canvas.
//!
//! [`WebOrbit::attach`] initializes the control and registers passive,
//! non-capturing `mousedown` / `mouseup` / `mousemove` / `wheel` listeners.
//! The closures are built once and kept in [`CanvasListeners`], so
//! detaching removes exactly the callbacks that were added. The host
//! application calls [`WebOrbit::tick`] from its render loop.
//!
//! `camera-orbit-updated` is dispatched only after the control has been
//! released, so app listeners may call back into [`WebOrbit`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, CustomEvent, CustomEventInit, HtmlCanvasElement,
    MouseEvent, WheelEvent,
};
use web_time::Instant;

use crate::camera::{CameraPose, SphericalOrbit};
use crate::control::{
    with_control, Lifecycle, OrbitControl, OrbitHost, OrbitUpdated,
    QueuedHost, SharedControl,
};
use crate::error::OrbitError;
use crate::input::{Affordance, InputEvent, MouseButton};
use crate::options::{DeviceClass, OrbitConfig, OrbitOptions};

/// Orbit control shared between the listener closures and the app.
pub type WebControl = SharedControl<SphericalOrbit, CanvasHost>;

fn js_error(err: &JsValue) -> OrbitError {
    OrbitError::Web(format!("{err:?}"))
}

/// Install the panic hook and route `log` output to the browser console.
pub fn init_logging(level: log::Level) -> Result<(), OrbitError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level)
        .map_err(|e| OrbitError::Web(e.to_string()))
}

/// Classify the current browser from its user agent.
#[must_use]
pub fn detect_device_class() -> DeviceClass {
    let user_agent = web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default();
    DeviceClass::from_user_agent(&user_agent)
}

/// Raise one event on the canvas as a non-bubbling `CustomEvent`.
fn dispatch(
    canvas: &HtmlCanvasElement,
    event: &OrbitUpdated,
) -> Result<(), OrbitError> {
    let json = event
        .to_json()
        .map_err(|e| OrbitError::Web(e.to_string()))?;
    let detail = js_sys::JSON::parse(&json).map_err(|e| js_error(&e))?;

    let init = CustomEventInit::new();
    init.set_bubbles(OrbitUpdated::BUBBLES);
    init.set_detail(&detail);
    let dom_event =
        CustomEvent::new_with_event_init_dict(OrbitUpdated::NAME, &init)
            .map_err(|e| js_error(&e))?;
    let _delivered = canvas
        .dispatch_event(&dom_event)
        .map_err(|e| js_error(&e))?;
    Ok(())
}

/// Run `f` on the control, then dispatch whatever it emitted. Returns
/// `None` if the control was busy.
fn drive<R>(
    control: &WebControl,
    canvas: &HtmlCanvasElement,
    f: impl FnOnce(&mut OrbitControl<SphericalOrbit, CanvasHost>) -> R,
) -> Option<R> {
    let (result, queued) = with_control(control, f)?;
    for event in &queued {
        if let Err(e) = dispatch(canvas, event) {
            log::warn!("failed to dispatch {}: {e}", OrbitUpdated::NAME);
        }
    }
    Some(result)
}

/// [`OrbitHost`] backed by a canvas element.
///
/// Keeps the mirrored camera pose for the app's renderer to read and sets
/// the cursor on the canvas (not the document body). Emitted events are
/// queued and dispatched once the control is released.
pub struct CanvasHost {
    canvas: HtmlCanvasElement,
    camera: Option<CameraPose>,
    queued: Vec<OrbitUpdated>,
}

impl CanvasHost {
    /// Host for `canvas` with a camera attached.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self {
            canvas,
            camera: Some(CameraPose::default()),
            queued: Vec::new(),
        }
    }

    /// Last pose mirrored into the camera.
    #[must_use]
    pub fn camera_pose(&self) -> Option<CameraPose> {
        self.camera
    }
}

impl OrbitHost for CanvasHost {
    fn has_camera(&self) -> bool {
        self.camera.is_some()
    }

    fn sync_camera(&mut self, pose: &CameraPose) {
        self.camera = Some(*pose);
    }

    fn set_affordance(&mut self, affordance: Affordance) {
        if let Err(e) = self
            .canvas
            .style()
            .set_property("cursor", affordance.css_cursor())
        {
            log::warn!("failed to set cursor: {e:?}");
        }
    }

    fn emit(&mut self, event: &OrbitUpdated) {
        self.queued.push(*event);
    }
}

impl QueuedHost for CanvasHost {
    fn take_queued(&mut self) -> Vec<OrbitUpdated> {
        std::mem::take(&mut self.queued)
    }
}

/// Route DOM-derived events into the control. Events raised while the
/// control is busy are dropped.
fn forward(
    control: &WebControl,
    canvas: &HtmlCanvasElement,
    events: &[InputEvent],
) {
    let now = Instant::now();
    let _handled = drive(control, canvas, |control| {
        for event in events {
            control.handle_event(*event, now);
        }
    });
}

#[allow(clippy::cast_precision_loss)]
fn cursor(evt: &MouseEvent) -> InputEvent {
    InputEvent::CursorMoved {
        x: evt.offset_x() as f32,
        y: evt.offset_y() as f32,
    }
}

fn modifiers(evt: &MouseEvent) -> InputEvent {
    InputEvent::ModifiersChanged {
        shift: evt.shift_key(),
    }
}

fn button(evt: &MouseEvent, pressed: bool) -> InputEvent {
    InputEvent::MouseButton {
        button: MouseButton::from_dom(evt.button()),
        pressed,
    }
}

/// The DOM listeners registered on the render surface.
pub struct CanvasListeners {
    canvas: HtmlCanvasElement,
    mouse_down: Closure<dyn FnMut(MouseEvent)>,
    mouse_up: Closure<dyn FnMut(MouseEvent)>,
    mouse_move: Closure<dyn FnMut(MouseEvent)>,
    wheel: Closure<dyn FnMut(WheelEvent)>,
}

impl CanvasListeners {
    /// Build the closures once and register them on `canvas`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn bind(
        canvas: &HtmlCanvasElement,
        control: &WebControl,
    ) -> Result<Self, OrbitError> {
        // The press position anchors the drag.
        let (c, el) = (Rc::clone(control), canvas.clone());
        let mouse_down = Closure::<dyn FnMut(MouseEvent)>::new(
            move |evt: MouseEvent| {
                let events =
                    [modifiers(&evt), button(&evt, true), cursor(&evt)];
                forward(&c, &el, &events);
            },
        );

        let (c, el) = (Rc::clone(control), canvas.clone());
        let mouse_up = Closure::<dyn FnMut(MouseEvent)>::new(
            move |evt: MouseEvent| {
                forward(&c, &el, &[modifiers(&evt), button(&evt, false)]);
            },
        );

        // A release outside the canvas is never seen; a hover with no
        // buttons held ends any drag left over from it.
        let (c, el) = (Rc::clone(control), canvas.clone());
        let mouse_move = Closure::<dyn FnMut(MouseEvent)>::new(
            move |evt: MouseEvent| {
                if evt.buttons() == 0 {
                    let events = [InputEvent::ButtonsReleased, cursor(&evt)];
                    forward(&c, &el, &events);
                } else {
                    forward(&c, &el, &[cursor(&evt)]);
                }
            },
        );

        // DOM wheel delta is positive when scrolling away (zoom out).
        let (c, el) = (Rc::clone(control), canvas.clone());
        let wheel = Closure::<dyn FnMut(WheelEvent)>::new(
            move |evt: WheelEvent| {
                let delta = -(evt.delta_y().signum() as f32);
                forward(&c, &el, &[InputEvent::Scroll { delta }]);
            },
        );

        let listeners = Self {
            canvas: canvas.clone(),
            mouse_down,
            mouse_up,
            mouse_move,
            wheel,
        };
        listeners.register()?;
        Ok(listeners)
    }

    fn entries(&self) -> [(&'static str, &js_sys::Function); 4] {
        [
            ("mousedown", self.mouse_down.as_ref().unchecked_ref()),
            ("mouseup", self.mouse_up.as_ref().unchecked_ref()),
            ("mousemove", self.mouse_move.as_ref().unchecked_ref()),
            ("wheel", self.wheel.as_ref().unchecked_ref()),
        ]
    }

    fn register(&self) -> Result<(), OrbitError> {
        let options = AddEventListenerOptions::new();
        options.set_capture(false);
        options.set_once(false);
        options.set_passive(true);
        for (name, callback) in self.entries() {
            listen(&self.canvas, name, callback, &options)?;
        }
        Ok(())
    }

    /// Remove every listener added by [`bind`](Self::bind). Consumes the
    /// set, so each listener is removed exactly once.
    pub fn unbind(self) -> Result<(), OrbitError> {
        for (name, callback) in self.entries() {
            self.canvas
                .remove_event_listener_with_callback(name, callback)
                .map_err(|e| js_error(&e))?;
        }
        Ok(())
    }
}

fn listen(
    canvas: &HtmlCanvasElement,
    name: &str,
    callback: &js_sys::Function,
    options: &AddEventListenerOptions,
) -> Result<(), OrbitError> {
    canvas
        .add_event_listener_with_callback_and_add_event_listener_options(
            name, callback, options,
        )
        .map_err(|e| js_error(&e))
}

/// An attached orbit control plus its canvas listeners.
pub struct WebOrbit {
    control: WebControl,
    canvas: HtmlCanvasElement,
    listeners: Option<CanvasListeners>,
}

impl WebOrbit {
    /// Attach with defaults for the current device class.
    pub fn attach_default(
        canvas: &HtmlCanvasElement,
    ) -> Result<Self, OrbitError> {
        Self::attach(canvas, OrbitConfig::for_device(detect_device_class()))
    }

    /// Initialize an orbit control on `canvas` and start listening.
    #[allow(clippy::cast_sign_loss)]
    pub fn attach(
        canvas: &HtmlCanvasElement,
        config: OrbitConfig,
    ) -> Result<Self, OrbitError> {
        let control: WebControl = Rc::new(RefCell::new(OrbitControl::new(
            CanvasHost::new(canvas.clone()),
            config,
        )));
        let (width, height) = (
            canvas.client_width().max(1) as u32,
            canvas.client_height().max(1) as u32,
        );
        drive(&control, canvas, |control| -> Result<(), OrbitError> {
            control.initialize(Instant::now())?;
            if let Some(engine) = control.engine_mut() {
                engine.resize(width, height);
            }
            Ok(())
        })
        .unwrap_or_else(|| Err(OrbitError::Web("control busy".to_owned())))?;

        let listeners = CanvasListeners::bind(canvas, &control)?;
        log::info!("orbit control attached to canvas");
        Ok(Self {
            control,
            canvas: canvas.clone(),
            listeners: Some(listeners),
        })
    }

    /// Per-frame hook; call from the render loop.
    pub fn tick(&self) {
        let now = Instant::now();
        let _ran = drive(&self.control, &self.canvas, |c| c.on_frame(now));
    }

    /// Apply changed options. Returns false if the control was busy.
    pub fn reconfigure(&self, options: OrbitOptions) -> bool {
        let applied =
            drive(&self.control, &self.canvas, |c| c.reconfigure(options));
        if applied.is_none() {
            log::warn!("orbit control busy; reconfigure dropped");
        }
        applied.is_some()
    }

    /// Pose the app's camera should render with.
    #[must_use]
    pub fn camera_pose(&self) -> Option<CameraPose> {
        self.control
            .try_borrow()
            .ok()
            .and_then(|c| c.host().camera_pose())
    }

    /// The shared control, for direct access.
    #[must_use]
    pub fn control(&self) -> &WebControl {
        &self.control
    }

    /// Remove the listeners and dispose the control. Safe to call twice.
    pub fn detach(&mut self) -> Result<(), OrbitError> {
        let unbound =
            self.listeners.take().map_or(Ok(()), CanvasListeners::unbind);
        drive(&self.control, &self.canvas, Lifecycle::dispose)
            .ok_or_else(|| OrbitError::Web("control busy".to_owned()))?;
        unbound
    }
}

impl Drop for WebOrbit {
    fn drop(&mut self) {
        if let Err(e) = self.detach() {
            log::warn!("orbit control detach failed: {e}");
        }
    }
}
