//! The orbit-control component and its lifecycle.
//!
//! [`OrbitControl`] ties together the configuration binder, the input
//! listener, the rate-limited frame updater and the change notifier around
//! a single exclusively-owned [`OrbitEngine`]. A host drives it through the
//! [`Lifecycle`] trait plus [`OrbitControl::handle_event`] for input.
//!
//! Time is always passed in by the caller, so deferred notifications (the
//! post-attach settle and the wheel debounce) fire on the first
//! [`on_frame`](Lifecycle::on_frame) or
//! [`poll_timers`](OrbitControl::poll_timers) call at or after their deadline.

/// Option → engine/host binding.
pub mod binder;
/// Host capability trait and the emitted event.
pub mod host;
/// Pose change notifications.
pub mod notifier;
/// Shared ownership for callback-driven hosts.
pub mod shared;

use web_time::Instant;

use self::binder::BindPhase;
pub use self::host::{OrbitHost, OrbitUpdated, CAMERA_ORBIT_UPDATED};
use self::notifier::ChangeNotifier;
pub use self::shared::{with_control, QueuedHost, SharedControl};
use crate::camera::OrbitEngine;
use crate::error::OrbitError;
use crate::input::{Affordance, InputEvent, InputListener};
use crate::options::{OrbitConfig, OrbitOptions, TimingOptions};
use crate::util::FrameThrottle;

/// Fixed lifecycle a host drives a component through.
pub trait Lifecycle {
    /// Declarative options accepted by [`reconfigure`](Self::reconfigure).
    type Options;

    /// Attach: create resources, bind input, schedule initial work.
    fn initialize(&mut self, now: Instant) -> Result<(), OrbitError>;

    /// Options changed.
    fn reconfigure(&mut self, options: Self::Options);

    /// Called once per rendered frame.
    fn on_frame(&mut self, now: Instant);

    /// Detach: unbind input and release resources. Must be the last call.
    fn dispose(&mut self);
}

/// Where a control is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not yet initialized.
    Detached,
    /// Initialized; engine live, listeners bound.
    Attached,
    /// Disposed; every entry point is a no-op.
    Disposed,
}

/// Orbit camera component for one camera entity.
pub struct OrbitControl<E, H> {
    host: H,
    engine: Option<E>,
    spawn_engine: fn() -> E,
    options: OrbitOptions,
    timing: TimingOptions,
    listener: InputListener,
    notifier: ChangeNotifier,
    throttle: FrameThrottle,
    phase: Phase,
}

impl<E: OrbitEngine + Default, H: OrbitHost> OrbitControl<E, H> {
    /// Create a detached control that builds its engine with
    /// `E::default()` on [`initialize`](Lifecycle::initialize).
    #[must_use]
    pub fn new(host: H, config: OrbitConfig) -> Self {
        Self::with_engine_factory(host, config, E::default)
    }
}

impl<E: OrbitEngine, H: OrbitHost> OrbitControl<E, H> {
    /// Create a detached control with a custom engine constructor.
    #[must_use]
    pub fn with_engine_factory(
        host: H,
        config: OrbitConfig,
        spawn_engine: fn() -> E,
    ) -> Self {
        let interval = config.timing.min_frame_interval();
        Self {
            host,
            engine: None,
            spawn_engine,
            options: config.controls,
            timing: config.timing,
            listener: InputListener::new(interval),
            notifier: ChangeNotifier::new(),
            throttle: FrameThrottle::new(interval),
            phase: Phase::Detached,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The live engine, if attached.
    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Mutable access to the live engine (e.g. to resize its viewport).
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// The host this control reports to.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Authored options last applied.
    #[must_use]
    pub fn options(&self) -> &OrbitOptions {
        &self.options
    }

    /// The input listener (read-only).
    #[must_use]
    pub fn listener(&self) -> &InputListener {
        &self.listener
    }

    /// Number of pose events emitted so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.notifier.emitted()
    }

    /// Earliest pending deferred notification (settle or wheel), if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.notifier.settle_deadline(),
            self.listener.state().wheel_debounce.due(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Change frame pacing. Affects the throttle, the wheel debounce and
    /// any settle notification scheduled afterwards.
    pub fn set_timing(&mut self, timing: TimingOptions) {
        let interval = timing.min_frame_interval();
        self.throttle.set_interval(interval);
        self.listener.set_debounce(interval);
        self.timing = timing;
    }

    /// Route one pointer / wheel event through the input listener.
    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let reaction = self.listener.handle_event(event, engine, now);
        if let Some(affordance) = reaction.affordance {
            self.host.set_affordance(affordance);
        }
        if reaction.camera_moved {
            self.host.sync_camera(&engine.pose());
        }
        if reaction.emit_pose {
            let _event = self.notifier.emit(engine, &mut self.host);
        }
    }

    /// Fire any deferred notification whose deadline has passed.
    pub fn poll_timers(&mut self, now: Instant) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        if self.notifier.settle_due(now) {
            let _event = self.notifier.emit(engine, &mut self.host);
        }
        if self.listener.poll(now) {
            let _event = self.notifier.emit(engine, &mut self.host);
        }
    }

    /// Rate-limited integration step.
    fn update_frame(&mut self, now: Instant) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if !self.throttle.try_run(now) || !engine.is_enabled() {
            return;
        }
        if engine.constraints().needs_integration() && engine.update() {
            self.host.sync_camera(&engine.pose());
        }
    }
}

impl<E: OrbitEngine, H: OrbitHost> Lifecycle for OrbitControl<E, H> {
    type Options = OrbitOptions;

    fn initialize(&mut self, now: Instant) -> Result<(), OrbitError> {
        match self.phase {
            Phase::Attached => {
                log::warn!("orbit control already initialized");
                return Ok(());
            }
            Phase::Disposed => {
                log::warn!("initialize called on a disposed orbit control");
                return Ok(());
            }
            Phase::Detached => {}
        }
        if !self.host.has_camera() {
            return Err(OrbitError::MissingCamera);
        }

        let mut engine = (self.spawn_engine)();
        binder::configure(
            &self.options,
            &mut engine,
            &mut self.host,
            BindPhase::Attach,
        );
        self.engine = Some(engine);

        self.listener.bind();
        self.host.set_affordance(Affordance::Grab);
        self.notifier
            .schedule_settle(now, self.timing.min_frame_interval());
        self.phase = Phase::Attached;
        log::debug!("orbit control attached");
        Ok(())
    }

    fn reconfigure(&mut self, options: OrbitOptions) {
        if self.phase == Phase::Disposed {
            log::warn!("reconfigure called on a disposed orbit control");
            return;
        }
        self.options = options;
        if let Some(engine) = self.engine.as_mut() {
            binder::configure(
                &self.options,
                engine,
                &mut self.host,
                BindPhase::Update,
            );
        }
    }

    fn on_frame(&mut self, now: Instant) {
        self.update_frame(now);
        self.poll_timers(now);
    }

    fn dispose(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }
        self.listener.unbind();
        self.notifier.cancel();
        if let Some(mut engine) = self.engine.take() {
            engine.dispose();
        }
        self.phase = Phase::Disposed;
        log::debug!("orbit control disposed");
    }
}
