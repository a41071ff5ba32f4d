//! Pose change notifications.

use web_time::{Duration, Instant};

use super::host::{OrbitHost, OrbitUpdated};
use crate::camera::OrbitEngine;
use crate::util::DeferredTask;

/// Emits [`OrbitUpdated`] events and owns the one-shot post-attach settle
/// notification.
#[derive(Debug, Clone, Default)]
pub struct ChangeNotifier {
    settle: DeferredTask,
    emitted: u64,
}

impl ChangeNotifier {
    /// A notifier with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the engine pose and raise it on the host bus.
    pub fn emit<E: OrbitEngine, H: OrbitHost>(
        &mut self,
        engine: &E,
        host: &mut H,
    ) -> OrbitUpdated {
        let event = OrbitUpdated::new(engine.pose());
        self.emitted += 1;
        log::debug!(
            "{} #{}: position {}, target {}",
            OrbitUpdated::NAME,
            self.emitted,
            event.camera_pose.position,
            event.camera_pose.target
        );
        host.emit(&event);
        event
    }

    /// Schedule the settle notification `delay` after `now`.
    pub fn schedule_settle(&mut self, now: Instant, delay: Duration) {
        self.settle.schedule(now, delay);
    }

    /// Returns true once when the settle notification is due.
    pub fn settle_due(&mut self, now: Instant) -> bool {
        self.settle.fire_if_due(now)
    }

    /// When the settle notification fires, if still pending.
    #[must_use]
    pub fn settle_deadline(&self) -> Option<Instant> {
        self.settle.due()
    }

    /// Drop the pending settle notification, if any.
    pub fn cancel(&mut self) {
        let _was_pending = self.settle.cancel();
    }

    /// Number of events emitted so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}
