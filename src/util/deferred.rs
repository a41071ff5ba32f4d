use web_time::{Duration, Instant};

/// A cancellable one-shot deadline.
///
/// Scheduling replaces any pending deadline, so only the last schedule in a
/// burst can fire. The owner polls with the current time; a due task fires
/// once and disarms itself.
#[derive(Debug, Clone, Default)]
pub struct DeferredTask {
    due: Option<Instant>,
}

impl DeferredTask {
    /// An unarmed task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the task to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    /// Disarm the task. Returns true if it was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    /// When the task will fire, if armed.
    #[must_use]
    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    /// Fire the task if its deadline has passed. Returns true exactly once
    /// per arming.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(16);

    #[test]
    fn fires_once_at_deadline() {
        let t0 = Instant::now();
        let mut task = DeferredTask::new();
        task.schedule(t0, DELAY);
        assert_eq!(task.due(), Some(t0 + DELAY));
        assert!(!task.fire_if_due(t0 + Duration::from_millis(15)));
        assert!(task.fire_if_due(t0 + DELAY));
        assert!(!task.fire_if_due(t0 + DELAY * 2));
        assert_eq!(task.due(), None);
    }

    #[test]
    fn rescheduling_moves_the_deadline() {
        let t0 = Instant::now();
        let mut task = DeferredTask::new();
        task.schedule(t0, DELAY);
        task.schedule(t0 + Duration::from_millis(10), DELAY);
        assert!(!task.fire_if_due(t0 + DELAY));
        assert_eq!(task.due(), Some(t0 + Duration::from_millis(26)));
        assert!(task.fire_if_due(t0 + Duration::from_millis(26)));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let t0 = Instant::now();
        let mut task = DeferredTask::new();
        assert!(!task.cancel());
        task.schedule(t0, DELAY);
        assert!(task.cancel());
        assert!(!task.fire_if_due(t0 + DELAY * 10));
    }
}
