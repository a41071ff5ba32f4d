use web_time::{Duration, Instant};

/// Leading-edge rate limiter for per-frame work.
///
/// The first call always runs; later calls run only once at least
/// `min_interval` has passed since the last call that ran. Calls inside the
/// interval are dropped, not deferred.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    /// Minimum spacing between runs.
    min_interval: Duration,
    /// When the throttled work last ran.
    last_run: Option<Instant>,
}

impl FrameThrottle {
    /// Create a throttle with the given minimum interval.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_run: None,
        }
    }

    /// Returns true (and records `now`) if the throttled work may run.
    pub fn try_run(&mut self, now: Instant) -> bool {
        let due = self.last_run.is_none_or(|last| {
            now.saturating_duration_since(last) >= self.min_interval
        });
        if due {
            self.last_run = Some(now);
        }
        due
    }

    /// Change the minimum interval. Takes effect on the next call.
    pub fn set_interval(&mut self, min_interval: Duration) {
        self.min_interval = min_interval;
    }
}
