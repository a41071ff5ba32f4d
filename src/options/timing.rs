use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Frame pacing shared by the frame throttle, the wheel debounce and the
/// post-attach settle delay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
pub struct TimingOptions {
    /// Minimum interval between integrated frames, in milliseconds.
    #[schemars(title = "Min Frame (ms)", range(min = 1, max = 1000))]
    pub min_frame_ms: u64,
}

impl TimingOptions {
    /// The minimum frame interval as a [`Duration`].
    #[must_use]
    pub fn min_frame_interval(&self) -> Duration {
        Duration::from_millis(self.min_frame_ms)
    }
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self { min_frame_ms: 16 }
    }
}
