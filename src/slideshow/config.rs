use serde::{Deserialize, Serialize};

/// Tunable timing for a slideshow, fixed for its lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideshowConfig {
    /// How long each slide's progress bar takes to fill
    pub slide_duration_ms: u64,

    /// A press held at least this long is a pause-hold, shorter is a tap
    pub hold_threshold_ms: u64,

    /// Progress event cadence for the async driver; 0 disables progress events
    pub tick_interval_ms: u64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            slide_duration_ms: 5_000,
            hold_threshold_ms: 200,
            tick_interval_ms: 50,
        }
    }
}
