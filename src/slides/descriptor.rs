use serde::Serialize;

use crate::metrics::MetricKind;

/// How long the count-up animation on a metric slide takes.
pub const COUNTER_DURATION_MS: u64 = 2000;

pub const SUMMARY_ID: &str = "summary";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SlideIcon {
    Footprints,
    Waves,
    Flame,
    Moon,
    ArrowUp,
    Dumbbell,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricSlide {
    pub id: &'static str,
    pub kind: MetricKind,
    pub title: &'static str,
    /// Rounded for display; thresholds were evaluated on `raw_value`.
    pub value: u64,
    pub raw_value: f64,
    pub stat_label: &'static str,
    pub gradient_colors: Vec<&'static str>,
    pub icon: SlideIcon,
    pub quote: String,
    pub bottom_stat: String,
}

impl MetricSlide {
    /// The number the count-up animation shows `elapsed_ms` after the slide appears.
    pub fn counter_value(&self, elapsed_ms: u64) -> u64 {
        if elapsed_ms >= COUNTER_DURATION_MS {
            return self.value;
        }
        let fraction = elapsed_ms as f64 / COUNTER_DURATION_MS as f64;
        (self.value as f64 * fraction).floor() as u64
    }
}

/// Content of one slide; visual state lives in the controller.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlideDescriptor {
    Metric(MetricSlide),
    /// Renders straight from the full `MetricSet`.
    Summary,
}

impl SlideDescriptor {
    pub fn id(&self) -> &'static str {
        match self {
            SlideDescriptor::Metric(slide) => slide.id,
            SlideDescriptor::Summary => SUMMARY_ID,
        }
    }

    pub fn is_summary(&self) -> bool {
        matches!(self, SlideDescriptor::Summary)
    }

    pub fn as_metric(&self) -> Option<&MetricSlide> {
        match self {
            SlideDescriptor::Metric(slide) => Some(slide),
            SlideDescriptor::Summary => None,
        }
    }
}
