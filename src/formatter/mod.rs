//! Turns raw metric values into the words shown on each slide.
//!
//! Everything here is pure: the same `(kind, value, is_month)` always yields
//! the same strings.

pub mod thresholds;

use crate::metrics::MetricKind;

use thresholds::table;

/// Kilometers per step.
pub const KM_PER_STEP: f64 = 0.0008;
/// Meters climbed per flight of stairs.
pub const METERS_PER_FLIGHT: f64 = 3.0;
/// Length of a standard competition pool, meters.
pub const POOL_LENGTH_M: f64 = 50.0;

const CALORIES_BOTTOM_STAT: &str = "Fueling your journey";

/// Commentary for a metric value.
///
/// Zero gets its dedicated message; otherwise the first tier whose upper
/// bound the value is strictly below wins, and values past every bound get
/// the top tier.
pub fn quote(kind: MetricKind, value: f64, is_month: bool) -> &'static str {
    let table = table(kind);
    if value == 0.0 {
        return table.zero;
    }

    let tier = table
        .bounds(is_month)
        .iter()
        .position(|bound| value < *bound)
        .unwrap_or(table.tiers.len() - 1);
    table.tiers[tier]
}

/// The secondary line under each metric slide.
pub fn bottom_stat(kind: MetricKind, value: f64) -> String {
    match kind {
        MetricKind::Steps => format!("{:.1} km traveled", value * KM_PER_STEP),
        MetricKind::Swim => format!(
            "{} Olympic laps",
            group_thousands((value / POOL_LENGTH_M).floor() as u64)
        ),
        MetricKind::Calories => CALORIES_BOTTOM_STAT.to_string(),
        MetricKind::Sleep => format!("{} days spent dreaming", (value / 24.0).round() as u64),
        MetricKind::Flights => format!(
            "{} meters climbed",
            group_thousands((value * METERS_PER_FLIGHT).round() as u64)
        ),
        MetricKind::Exercise => format!("{} hours of sweat", (value / 60.0).round() as u64),
    }
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
