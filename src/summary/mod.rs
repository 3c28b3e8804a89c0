//! The closing slide: every non-zero metric on one card, plus the
//! shareable image built from it.

pub mod render;
pub mod share;

use serde::Serialize;

use crate::{
    formatter::{group_thousands, KM_PER_STEP},
    metrics::{MetricKind, MetricSet, Period},
    slides::display_value,
};

pub use render::{ShareImage, CARD_HEIGHT, CARD_WIDTH};
pub use share::{share_summary, DirectoryShareTarget, ShareTarget};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub kind: MetricKind,
    pub label: &'static str,
    pub value: String,
    pub raw_value: f64,
    /// Computed from another row's metric rather than read directly.
    pub derived: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    pub period: Period,
    pub header: String,
    pub title: &'static str,
    pub rows: Vec<SummaryRow>,
    pub footer: &'static str,
}

impl SummaryCard {
    pub fn new(metrics: &MetricSet, period: Period) -> Self {
        let mut rows = Vec::new();
        for (kind, raw) in metrics.non_zero() {
            match kind {
                MetricKind::Steps => {
                    rows.push(row(
                        kind,
                        "Steps",
                        group_thousands(display_value(kind, raw)),
                        raw,
                    ));
                    rows.push(SummaryRow {
                        derived: true,
                        ..row(kind, "Distance", format!("{:.1} km", raw * KM_PER_STEP), raw)
                    });
                }
                MetricKind::Swim => rows.push(row(
                    kind,
                    "Swimming",
                    format!("{} m", group_thousands(display_value(kind, raw))),
                    raw,
                )),
                MetricKind::Calories => rows.push(row(
                    kind,
                    "Calories",
                    format!("{} kcal", group_thousands(display_value(kind, raw))),
                    raw,
                )),
                MetricKind::Sleep => rows.push(row(
                    kind,
                    "Sleep",
                    format!("{} hrs", group_thousands(display_value(kind, raw))),
                    raw,
                )),
                MetricKind::Flights => rows.push(row(
                    kind,
                    "Flights",
                    group_thousands(display_value(kind, raw)),
                    raw,
                )),
                MetricKind::Exercise => rows.push(row(
                    kind,
                    "Exercise",
                    format!("{} min", group_thousands(display_value(kind, raw))),
                    raw,
                )),
            }
        }

        Self {
            period,
            header: format!("{} WRAPPED", period.label()),
            title: "Your Health Summary",
            rows,
            footer: if period.is_month() {
                "See you next month!"
            } else {
                "See you next year!"
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text sent alongside the shared image.
    pub fn caption(&self) -> String {
        let mut caption = format!("My {} Health Wrapped", self.period.label());
        for row in &self.rows {
            caption.push('\n');
            caption.push_str(row.label);
            caption.push_str(": ");
            caption.push_str(&row.value);
        }
        caption
    }

    /// Renders the card to a PNG at the default share size.
    pub fn capture_shareable_image(&self) -> anyhow::Result<ShareImage> {
        render::capture(self, CARD_WIDTH, CARD_HEIGHT)
    }
}

fn row(kind: MetricKind, label: &'static str, value: String, raw_value: f64) -> SummaryRow {
    SummaryRow {
        kind,
        label,
        value,
        raw_value,
        derived: false,
    }
}
