use crate::{
    formatter::{bottom_stat, quote},
    metrics::{MetricKind, MetricSet},
};

use super::descriptor::{MetricSlide, SlideDescriptor, SlideIcon};

#[derive(Debug, Clone, Copy)]
enum DisplayRounding {
    Floor,
    Nearest,
}

struct SlideStyle {
    title: &'static str,
    stat_label: &'static str,
    accent: &'static str,
    icon: SlideIcon,
    rounding: DisplayRounding,
}

const BASE_GRADIENT: [&str; 2] = ["#121212", "#1a1a1a"];

fn style(kind: MetricKind) -> SlideStyle {
    match kind {
        MetricKind::Steps => SlideStyle {
            title: "MOVEMENT",
            stat_label: "Steps Taken",
            accent: "#2C3E50",
            icon: SlideIcon::Footprints,
            rounding: DisplayRounding::Floor,
        },
        MetricKind::Swim => SlideStyle {
            title: "SWIMMING",
            stat_label: "Meters Swum",
            accent: "#1A535C",
            icon: SlideIcon::Waves,
            rounding: DisplayRounding::Floor,
        },
        MetricKind::Calories => SlideStyle {
            title: "ENERGY",
            stat_label: "Calories Burned",
            accent: "#C0392B",
            icon: SlideIcon::Flame,
            rounding: DisplayRounding::Floor,
        },
        MetricKind::Sleep => SlideStyle {
            title: "REST",
            stat_label: "Hours Asleep",
            accent: "#4A235A",
            icon: SlideIcon::Moon,
            rounding: DisplayRounding::Nearest,
        },
        MetricKind::Flights => SlideStyle {
            title: "ELEVATION",
            stat_label: "Flights Climbed",
            accent: "#D35400",
            icon: SlideIcon::ArrowUp,
            rounding: DisplayRounding::Floor,
        },
        MetricKind::Exercise => SlideStyle {
            title: "WORKOUTS",
            stat_label: "Minutes Active",
            accent: "#27AE60",
            icon: SlideIcon::Dumbbell,
            rounding: DisplayRounding::Nearest,
        },
    }
}

/// Accent color for a metric, the last stop of its slide gradient.
pub fn accent_color(kind: MetricKind) -> &'static str {
    style(kind).accent
}

/// Builds the ordered slide list for a metric snapshot.
///
/// Zero-valued metrics are left out entirely. The summary slide is always
/// appended last, so the result holds between 1 and 7 entries.
pub fn build(metrics: &MetricSet, is_month: bool) -> Vec<SlideDescriptor> {
    let mut slides: Vec<SlideDescriptor> = metrics
        .non_zero()
        .map(|(kind, raw)| SlideDescriptor::Metric(metric_slide(kind, raw, is_month)))
        .collect();

    slides.push(SlideDescriptor::Summary);
    slides
}

/// Whole number shown for `raw`: counts and energy floor, hours and
/// minutes round to nearest.
pub fn display_value(kind: MetricKind, raw: f64) -> u64 {
    let value = match style(kind).rounding {
        DisplayRounding::Floor => raw.floor(),
        DisplayRounding::Nearest => raw.round(),
    };
    value as u64
}

fn metric_slide(kind: MetricKind, raw: f64, is_month: bool) -> MetricSlide {
    let style = style(kind);

    let mut gradient_colors = BASE_GRADIENT.to_vec();
    gradient_colors.push(style.accent);

    MetricSlide {
        id: kind.id(),
        kind,
        title: style.title,
        value: display_value(kind, raw),
        raw_value: raw,
        stat_label: style.stat_label,
        gradient_colors,
        icon: style.icon,
        quote: quote(kind, raw, is_month).to_string(),
        bottom_stat: bottom_stat(kind, raw),
    }
}
