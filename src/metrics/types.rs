use serde::{Deserialize, Serialize};

/// The six tracked health quantities, declared in canonical slide order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    Steps,
    Swim,
    Calories,
    Sleep,
    Flights,
    Exercise,
}

impl MetricKind {
    /// Movement, swimming, energy, rest, elevation, workouts.
    pub const CANONICAL: [MetricKind; 6] = [
        MetricKind::Steps,
        MetricKind::Swim,
        MetricKind::Calories,
        MetricKind::Sleep,
        MetricKind::Flights,
        MetricKind::Exercise,
    ];

    /// Stable slide key.
    pub fn id(&self) -> &'static str {
        match self {
            MetricKind::Steps => "steps",
            MetricKind::Swim => "swim",
            MetricKind::Calories => "calories",
            MetricKind::Sleep => "sleep",
            MetricKind::Flights => "flights",
            MetricKind::Exercise => "exercise",
        }
    }
}

/// One snapshot of all six metrics for a period.
///
/// Units: steps and flights are counts, `swim_distance` is meters, `calories`
/// is kcal, `sleep` is fractional hours and `exercise` is minutes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    pub steps: f64,
    pub swim_distance: f64,
    pub calories: f64,
    pub sleep: f64,
    pub flights: f64,
    pub exercise: f64,
}

impl MetricSet {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Steps => self.steps,
            MetricKind::Swim => self.swim_distance,
            MetricKind::Calories => self.calories,
            MetricKind::Sleep => self.sleep,
            MetricKind::Flights => self.flights,
            MetricKind::Exercise => self.exercise,
        }
    }

    /// Replaces negative or non-finite readings with zero.
    pub fn sanitized(self) -> Self {
        fn clean(value: f64) -> f64 {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                0.0
            }
        }

        Self {
            steps: clean(self.steps),
            swim_distance: clean(self.swim_distance),
            calories: clean(self.calories),
            sleep: clean(self.sleep),
            flights: clean(self.flights),
            exercise: clean(self.exercise),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.non_zero().next().is_none()
    }

    /// Positive metrics in canonical order. Negative and NaN values are
    /// skipped the same as zero.
    pub fn non_zero(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        MetricKind::CANONICAL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, value)| *value > 0.0)
    }
}
