pub mod period;
pub mod types;

pub use period::{selectable_years, Period, QueryWindow};
pub use types::{MetricKind, MetricSet};
