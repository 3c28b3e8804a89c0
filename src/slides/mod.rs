pub mod builder;
pub mod descriptor;

pub use builder::{accent_color, build, display_value};
pub use descriptor::{MetricSlide, SlideDescriptor, SlideIcon, SUMMARY_ID};
