pub mod config;
pub mod controller;
pub mod driver;
pub mod input;

pub use config::SlideshowConfig;
pub use controller::{SlideshowController, SlideshowEvent, SlideshowSnapshot};
pub use driver::SlideshowHandle;
pub use input::{PressKind, PressTracker, TapZone};
