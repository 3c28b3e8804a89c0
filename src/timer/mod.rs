pub mod bank;
pub mod state;

pub use bank::ProgressBank;
pub use state::{ProgressTimer, TimerStatus};
