pub mod messages;
pub mod thresholds;

pub use thresholds::MasteryThresholds;
