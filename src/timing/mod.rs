//! Execution-time measurement for entry/exit pairs.
//!
//! Only used while the controller runs in `PerformanceAnalysis` mode.

mod clock;
mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use tracker::{TimingKey, TimingSnapshot, TimingTracker};
