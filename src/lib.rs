//! SmartLog
//!
//! A process-wide logging facade that sits in front of a platform log sink and
//! adds three things on top of it:
//!
//! - **Log modes**: one [`Mode`] decides whether calls are dropped, forwarded,
//!   or turned into a crash (`DebugAggressive`).
//! - **Entry/exit tracing**: paired markers bracketing a unit of work.
//! - **Execution timing**: in `PerformanceAnalysis` mode the markers are timed
//!   and accumulated per class.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use smartlog::{call_site, MemorySink, Mode, SmartLog};
//!
//! let sink = Arc::new(MemorySink::new());
//! let log = SmartLog::builder()
//!     .mode(Mode::DebugPassive)
//!     .sink(sink.clone())
//!     .build();
//!
//! log.debug("Net", "dropped in passive mode");
//! log.warn("Net", "forwarded");
//! log.entry(call_site!("connect"), None);
//!
//! assert_eq!(sink.len(), 1);
//! ```
//!
//! # Concurrency
//!
//! All state is shared and safe for concurrent callers. Timing keys include
//! the class, method and optional id, so concurrent traces of different
//! methods never collide; two threads timing the *same* key still overwrite
//! each other's entry timestamp.

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod facade;
pub mod global;
mod macros;
pub mod mode;
pub mod sink;
pub mod telemetry;
pub mod timing;

pub use config::{EffectiveConfig, SmartLogConfig};
pub use controller::{CallSite, ModeController, ENTRY_TAG, EXIT_TAG, PERFORMANCE_TAG};
pub use error::{FatalLog, SmartLogError};
pub use facade::{SmartLog, SmartLogBuilder, TagFilter};
pub use global::{init_from_env, install};
pub use mode::{Mode, Severity};
pub use sink::{LogSink, MemorySink, SinkRecord, TracingSink};
pub use timing::{Clock, ManualClock, SystemClock, TimingKey, TimingSnapshot, TimingTracker};
