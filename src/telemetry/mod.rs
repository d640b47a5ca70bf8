//! Telemetry for SmartLog.
//!
//! Installs the `tracing` subscriber that receives records from
//! [`TracingSink`](crate::sink::TracingSink).

mod logging;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
