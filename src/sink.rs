//! Log sinks.
//!
//! A sink is the platform log output that SmartLog sits in front of. It accepts
//! `(severity, tag, message, error)` and never fails. `TracingSink` forwards to
//! the `tracing` ecosystem; `MemorySink` keeps records for inspection.

use parking_lot::Mutex;
use tracing::Level;

use crate::mode::Severity;

/// Destination for log records that pass mode dispatch.
pub trait LogSink: Send + Sync {
    fn write(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&dyn std::error::Error>,
    );
}

macro_rules! emit {
    ($level:expr, $tag:expr, $message:expr, $error:expr) => {
        match $error {
            Some(err) => tracing::event!($level, tag = %$tag, error = %err, "{}", $message),
            None => tracing::event!($level, tag = %$tag, "{}", $message),
        }
    };
}

/// Sink that emits `tracing` events.
///
/// Verbose maps to `TRACE`; the other severities map one to one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&dyn std::error::Error>,
    ) {
        match severity {
            Severity::Verbose => emit!(Level::TRACE, tag, message, error),
            Severity::Debug => emit!(Level::DEBUG, tag, message, error),
            Severity::Info => emit!(Level::INFO, tag, message, error),
            Severity::Warn => emit!(Level::WARN, tag, message, error),
            Severity::Error => emit!(Level::ERROR, tag, message, error),
        }
    }
}

/// One write captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkRecord {
    pub severity: Severity,
    pub tag: String,
    pub message: String,
    pub error: Option<String>,
}

/// Sink that stores every write in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<SinkRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all records written so far, oldest first.
    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().clone()
    }

    pub fn last(&self) -> Option<SinkRecord> {
        self.records.lock().last().cloned()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn write(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&dyn std::error::Error>,
    ) {
        self.records.lock().push(SinkRecord {
            severity,
            tag: tag.to_string(),
            message: message.to_string(),
            error: error.map(|e| e.to_string()),
        });
    }
}
