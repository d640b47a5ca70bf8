//! Subscriber configuration and initialization.
//!
//! Supports JSON and pretty-printed formats written to stderr or a file.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logging.
    Json,
    /// Human-readable pretty printing (default for development builds).
    #[default]
    Pretty,
}

/// Subscriber configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format (JSON or Pretty).
    pub format: LogFormat,
    /// `EnvFilter` directives, e.g. "trace" or "smartlog=debug".
    pub level: String,
    /// Optional file path for log output. If None, logs go to stderr.
    pub output_path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            // Mode dispatch already decides what reaches the sink.
            level: "trace".to_string(),
            output_path: None,
        }
    }
}

/// Errors that can occur during subscriber initialization.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
    #[error("Failed to open log file: {0}")]
    FileOpen(String),
    #[error("Subscriber already initialized")]
    AlreadyInitialized,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global tracing subscriber.
///
/// Call once at startup, before the first SmartLog record is written.
pub fn init_logging(config: &LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LogError::InvalidFilter(e.to_string()))?;

    let layer: BoxedLayer = match (config.format, &config.output_path) {
        (LogFormat::Json, Some(path)) => fmt::layer()
            .json()
            .with_writer(open_log_file(path)?)
            .boxed(),
        (LogFormat::Json, None) => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        (LogFormat::Pretty, Some(path)) => fmt::layer()
            .with_ansi(false)
            .with_writer(open_log_file(path)?)
            .boxed(),
        (LogFormat::Pretty, None) => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}

fn open_log_file(path: &Path) -> Result<Mutex<std::fs::File>, LogError> {
    let file = std::fs::File::create(path).map_err(|e| LogError::FileOpen(e.to_string()))?;
    Ok(Mutex::new(file))
}
