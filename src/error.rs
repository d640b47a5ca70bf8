//! Error types for SmartLog.
//!
//! Only configuration can fail recoverably. `FatalLog` is the aggressive-mode
//! crash and is never meant to be handled in production code.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Recoverable errors raised while building a logger.
#[derive(Debug, Error)]
pub enum SmartLogError {
    #[error("Unknown log mode: {0}")]
    InvalidMode(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(String),
}

impl From<toml::de::Error> for SmartLogError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.message().to_string())
    }
}

/// Raised by warning and error calls in `DebugAggressive` mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalLog {
    pub tag: String,
    pub message: String,
    pub cause: Option<String>,
}

impl FatalLog {
    pub fn new(tag: &str, message: &str, cause: Option<&dyn std::error::Error>) -> Self {
        Self {
            tag: tag.to_string(),
            message: message.to_string(),
            cause: cause.map(|e| e.to_string()),
        }
    }
}

impl fmt::Display for FatalLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error at '{}': {}", self.tag, self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, "->{}", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for FatalLog {}
