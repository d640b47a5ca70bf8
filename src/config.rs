//! SmartLog configuration.
//!
//! Configuration comes from an optional TOML file named by `SMARTLOG_CONFIG`,
//! overridden by individual `SMARTLOG_*` environment variables. Missing or
//! invalid values fall back to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `SMARTLOG_CONFIG` | unset | Path to a TOML config file |
//! | `SMARTLOG_MODE` | `debug_untouched` | Active log mode |
//! | `SMARTLOG_ENTRY_EXIT` | `true` | Entry/exit tracing switch |
//! | `SMARTLOG_SELECTIVE` | `false` | Only pass severity calls with allowed tags |
//! | `SMARTLOG_TAGS` | empty | Comma-separated allowed tags |
//! | `SMARTLOG_LOG_LEVEL` | `trace` | `tracing` filter for the default sink |
//! | `SMARTLOG_LOG_FORMAT` | `pretty` | `pretty` or `json` |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SmartLogError;
use crate::mode::Mode;
use crate::telemetry::{LogConfig, LogFormat};

pub const ENV_CONFIG: &str = "SMARTLOG_CONFIG";
pub const ENV_MODE: &str = "SMARTLOG_MODE";
pub const ENV_ENTRY_EXIT: &str = "SMARTLOG_ENTRY_EXIT";
pub const ENV_SELECTIVE: &str = "SMARTLOG_SELECTIVE";
pub const ENV_TAGS: &str = "SMARTLOG_TAGS";
pub const ENV_LOG_LEVEL: &str = "SMARTLOG_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "SMARTLOG_LOG_FORMAT";

/// Everything needed to build a [`SmartLog`](crate::SmartLog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmartLogConfig {
    pub mode: Mode,
    pub entry_exit_enabled: bool,
    pub selective_debugging: bool,
    pub tags: Vec<String>,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for SmartLogConfig {
    fn default() -> Self {
        Self {
            mode: Mode::DebugUntouched,
            entry_exit_enabled: true,
            selective_debugging: false,
            tags: Vec::new(),
            log_level: "trace".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl SmartLogConfig {
    /// Parse a TOML document. Absent keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, SmartLogError> {
        Ok(toml::from_str(s)?)
    }

    /// Subscriber settings for the default `TracingSink`.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            format: self.log_format,
            level: self.log_level.clone(),
            output_path: None,
        }
    }

    /// Human-readable problems that are legal but almost certainly mistakes.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.selective_debugging && self.tags.is_empty() {
            warnings.push(format!(
                "{} is on but {} is empty; every severity call will be dropped",
                ENV_SELECTIVE, ENV_TAGS
            ));
        }
        if self.mode == Mode::PerformanceAnalysis && !self.entry_exit_enabled {
            warnings.push(format!(
                "{} is off in performance_analysis mode; nothing will be measured",
                ENV_ENTRY_EXIT
            ));
        }
        warnings
    }

    /// Settings as a running logger applies them, for display.
    pub fn effective_config(&self) -> EffectiveConfig {
        let mut allowed_tags: Vec<String> = if self.selective_debugging {
            self.tags.clone()
        } else {
            Vec::new()
        };
        allowed_tags.sort();
        allowed_tags.dedup();

        EffectiveConfig {
            mode: self.mode,
            entry_exit_enabled: self.entry_exit_enabled,
            selective_debugging: self.selective_debugging,
            allowed_tags,
            log_level: self.log_level.clone(),
            log_format: self.log_format,
            warnings: self.warnings(),
        }
    }
}

/// Serializable summary of the effective configuration.
///
/// `allowed_tags` is empty unless selective debugging is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub mode: Mode,
    pub entry_exit_enabled: bool,
    pub selective_debugging: bool,
    pub allowed_tags: Vec<String>,
    pub log_level: String,
    pub log_format: LogFormat,
    pub warnings: Vec<String>,
}

/// Read a TOML config file.
pub fn load_file(path: impl AsRef<Path>) -> Result<SmartLogConfig, SmartLogError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SmartLogError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    SmartLogConfig::from_toml_str(&text)
}

/// Parse a boolean env var, returning `default` on missing or invalid.
fn parse_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

/// Parse a mode env var, returning `default` on missing or invalid.
fn parse_mode(key: &str, default: Mode) -> Mode {
    match std::env::var(key) {
        Ok(val) => val.parse().unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_format(key: &str, default: LogFormat) -> LogFormat {
    match std::env::var(key) {
        Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => default,
        },
        Err(_) => default,
    }
}

/// Split a comma-separated env var, dropping empty items.
fn parse_tags(key: &str) -> Option<Vec<String>> {
    let val = std::env::var(key).ok()?;
    Some(
        val.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn load_base() -> SmartLogConfig {
    let Ok(path) = std::env::var(ENV_CONFIG) else {
        return SmartLogConfig::default();
    };
    match load_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "ignoring unreadable SmartLog config file");
            SmartLogConfig::default()
        }
    }
}

/// Load configuration from `SMARTLOG_CONFIG` and `SMARTLOG_*` overrides.
///
/// Never fails; anything unusable falls back to defaults.
pub fn load() -> SmartLogConfig {
    let base = load_base();
    let log_level = std::env::var(ENV_LOG_LEVEL)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(base.log_level);

    SmartLogConfig {
        mode: parse_mode(ENV_MODE, base.mode),
        entry_exit_enabled: parse_bool(ENV_ENTRY_EXIT, base.entry_exit_enabled),
        selective_debugging: parse_bool(ENV_SELECTIVE, base.selective_debugging),
        tags: parse_tags(ENV_TAGS).unwrap_or(base.tags),
        log_level,
        log_format: parse_format(ENV_LOG_FORMAT, base.log_format),
    }
}
