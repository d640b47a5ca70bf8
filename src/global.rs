//! Process-wide SmartLog instance.
//!
//! Install one [`SmartLog`] at startup with [`install`]; the free functions
//! below and the `entry!`/`exit!` macros route through it. If nothing was
//! installed, the first call builds an instance from [`config::load`].
//!
//! [`init_from_env`] does both halves of startup from configuration: the
//! `tracing` subscriber for `TracingSink` and the process-wide logger.

use std::sync::{Arc, OnceLock};

use crate::config;
use crate::controller::CallSite;
use crate::facade::SmartLog;
use crate::mode::Mode;
use crate::telemetry::{self, LogConfig, LogError};

static GLOBAL: OnceLock<Arc<SmartLog>> = OnceLock::new();

/// Install the process-wide logger.
///
/// Returns `false` when a logger was already installed (or already created
/// lazily by an earlier call); the existing one stays active.
pub fn install(log: SmartLog) -> bool {
    let mut fresh = Some(log);
    let installed = GLOBAL.get_or_init(|| Arc::new(fresh.take().unwrap_or_default()));
    if fresh.is_some() {
        tracing::warn!(mode = %installed.mode(), "SmartLog already installed; keeping existing instance");
        return false;
    }
    true
}

/// Load configuration, install the subscriber it describes, then install the
/// process-wide logger built from it.
///
/// A subscriber set earlier is kept. Returns whether the logger was newly
/// installed; see [`install`].
pub fn init_from_env() -> Result<bool, LogError> {
    let cfg = config::load();
    apply_log_config(&cfg.log_config())?;
    Ok(install(SmartLog::from_config(&cfg)))
}

fn apply_log_config(log_config: &LogConfig) -> Result<(), LogError> {
    match telemetry::init_logging(log_config) {
        Err(LogError::AlreadyInitialized) => {
            tracing::debug!(level = %log_config.level, "tracing subscriber already set; keeping it");
            Ok(())
        }
        other => other,
    }
}

/// The process-wide logger.
pub fn global() -> Arc<SmartLog> {
    Arc::clone(instance())
}

fn instance() -> &'static Arc<SmartLog> {
    GLOBAL.get_or_init(|| Arc::new(SmartLog::from_config(&config::load())))
}

pub fn mode() -> Mode {
    instance().mode()
}

#[track_caller]
pub fn debug(tag: &str, message: &str) {
    instance().debug(tag, message);
}

#[track_caller]
pub fn debug_with_error(tag: &str, message: &str, error: &dyn std::error::Error) {
    instance().debug_with_error(tag, message, error);
}

#[track_caller]
pub fn info(tag: &str, message: &str) {
    instance().info(tag, message);
}

#[track_caller]
pub fn info_with_error(tag: &str, message: &str, error: &dyn std::error::Error) {
    instance().info_with_error(tag, message, error);
}

#[track_caller]
pub fn verbose(tag: &str, message: &str) {
    instance().verbose(tag, message);
}

#[track_caller]
pub fn verbose_with_error(tag: &str, message: &str, error: &dyn std::error::Error) {
    instance().verbose_with_error(tag, message, error);
}

#[track_caller]
pub fn warn(tag: &str, message: &str) {
    instance().warn(tag, message);
}

#[track_caller]
pub fn warn_with_error(tag: &str, message: &str, error: &dyn std::error::Error) {
    instance().warn_with_error(tag, message, error);
}

#[track_caller]
pub fn error(tag: &str, message: &str) {
    instance().error(tag, message);
}

#[track_caller]
pub fn error_with_error(tag: &str, message: &str, error: &dyn std::error::Error) {
    instance().error_with_error(tag, message, error);
}

pub fn entry(site: CallSite<'_>, id: Option<&str>) {
    instance().entry(site, id);
}

pub fn exit(site: CallSite<'_>, id: Option<&str>) {
    instance().exit(site, id);
}

pub fn exit_and_return<T>(site: CallSite<'_>, id: Option<&str>, value: T) -> T {
    instance().exit_and_return(site, id, value)
}

pub fn class_execution_total(class: &str) -> u64 {
    instance().class_execution_total(class)
}
