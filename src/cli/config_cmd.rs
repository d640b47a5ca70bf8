// Copyright 2026 SmartLog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults, validate.
//!
//! These commands read configuration from `SMARTLOG_*` environment variables
//! (and the file named by `SMARTLOG_CONFIG`) exactly as a logging process would.

use std::io::Write;

use crate::config::{self, EffectiveConfig, SmartLogConfig, ENV_ENTRY_EXIT, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_MODE, ENV_SELECTIVE, ENV_TAGS};
use crate::telemetry::LogFormat;

/// Print the effective config to stdout, as `KEY=value` lines or JSON.
pub fn run_show(json: bool) -> i32 {
    let cfg = config::load().effective_config();
    let mut out = std::io::stdout().lock();
    let written = if json {
        serde_json::to_string_pretty(&cfg)
            .map_err(std::io::Error::other)
            .and_then(|s| writeln!(out, "{}", s))
    } else {
        write_config(&mut out, &cfg)
    };
    match written {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Failed to print config: {}", e);
            1
        }
    }
}

/// Print built-in defaults (no env or file overrides) to stdout.
pub fn run_defaults() -> i32 {
    let cfg = SmartLogConfig::default().effective_config();
    match write_config(&mut std::io::stdout().lock(), &cfg) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Failed to print config: {}", e);
            1
        }
    }
}

/// Validate configuration for obvious misconfigurations.
///
/// Returns 0 if valid, 1 if any warnings are found.
pub fn run_validate() -> i32 {
    let warnings = config::load().warnings();
    if warnings.is_empty() {
        println!("Configuration is valid.");
        return 0;
    }
    for warning in &warnings {
        eprintln!("WARNING: {}", warning);
    }
    1
}

fn write_config(out: &mut impl Write, cfg: &EffectiveConfig) -> std::io::Result<()> {
    let format = match cfg.log_format {
        LogFormat::Json => "json",
        LogFormat::Pretty => "pretty",
    };
    writeln!(out, "{}={}", ENV_MODE, cfg.mode)?;
    writeln!(out, "{}={}", ENV_ENTRY_EXIT, cfg.entry_exit_enabled)?;
    writeln!(out, "{}={}", ENV_SELECTIVE, cfg.selective_debugging)?;
    writeln!(out, "{}={}", ENV_TAGS, cfg.allowed_tags.join(","))?;
    writeln!(out, "{}={}", ENV_LOG_LEVEL, cfg.log_level)?;
    writeln!(out, "{}={}", ENV_LOG_FORMAT, format)
}
