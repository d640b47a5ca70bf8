//! Log modes and severities.
//!
//! The mode decides what happens to every facade call. The decision itself is
//! a pure function of `(Mode, Severity)` so it can be tested without a sink.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SmartLogError;

/// Process-wide logging behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Shipping build. Nothing is logged and nothing is raised.
    Release,
    /// Only warnings and errors reach the sink.
    DebugPassive,
    /// Plain pass-through to the sink.
    #[default]
    DebugUntouched,
    /// Like `DebugUntouched`, but warnings and errors crash the caller.
    DebugAggressive,
    /// No log output; entry/exit pairs are timed instead.
    PerformanceAnalysis,
}

/// Severity of a log call, mirroring the platform sink levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Verbose,
    Warn,
    Error,
}

/// What the controller does with a severity call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ignore the call.
    Drop,
    /// Write the call to the sink unchanged.
    Forward,
    /// Fail with a [`FatalLog`](crate::FatalLog) instead of writing.
    Fatal,
}

/// What the controller does with an entry/exit marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceAction {
    /// Ignore the marker.
    Drop,
    /// Write the marker as a verbose `ENTRY`/`EXIT` record.
    Print,
    /// Record or consume a timestamp and add to the class total.
    Measure,
}

impl Mode {
    /// All modes, in declaration order.
    pub const ALL: [Mode; 5] = [
        Mode::Release,
        Mode::DebugPassive,
        Mode::DebugUntouched,
        Mode::DebugAggressive,
        Mode::PerformanceAnalysis,
    ];

    /// Dispatch table for severity calls.
    pub fn action_for(self, severity: Severity) -> Action {
        match (self, severity.is_important()) {
            (Mode::Release, _) => Action::Drop,
            (Mode::PerformanceAnalysis, _) => Action::Drop,
            (Mode::DebugPassive, false) => Action::Drop,
            (Mode::DebugPassive, true) => Action::Forward,
            (Mode::DebugUntouched, _) => Action::Forward,
            (Mode::DebugAggressive, false) => Action::Forward,
            (Mode::DebugAggressive, true) => Action::Fatal,
        }
    }

    /// Dispatch table for entry/exit markers.
    pub fn trace_action(self) -> TraceAction {
        match self {
            Mode::Release | Mode::DebugPassive => TraceAction::Drop,
            Mode::DebugUntouched | Mode::DebugAggressive => TraceAction::Print,
            Mode::PerformanceAnalysis => TraceAction::Measure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::DebugPassive => "debug_passive",
            Self::DebugUntouched => "debug_untouched",
            Self::DebugAggressive => "debug_aggressive",
            Self::PerformanceAnalysis => "performance_analysis",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SmartLogError;

    /// Accepts snake_case and SCREAMING_SNAKE_CASE names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| SmartLogError::InvalidMode(s.to_string()))
    }
}

impl Severity {
    /// Warnings and errors survive passive mode and crash aggressive mode.
    pub fn is_important(&self) -> bool {
        matches!(self, Self::Warn | Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Verbose => "VERBOSE",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
