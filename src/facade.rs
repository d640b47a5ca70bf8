//! The SmartLog facade.
//!
//! `SmartLog` is the context object applications hold. It puts two switches in
//! front of [`ModeController`]: the entry/exit tracing switch and the
//! selective-debugging [`TagFilter`].

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::SmartLogConfig;
use crate::controller::{CallSite, ModeController};
use crate::error::FatalLog;
use crate::mode::{Mode, Severity};
use crate::sink::{LogSink, TracingSink};
use crate::timing::{Clock, SystemClock, TimingSnapshot};

/// Tag allow-list for severity calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    enabled: bool,
    allowed: BTreeSet<String>,
}

impl TagFilter {
    /// Every tag passes.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Only the given tags pass.
    pub fn allow<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: true,
            allowed: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn permits(&self, tag: &str) -> bool {
        !self.enabled || self.allowed.contains(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }
}

/// Builder for [`SmartLog`].
pub struct SmartLogBuilder {
    mode: Mode,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
    entry_exit_enabled: bool,
    filter: TagFilter,
}

impl SmartLogBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn entry_exit(mut self, enabled: bool) -> Self {
        self.entry_exit_enabled = enabled;
        self
    }

    pub fn tag_filter(mut self, filter: TagFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn build(self) -> SmartLog {
        SmartLog {
            controller: ModeController::with_clock(self.mode, self.sink, self.clock),
            entry_exit_enabled: self.entry_exit_enabled,
            filter: self.filter,
        }
    }
}

/// Mode-aware logger with entry/exit tracing and execution timing.
pub struct SmartLog {
    controller: ModeController,
    entry_exit_enabled: bool,
    filter: TagFilter,
}

impl SmartLog {
    /// Defaults: `DebugUntouched`, `TracingSink`, system clock, tracing on,
    /// no tag filter.
    pub fn builder() -> SmartLogBuilder {
        SmartLogBuilder {
            mode: Mode::default(),
            sink: Arc::new(TracingSink),
            clock: Arc::new(SystemClock::new()),
            entry_exit_enabled: true,
            filter: TagFilter::disabled(),
        }
    }

    /// Build from configuration, writing to `TracingSink`.
    pub fn from_config(config: &SmartLogConfig) -> Self {
        Self::from_config_with_sink(config, Arc::new(TracingSink))
    }

    pub fn from_config_with_sink(config: &SmartLogConfig, sink: Arc<dyn LogSink>) -> Self {
        let filter = if config.selective_debugging {
            TagFilter::allow(config.tags.iter().cloned())
        } else {
            TagFilter::disabled()
        };
        Self::builder()
            .mode(config.mode)
            .sink(sink)
            .entry_exit(config.entry_exit_enabled)
            .tag_filter(filter)
            .build()
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn set_mode(&self, mode: Mode) {
        self.controller.set_mode(mode);
    }

    pub fn controller(&self) -> &ModeController {
        &self.controller
    }

    pub fn tag_filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn entry_exit_enabled(&self) -> bool {
        self.entry_exit_enabled
    }

    /// Filter and dispatch a severity call, handing back the aggressive-mode
    /// failure instead of raising it.
    pub fn try_log(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&dyn std::error::Error>,
    ) -> Result<(), FatalLog> {
        if !self.filter.permits(tag) {
            return Ok(());
        }
        self.controller.log(severity, tag, message, error)
    }

    /// Filter and dispatch a severity call.
    ///
    /// # Panics
    ///
    /// In `DebugAggressive` mode, warnings and errors panic with
    /// `Error at '<tag>': <message>`. This is the crash-fast behavior of the
    /// mode.
    #[track_caller]
    pub fn log(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&dyn std::error::Error>,
    ) {
        if let Err(fatal) = self.try_log(severity, tag, message, error) {
            panic!("{}", fatal);
        }
    }

    #[track_caller]
    pub fn debug(&self, tag: &str, message: &str) {
        self.log(Severity::Debug, tag, message, None);
    }

    #[track_caller]
    pub fn debug_with_error(&self, tag: &str, message: &str, error: &dyn std::error::Error) {
        self.log(Severity::Debug, tag, message, Some(error));
    }

    #[track_caller]
    pub fn info(&self, tag: &str, message: &str) {
        self.log(Severity::Info, tag, message, None);
    }

    #[track_caller]
    pub fn info_with_error(&self, tag: &str, message: &str, error: &dyn std::error::Error) {
        self.log(Severity::Info, tag, message, Some(error));
    }

    #[track_caller]
    pub fn verbose(&self, tag: &str, message: &str) {
        self.log(Severity::Verbose, tag, message, None);
    }

    #[track_caller]
    pub fn verbose_with_error(&self, tag: &str, message: &str, error: &dyn std::error::Error) {
        self.log(Severity::Verbose, tag, message, Some(error));
    }

    #[track_caller]
    pub fn warn(&self, tag: &str, message: &str) {
        self.log(Severity::Warn, tag, message, None);
    }

    #[track_caller]
    pub fn warn_with_error(&self, tag: &str, message: &str, error: &dyn std::error::Error) {
        self.log(Severity::Warn, tag, message, Some(error));
    }

    #[track_caller]
    pub fn error(&self, tag: &str, message: &str) {
        self.log(Severity::Error, tag, message, None);
    }

    #[track_caller]
    pub fn error_with_error(&self, tag: &str, message: &str, error: &dyn std::error::Error) {
        self.log(Severity::Error, tag, message, Some(error));
    }

    /// Entry marker. No-op while entry/exit tracing is switched off.
    pub fn entry(&self, site: CallSite<'_>, id: Option<&str>) {
        if self.entry_exit_enabled {
            self.controller.entry(site, id);
        }
    }

    /// Exit marker. No-op while entry/exit tracing is switched off.
    pub fn exit(&self, site: CallSite<'_>, id: Option<&str>) {
        if self.entry_exit_enabled {
            self.controller.exit(site, id);
        }
    }

    /// Exit marker for a single return point; always returns `value`.
    pub fn exit_and_return<T>(&self, site: CallSite<'_>, id: Option<&str>, value: T) -> T {
        self.exit(site, id);
        value
    }

    /// Cumulative milliseconds measured for `class` in `PerformanceAnalysis`
    /// mode, or 0.
    pub fn class_execution_total(&self, class: &str) -> u64 {
        self.controller.class_total(class)
    }

    pub fn timing_snapshot(&self) -> TimingSnapshot {
        self.controller.timing().snapshot()
    }
}

impl Default for SmartLog {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filter_disabled_permits_all() {
        let filter = TagFilter::disabled();
        assert!(!filter.is_enabled());
        assert!(filter.permits("anything"));
    }

    #[test]
    fn test_tag_filter_allow_list() {
        let filter = TagFilter::allow(["A", "C"]);
        assert!(filter.permits("A"));
        assert!(!filter.permits("B"));
        assert_eq!(filter.tags().collect::<Vec<_>>(), vec!["A", "C"]);
    }

    #[test]
    fn test_empty_allow_list_blocks_all() {
        let filter = TagFilter::allow(Vec::<String>::new());
        assert!(!filter.permits("A"));
    }

    #[test]
    fn test_from_config_maps_switches() {
        let config = SmartLogConfig {
            mode: Mode::DebugPassive,
            entry_exit_enabled: false,
            selective_debugging: true,
            tags: vec!["Net".to_string()],
            ..SmartLogConfig::default()
        };
        let log = SmartLog::from_config(&config);
        assert_eq!(log.mode(), Mode::DebugPassive);
        assert!(!log.entry_exit_enabled());
        assert!(log.tag_filter().permits("Net"));
        assert!(!log.tag_filter().permits("Db"));
    }

    #[test]
    fn test_selective_off_ignores_configured_tags() {
        let config = SmartLogConfig {
            tags: vec!["Net".to_string()],
            ..SmartLogConfig::default()
        };
        let log = SmartLog::from_config(&config);
        assert!(log.tag_filter().permits("Db"));
    }
}
