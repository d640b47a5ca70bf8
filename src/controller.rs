//! Mode-conditioned dispatch of log and trace calls.
//!
//! `ModeController` owns the active [`Mode`], the sink, the clock and the
//! [`TimingTracker`]. Every facade call ends up in one exhaustive match on the
//! mode's action.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::FatalLog;
use crate::mode::{Action, Mode, Severity, TraceAction};
use crate::sink::LogSink;
use crate::timing::{Clock, SystemClock, TimingKey, TimingTracker};

/// Tag used for entry markers.
pub const ENTRY_TAG: &str = "ENTRY";
/// Tag used for exit markers.
pub const EXIT_TAG: &str = "EXIT";
/// Tag used for timing reports and timing mismatches.
pub const PERFORMANCE_TAG: &str = "PerformanceAnalysis";

/// Where an entry/exit marker was placed.
///
/// `class` is normally `module_path!()` and `line` is `line!()`; see
/// [`call_site!`](crate::call_site).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub class: &'a str,
    pub method: &'a str,
    pub line: u32,
}

impl<'a> CallSite<'a> {
    pub const fn new(class: &'a str, method: &'a str, line: u32) -> Self {
        Self { class, method, line }
    }

    /// Placeholder for callers that cannot name themselves.
    pub const fn unknown() -> CallSite<'static> {
        CallSite {
            class: "<unknown>",
            method: "<unknown>",
            line: 0,
        }
    }

    fn timing_key(&self, id: Option<&str>) -> TimingKey {
        TimingKey::new(self.class, self.method, id)
    }

    fn describe(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{} - {}", id, self),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for CallSite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}:{}", self.class, self.method, self.line)
    }
}

/// Holds the active mode and routes calls to the sink or the timing tracker.
pub struct ModeController {
    mode: RwLock<Mode>,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
    timing: TimingTracker,
}

impl ModeController {
    /// Create a controller that timestamps with the system clock.
    pub fn new(mode: Mode, sink: Arc<dyn LogSink>) -> Self {
        Self::with_clock(mode, sink, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(mode: Mode, sink: Arc<dyn LogSink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            mode: RwLock::new(mode),
            sink,
            clock,
            timing: TimingTracker::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        *self.mode.read()
    }

    /// Switch modes. Pending entries and class totals are kept.
    pub fn set_mode(&self, mode: Mode) {
        let previous = std::mem::replace(&mut *self.mode.write(), mode);
        if previous != mode {
            tracing::debug!(from = %previous, to = %mode, "log mode changed");
        }
    }

    /// Dispatch a severity call.
    ///
    /// Returns `Err` only for warnings and errors in `DebugAggressive` mode.
    pub fn log(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&dyn std::error::Error>,
    ) -> Result<(), FatalLog> {
        match self.mode().action_for(severity) {
            Action::Drop => Ok(()),
            Action::Forward => {
                self.sink.write(severity, tag, message, error);
                Ok(())
            }
            Action::Fatal => Err(FatalLog::new(tag, message, error)),
        }
    }

    /// Mark the start of a traced method.
    pub fn entry(&self, site: CallSite<'_>, id: Option<&str>) {
        match self.mode().trace_action() {
            TraceAction::Drop => {}
            TraceAction::Print => {
                self.sink
                    .write(Severity::Verbose, ENTRY_TAG, &site.describe(id), None);
            }
            TraceAction::Measure => {
                self.timing
                    .record_entry(site.timing_key(id), self.clock.now_millis());
            }
        }
    }

    /// Mark the end of a traced method.
    pub fn exit(&self, site: CallSite<'_>, id: Option<&str>) {
        match self.mode().trace_action() {
            TraceAction::Drop => {}
            TraceAction::Print => {
                self.sink
                    .write(Severity::Verbose, EXIT_TAG, &site.describe(id), None);
            }
            TraceAction::Measure => self.measure_exit(site, id),
        }
    }

    /// `exit(site, id)`, then hand `value` back.
    pub fn exit_and_return<T>(&self, site: CallSite<'_>, id: Option<&str>, value: T) -> T {
        self.exit(site, id);
        value
    }

    /// Cumulative milliseconds measured for `class`, or 0.
    pub fn class_total(&self, class: &str) -> u64 {
        self.timing.class_total(class)
    }

    pub fn timing(&self) -> &TimingTracker {
        &self.timing
    }

    fn measure_exit(&self, site: CallSite<'_>, id: Option<&str>) {
        let Some(started) = self.timing.consume_entry(&site.timing_key(id)) else {
            self.sink.write(
                Severity::Error,
                PERFORMANCE_TAG,
                &format!("entry() not called before exit() in method:{}", site.method),
                None,
            );
            return;
        };

        // Wall clock may step backwards; never report negative time.
        let elapsed = self.clock.now_millis().saturating_sub(started);
        self.sink.write(
            Severity::Info,
            PERFORMANCE_TAG,
            &format!("methodName:{}|Executed in:{} ms", site.method, elapsed),
            None,
        );
        self.timing.add_to_class_total(site.class, elapsed);
    }
}
