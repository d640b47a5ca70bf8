//! PerformanceAnalysis mode: timing pairs and class totals.

use std::sync::Arc;

use smartlog::{CallSite, ManualClock, MemorySink, Mode, Severity, SmartLog, PERFORMANCE_TAG};

const BAR: CallSite<'static> = CallSite::new("Foo", "bar", 1);
const BAZ: CallSite<'static> = CallSite::new("Foo", "baz", 1);

fn timed(mode: Mode) -> (SmartLog, Arc<MemorySink>, Arc<ManualClock>) {
    let sink = Arc::new(MemorySink::new());
    let clock = Arc::new(ManualClock::new(0));
    let log = SmartLog::builder()
        .mode(mode)
        .sink(sink.clone())
        .clock(clock.clone())
        .build();
    (log, sink, clock)
}

// =============================================================================
// Scenario
// =============================================================================

#[test]
fn two_pairs_accumulate_into_class_total() {
    let (log, sink, clock) = timed(Mode::PerformanceAnalysis);

    clock.set(100);
    log.entry(BAR, None);
    clock.set(135);
    log.exit(BAR, None);

    assert_eq!(sink.len(), 1);
    let rec = sink.last().unwrap();
    assert_eq!(rec.severity, Severity::Info);
    assert_eq!(rec.tag, PERFORMANCE_TAG);
    assert_eq!(rec.message, "methodName:bar|Executed in:35 ms");
    assert_eq!(log.class_execution_total("Foo"), 35);

    clock.set(200);
    log.entry(BAR, None);
    clock.set(210);
    log.exit(BAR, None);

    assert_eq!(log.class_execution_total("Foo"), 45);
}

#[test]
fn methods_of_one_class_share_a_total() {
    let (log, _sink, clock) = timed(Mode::PerformanceAnalysis);
    log.entry(BAR, None);
    log.entry(BAZ, None);
    clock.advance(7);
    log.exit(BAZ, None);
    clock.advance(3);
    log.exit(BAR, None);

    assert_eq!(log.class_execution_total("Foo"), 17);
}

#[test]
fn immediate_exit_adds_non_negative_elapsed() {
    let sink = Arc::new(MemorySink::new());
    let log = SmartLog::builder()
        .mode(Mode::PerformanceAnalysis)
        .sink(sink.clone())
        .build();
    let site = CallSite::new("Wall", "tick", 1);

    let before = log.class_execution_total("Wall");
    log.entry(site, Some("x"));
    log.exit(site, Some("x"));
    let after = log.class_execution_total("Wall");

    assert!(after >= before);
    let rec = sink.last().unwrap();
    let elapsed: u64 = rec
        .message
        .trim_start_matches("methodName:tick|Executed in:")
        .trim_end_matches(" ms")
        .parse()
        .unwrap();
    assert_eq!(after, before + elapsed);
}

// =============================================================================
// Mismatched pairs
// =============================================================================

#[test]
fn exit_without_entry_is_one_diagnostic() {
    let (log, sink, _clock) = timed(Mode::PerformanceAnalysis);
    log.exit(BAR, None);

    assert_eq!(sink.len(), 1);
    let rec = sink.last().unwrap();
    assert_eq!(rec.severity, Severity::Error);
    assert_eq!(rec.tag, PERFORMANCE_TAG);
    assert_eq!(rec.message, "entry() not called before exit() in method:bar");
    assert_eq!(log.class_execution_total("Foo"), 0);
}

#[test]
fn second_exit_after_consumed_pair_is_unmatched() {
    let (log, sink, clock) = timed(Mode::PerformanceAnalysis);
    log.entry(BAR, None);
    clock.advance(4);
    log.exit(BAR, None);
    log.exit(BAR, None);

    assert_eq!(sink.count(Severity::Info), 1);
    assert_eq!(sink.count(Severity::Error), 1);
    assert_eq!(log.class_execution_total("Foo"), 4);
    assert_eq!(log.controller().timing().pending_len(), 0);
}

#[test]
fn exit_id_must_match_entry_id() {
    let (log, sink, _clock) = timed(Mode::PerformanceAnalysis);
    log.entry(BAR, Some("first"));
    log.exit(BAR, Some("second"));

    assert_eq!(sink.count(Severity::Error), 1);
    assert_eq!(log.controller().timing().pending_len(), 1);
}

#[test]
fn same_method_in_different_classes_does_not_collide() {
    let (log, _sink, clock) = timed(Mode::PerformanceAnalysis);
    let other = CallSite::new("Other", "bar", 1);
    log.entry(BAR, None);
    clock.advance(2);
    log.entry(other, None);
    clock.advance(3);
    log.exit(other, None);
    log.exit(BAR, None);

    assert_eq!(log.class_execution_total("Other"), 3);
    assert_eq!(log.class_execution_total("Foo"), 5);
}

// =============================================================================
// Other modes never touch timing state
// =============================================================================

#[test]
fn non_performance_modes_leave_timing_untouched() {
    for mode in Mode::ALL {
        if mode == Mode::PerformanceAnalysis {
            continue;
        }
        let (log, _sink, clock) = timed(mode);
        log.entry(BAR, None);
        clock.advance(10);
        log.exit(BAR, None);
        log.exit_and_return(BAZ, None, ());

        let timing = log.controller().timing();
        assert_eq!(timing.pending_len(), 0, "{mode}");
        assert_eq!(log.class_execution_total("Foo"), 0, "{mode}");
    }
}

#[test]
fn exit_and_return_measures_and_returns() {
    let (log, sink, clock) = timed(Mode::PerformanceAnalysis);
    log.entry(BAR, None);
    clock.advance(9);
    let out = log.exit_and_return(BAR, None, vec![1, 2, 3]);

    assert_eq!(out, vec![1, 2, 3]);
    assert_eq!(sink.last().unwrap().message, "methodName:bar|Executed in:9 ms");
    assert_eq!(log.class_execution_total("Foo"), 9);
}

#[test]
fn exit_and_return_pairs_with_labelled_entry() {
    let (log, sink, clock) = timed(Mode::PerformanceAnalysis);
    let site = CallSite::new("Foo", "bar", 1);
    log.entry(site, Some("req"));
    clock.advance(10);
    let out = log.exit_and_return(site, Some("req"), 5);

    assert_eq!(out, 5);
    assert_eq!(sink.count(Severity::Error), 0);
    assert_eq!(sink.last().unwrap().message, "methodName:bar|Executed in:10 ms");
    assert_eq!(log.class_execution_total("Foo"), 10);
    assert_eq!(log.controller().timing().pending_len(), 0);
}

#[test]
fn timing_snapshot_reports_totals() {
    let (log, _sink, clock) = timed(Mode::PerformanceAnalysis);
    log.entry(BAR, None);
    clock.advance(12);
    log.exit(BAR, None);
    log.entry(BAZ, None);

    let snap = log.timing_snapshot();
    assert_eq!(snap.pending_entries, 1);
    assert_eq!(snap.class_totals_ms.get("Foo"), Some(&12));

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"Foo\":12"));
}

#[test]
fn concurrent_pairs_on_distinct_ids() {
    let (log, sink, _clock) = timed(Mode::PerformanceAnalysis);
    let log = Arc::new(log);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                for i in 0..50 {
                    let id = format!("{t}-{i}");
                    log.entry(BAR, Some(id.as_str()));
                    log.exit(BAR, Some(id.as_str()));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(sink.count(Severity::Info), 200);
    assert_eq!(sink.count(Severity::Error), 0);
    assert_eq!(log.controller().timing().pending_len(), 0);
}
