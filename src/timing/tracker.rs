//! Pending entry timestamps and per-class execution totals.
//!
//! Pending entries sit behind a parking_lot::Mutex; class totals live in a
//! DashMap so readers never contend with the entry/exit hot path.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Identity of a timed call: owning class, method, and optional caller label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimingKey {
    pub class: String,
    pub method: String,
    pub id: Option<String>,
}

impl TimingKey {
    pub fn new(class: &str, method: &str, id: Option<&str>) -> Self {
        Self {
            class: class.to_string(),
            method: method.to_string(),
            id: id.map(str::to_string),
        }
    }
}

impl fmt::Display for TimingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = &self.id {
            write!(f, "{} - ", id)?;
        }
        write!(f, "{}.{}", self.class, self.method)
    }
}

/// Point-in-time view of the tracker, for export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSnapshot {
    pub pending_entries: usize,
    pub class_totals_ms: BTreeMap<String, u64>,
}

/// Thread-safe store of entry timestamps and class totals.
#[derive(Debug, Default)]
pub struct TimingTracker {
    pending: Mutex<HashMap<TimingKey, u64>>,
    class_totals: DashMap<String, u64>,
}

impl TimingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember when `key` was entered. A repeated entry overwrites the old
    /// timestamp.
    pub fn record_entry(&self, key: TimingKey, timestamp_ms: u64) {
        self.pending.lock().insert(key, timestamp_ms);
    }

    /// Take the entry timestamp for `key`, if one is pending.
    pub fn consume_entry(&self, key: &TimingKey) -> Option<u64> {
        self.pending.lock().remove(key)
    }

    /// Add `delta_ms` to the class total and return the new total.
    pub fn add_to_class_total(&self, class: &str, delta_ms: u64) -> u64 {
        let mut total = self.class_totals.entry(class.to_string()).or_insert(0);
        *total = total.saturating_add(delta_ms);
        *total
    }

    /// Cumulative milliseconds attributed to `class`, or 0.
    pub fn class_total(&self, class: &str) -> u64 {
        self.class_totals.get(class).map(|v| *v).unwrap_or(0)
    }

    pub fn is_pending(&self, key: &TimingKey) -> bool {
        self.pending.lock().contains_key(key)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn snapshot(&self) -> TimingSnapshot {
        TimingSnapshot {
            pending_entries: self.pending_len(),
            class_totals_ms: self
                .class_totals
                .iter()
                .map(|e| (e.key().clone(), *e.value()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(method: &str) -> TimingKey {
        TimingKey::new("app.Foo", method, None)
    }

    #[test]
    fn test_consume_removes_entry() {
        let tracker = TimingTracker::new();
        tracker.record_entry(key("bar"), 100);
        assert!(tracker.is_pending(&key("bar")));

        assert_eq!(tracker.consume_entry(&key("bar")), Some(100));
        assert_eq!(tracker.consume_entry(&key("bar")), None);
        assert_eq!(tracker.pending_len(), 0);
    }

    #[test]
    fn test_keys_differ_by_class_and_id() {
        let tracker = TimingTracker::new();
        tracker.record_entry(TimingKey::new("app.Foo", "run", None), 1);
        tracker.record_entry(TimingKey::new("app.Bar", "run", None), 2);
        tracker.record_entry(TimingKey::new("app.Foo", "run", Some("retry")), 3);

        assert_eq!(tracker.pending_len(), 3);
        assert_eq!(tracker.consume_entry(&TimingKey::new("app.Bar", "run", None)), Some(2));
    }

    #[test]
    fn test_reentry_overwrites_timestamp() {
        let tracker = TimingTracker::new();
        tracker.record_entry(key("bar"), 100);
        tracker.record_entry(key("bar"), 200);
        assert_eq!(tracker.consume_entry(&key("bar")), Some(200));
    }

    #[test]
    fn test_class_total_accumulates() {
        let tracker = TimingTracker::new();
        assert_eq!(tracker.class_total("app.Foo"), 0);
        assert_eq!(tracker.add_to_class_total("app.Foo", 35), 35);
        assert_eq!(tracker.add_to_class_total("app.Foo", 10), 45);
        assert_eq!(tracker.class_total("app.Foo"), 45);
        assert_eq!(tracker.class_total("app.Other"), 0);
    }

    #[test]
    fn test_class_total_saturates() {
        let tracker = TimingTracker::new();
        tracker.add_to_class_total("app.Foo", u64::MAX);
        assert_eq!(tracker.add_to_class_total("app.Foo", 1), u64::MAX);
    }

    #[test]
    fn test_snapshot_is_sorted_by_class() {
        let tracker = TimingTracker::new();
        tracker.add_to_class_total("b.Second", 2);
        tracker.add_to_class_total("a.First", 1);
        tracker.record_entry(key("open"), 5);

        let snap = tracker.snapshot();
        assert_eq!(snap.pending_entries, 1);
        let classes: Vec<_> = snap.class_totals_ms.keys().cloned().collect();
        assert_eq!(classes, vec!["a.First".to_string(), "b.Second".to_string()]);
    }

    #[test]
    fn test_concurrent_totals() {
        use std::sync::Arc;

        let tracker = Arc::new(TimingTracker::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let k = TimingKey::new("app.Foo", "work", Some(format!("{t}-{i}").as_str()));
                        tracker.record_entry(k.clone(), 0);
                        tracker.consume_entry(&k);
                        tracker.add_to_class_total("app.Foo", 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(tracker.class_total("app.Foo"), 800);
        assert_eq!(tracker.pending_len(), 0);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(key("bar").to_string(), "app.Foo.bar");
        assert_eq!(TimingKey::new("Foo", "bar", Some("x")).to_string(), "x - Foo.bar");
    }
}
