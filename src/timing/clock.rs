//! Millisecond time sources.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::Utc;

/// Source of "now" in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

/// Monotonic clock reporting epoch milliseconds.
///
/// The epoch offset is read from `chrono::Utc` once, at construction; later
/// readings advance with `Instant`, so wall-clock steps never reach timing.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    anchor: Instant,
    epoch_millis: u64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            anchor: Instant::now(),
            // Pre-epoch clocks read as zero rather than wrapping.
            epoch_millis: u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        let elapsed = u64::try_from(self.anchor.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.epoch_millis.saturating_add(elapsed)
    }
}

/// Hand-driven clock for deterministic timing.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: AtomicU64::new(start_millis),
        }
    }

    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
