//! Run-wide outcome counters, read at end-of-run for reporting.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by every resolution of a run. Atomics so concurrent
/// resolutions may increment through `&self`.
#[derive(Debug, Default)]
pub struct RunStats {
    exact: AtomicUsize,
    partial: AtomicUsize,
    assistant: AtomicUsize,
    misses: AtomicUsize,
    skipped: AtomicUsize,
}

impl RunStats {
    pub fn record_exact(&self) {
        self.exact.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_partial(&self) {
        self.partial.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_assistant(&self) {
        self.assistant.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            exact: self.exact.load(Ordering::Relaxed),
            partial: self.partial.load(Ordering::Relaxed),
            assistant: self.assistant.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the run counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub exact: usize,
    pub partial: usize,
    pub assistant: usize,
    pub misses: usize,
    pub skipped: usize,
}

impl StatsSnapshot {
    pub fn total_matched(&self) -> usize {
        self.exact + self.partial + self.assistant
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} exact, {} partial, {} assistant, {} missed, {} skipped",
            self.exact, self.partial, self.assistant, self.misses, self.skipped
        )
    }
}
