//! Request latency ledger.
//!
//! [`PerformanceMonitor`] records how long each request that went past the
//! cache took. It is purely observational: nothing in the request path reads
//! it back. The optimizer reports each completed measurement to the
//! [`REQUEST_DURATION_SECONDS`](crate::telemetry::REQUEST_DURATION_SECONDS)
//! histogram under its bounded resource label.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// Default number of completed records kept for averaging.
pub const DEFAULT_MAX_RECORDS: usize = 1_000;

/// A finished timing measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRecord {
    pub key: String,
    pub started_at: Instant,
    pub ended_at: Instant,
    pub duration: Duration,
}

impl TimingRecord {
    /// Duration in fractional milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

#[derive(Default)]
struct Ledger {
    open: HashMap<String, Instant>,
    completed: VecDeque<TimingRecord>,
}

/// Per-key timing ledger.
pub struct PerformanceMonitor {
    ledger: Mutex<Ledger>,
    max_records: usize,
}

impl PerformanceMonitor {
    /// Create a monitor that keeps at most `max_records` completed records.
    pub fn new(max_records: usize) -> Self {
        Self {
            ledger: Mutex::new(Ledger::default()),
            max_records: max_records.max(1),
        }
    }

    /// Mark the start of a request. Replaces an unfinished measurement for
    /// the same key.
    pub fn start_timing(&self, key: &str) {
        self.lock().open.insert(key.to_owned(), Instant::now());
    }

    /// Close the measurement for `key` and return its duration.
    ///
    /// Returns [`Duration::ZERO`] if `start_timing` was never called for it.
    pub fn end_timing(&self, key: &str) -> Duration {
        self.complete(key).unwrap_or_default()
    }

    /// Close the measurement for `key`, or `None` if none was open.
    pub(crate) fn complete(&self, key: &str) -> Option<Duration> {
        let mut ledger = self.lock();
        let started_at = ledger.open.remove(key)?;
        let ended_at = Instant::now();
        let duration = ended_at.duration_since(started_at);

        if ledger.completed.len() >= self.max_records {
            ledger.completed.pop_front();
        }
        ledger.completed.push_back(TimingRecord {
            key: key.to_owned(),
            started_at,
            ended_at,
            duration,
        });
        Some(duration)
    }

    /// Mean duration of completed records whose key starts with `prefix`.
    ///
    /// [`Duration::ZERO`] when nothing matches.
    pub fn average_time(&self, prefix: &str) -> Duration {
        let ledger = self.lock();
        let (count, total) = ledger
            .completed
            .iter()
            .filter(|record| record.key.starts_with(prefix))
            .fold((0u32, Duration::ZERO), |(count, total), record| {
                (count + 1, total + record.duration)
            });
        if count == 0 {
            Duration::ZERO
        } else {
            total / count
        }
    }

    /// Number of completed records for exactly `key`.
    pub fn record_count(&self, key: &str) -> usize {
        self.lock()
            .completed
            .iter()
            .filter(|record| record.key == key)
            .count()
    }

    /// Snapshot of all completed records, oldest first.
    pub fn records(&self) -> Vec<TimingRecord> {
        self.lock().completed.iter().cloned().collect()
    }

    /// Forget all open and completed measurements.
    pub fn clear(&self) {
        let mut ledger = self.lock();
        ledger.open.clear();
        ledger.completed.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECORDS)
    }
}
