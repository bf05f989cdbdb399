//! Shared pipeline counters
//!
//! Plain atomic cells updated by the reader, workers and sink while the
//! pipeline runs, and read by the progress reporter and the final summary.
//! Increments are commutative so relaxed ordering is sufficient; values are
//! observational and never drive control flow inside the pipeline.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared across all pipeline threads
#[derive(Debug, Default)]
pub struct SharedCounters {
    /// Data rows successfully parsed from the input
    pub rows_read: AtomicU64,
    /// Rows the parser rejected and the reader dropped
    pub rows_malformed: AtomicU64,
    /// Rows shorter than a resolved index, padded with the sentinel
    pub rows_padded: AtomicU64,
    /// Rows that passed through a transform
    pub rows_processed: AtomicU64,
    /// Rows the sink persisted
    pub rows_written: AtomicU64,
    /// Rows the sink failed to persist and skipped
    pub write_failures: AtomicU64,
    /// Rows whose key was found in the reference set
    pub rows_matched: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub rows_read: u64,
    pub rows_malformed: u64,
    pub rows_padded: u64,
    pub rows_processed: u64,
    pub rows_written: u64,
    pub write_failures: u64,
    pub rows_matched: u64,
}

impl SharedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row_read(&self) {
        self.rows_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_row_malformed(&self) {
        self.rows_malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_row_padded(&self) -> u64 {
        self.rows_padded.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn add_row_processed(&self) {
        self.rows_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_row_written(&self) {
        self.rows_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn add_row_matched(&self) -> u64 {
        self.rows_matched.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            rows_read: self.rows_read.load(Ordering::Relaxed),
            rows_malformed: self.rows_malformed.load(Ordering::Relaxed),
            rows_padded: self.rows_padded.load(Ordering::Relaxed),
            rows_processed: self.rows_processed.load(Ordering::Relaxed),
            rows_written: self.rows_written.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
            rows_matched: self.rows_matched.load(Ordering::Relaxed),
        }
    }
}
