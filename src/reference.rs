//! Reference set construction
//!
//! Single-pass, sequential load of one key column into an in-memory set.
//! The set is fully built and the file closed before the streaming phase
//! starts; afterwards it is shared read-only behind an Arc, so workers can
//! probe it without synchronization.

use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::Reporter;
use crate::counters::SharedCounters;
use crate::header::{resolve_column, ColumnSpec};
use crate::source::RecordSource;

const LOAD_PROGRESS_EVERY: u64 = 1_000_000;

/// Set of unique, trimmed, non-empty keys
#[derive(Debug, Default)]
pub struct ReferenceSet {
    keys: HashSet<String>,
}

impl ReferenceSet {
    /// Insert a key, trimming it first. Empty keys are ignored.
    /// Returns true when the key was not already present.
    pub fn insert(&mut self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.keys.insert(key.to_string())
    }

    /// Membership test; expects the caller to trim the probe first
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[allow(dead_code)] // Library surface; overlap treats an empty set as zero matches
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Load the key column of `input` into a set. Rows too short to carry the
/// key are skipped; malformed rows are handled by the source. Fails before
/// returning a partial set: open and column resolution errors are fatal.
pub fn build_reference_set(
    input: &str,
    key_spec: &ColumnSpec,
    delimiter: u8,
    reporter: &Reporter,
    sample: u64,
) -> Result<ReferenceSet> {
    let load_counters = Arc::new(SharedCounters::new());
    let mut source = RecordSource::open(
        input,
        delimiter,
        Arc::clone(&load_counters),
        reporter.clone(),
    )?;
    let key_index = resolve_key_index(source.header(), key_spec, source.label())?;

    let mut set = ReferenceSet::default();
    let mut sampled = 0u64;
    while let Some(record) = source.next_record() {
        let Some(value) = record.field(key_index) else {
            continue;
        };
        if set.insert(value) && sampled < sample {
            sampled += 1;
            reporter.status(&format!("sample reference key {}: {}", sampled, value.trim()));
        }
        if record.position % LOAD_PROGRESS_EVERY == 0 {
            reporter.status(&format!(
                "reference load: {} rows read, {} unique keys",
                record.position,
                set.len()
            ));
        }
    }

    let loaded = load_counters.snapshot();
    reporter.status(&format!(
        "loaded {} unique keys from {} ({} rows, {} malformed)",
        set.len(),
        source.label(),
        loaded.rows_read,
        loaded.rows_malformed
    ));
    Ok(set)
}

/// A key is one column: a single name resolved against the header, or a
/// single positional index
pub fn resolve_key_index(header: &[String], spec: &ColumnSpec, source: &str) -> Result<usize> {
    match spec {
        ColumnSpec::Indices(indices) if indices.len() == 1 => Ok(indices[0]),
        ColumnSpec::Names(names) if names.len() == 1 => resolve_column(header, &names[0], source),
        _ => Err(anyhow!("key must name exactly one column")),
    }
}
