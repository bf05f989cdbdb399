//! Per-record transforms
//!
//! A transform maps one input record to zero or one output record. All
//! variants are stateless per record; the only shared effects are atomic
//! counter updates. Workers apply the same `Arc<dyn Transform>` from every
//! thread, so implementations must be Send + Sync.

use std::sync::Arc;

use crate::config::Reporter;
use crate::counters::SharedCounters;
use crate::record::Record;
use crate::reference::ReferenceSet;

/// Cap on individual short-row warnings; the total is still counted and
/// reported in the final summary.
const SHORT_ROW_WARN_LIMIT: u64 = 8;

pub trait Transform: Send + Sync {
    /// Apply to one record. None means the record produces no output
    /// (membership testing feeds a counter, not the sink).
    fn apply(&self, record: &Record) -> Option<Record>;
}

/// Keep a fixed ordered subset of columns, padding missing ones
pub struct Project {
    indices: Vec<usize>,
    sentinel: String,
    counters: Arc<SharedCounters>,
    reporter: Reporter,
}

impl Project {
    pub fn new(
        indices: Vec<usize>,
        sentinel: String,
        counters: Arc<SharedCounters>,
        reporter: Reporter,
    ) -> Self {
        Self {
            indices,
            sentinel,
            counters,
            reporter,
        }
    }
}

impl Transform for Project {
    fn apply(&self, record: &Record) -> Option<Record> {
        let mut fields = Vec::with_capacity(self.indices.len());
        let mut padded = false;
        for &index in &self.indices {
            match record.field(index) {
                Some(value) => fields.push(value.to_string()),
                None => {
                    fields.push(self.sentinel.clone());
                    padded = true;
                }
            }
        }
        if padded {
            note_short_row(&self.counters, &self.reporter, record);
        }
        Some(Record::new(fields, record.position))
    }
}

/// Append one column derived by joining two existing columns
pub struct Combine {
    first: usize,
    second: usize,
    separator: String,
    sentinel: String,
    counters: Arc<SharedCounters>,
    reporter: Reporter,
}

impl Combine {
    pub fn new(
        first: usize,
        second: usize,
        separator: String,
        sentinel: String,
        counters: Arc<SharedCounters>,
        reporter: Reporter,
    ) -> Self {
        Self {
            first,
            second,
            separator,
            sentinel,
            counters,
            reporter,
        }
    }
}

impl Transform for Combine {
    fn apply(&self, record: &Record) -> Option<Record> {
        if record.field(self.first).is_none() || record.field(self.second).is_none() {
            note_short_row(&self.counters, &self.reporter, record);
        }
        let first = record.field_or(self.first, &self.sentinel).trim();
        let second = record.field_or(self.second, &self.sentinel).trim();

        let mut fields = record.fields.clone();
        fields.push(format!("{}{}{}", first, self.separator, second));
        Some(Record::new(fields, record.position))
    }
}

/// Count records whose trimmed key is present in the reference set
pub struct Membership {
    key: usize,
    set: Arc<ReferenceSet>,
    counters: Arc<SharedCounters>,
    reporter: Reporter,
    /// Log the first N matches when > 0
    sample: u64,
}

impl Membership {
    pub fn new(
        key: usize,
        set: Arc<ReferenceSet>,
        counters: Arc<SharedCounters>,
        reporter: Reporter,
        sample: u64,
    ) -> Self {
        Self {
            key,
            set,
            counters,
            reporter,
            sample,
        }
    }
}

impl Transform for Membership {
    fn apply(&self, record: &Record) -> Option<Record> {
        // Rows without the key column carry nothing to test
        if let Some(value) = record.field(self.key) {
            let key = value.trim();
            if !key.is_empty() && self.set.contains(key) {
                let total = self.counters.add_row_matched();
                if total <= self.sample {
                    self.reporter.status(&format!("sample match {}: {}", total, key));
                }
            }
        }
        None
    }
}

fn note_short_row(counters: &SharedCounters, reporter: &Reporter, record: &Record) {
    let seen = counters.add_row_padded();
    if seen <= SHORT_ROW_WARN_LIMIT {
        reporter.warn(&format!(
            "row {} is short ({} fields), padding with sentinel",
            record.position,
            record.len()
        ));
        if seen == SHORT_ROW_WARN_LIMIT {
            reporter.warn("further short-row warnings suppressed");
        }
    }
}
