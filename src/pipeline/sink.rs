//! Sink thread
//!
//! Single consumer: drains transformed records from the result channel and
//! writes them in arrival order. A record that fails to write is skipped
//! and counted; the run carries on and reports the loss at the end. Output
//! is flushed before the thread returns, whatever happened earlier.

use anyhow::Result;
use crossbeam_channel::Receiver;
use std::io::Write;
use std::sync::Arc;

use crate::config::Reporter;
use crate::counters::SharedCounters;
use crate::record::Record;

use super::types::HeaderPolicy;

/// Cap on individual write-failure warnings; every failure is still counted.
const WRITE_WARN_LIMIT: u64 = 8;

pub(crate) fn sink_thread<W: Write>(
    result_receiver: Receiver<Record>,
    mut writer: csv::Writer<W>,
    header: HeaderPolicy,
    counters: Arc<SharedCounters>,
    reporter: Reporter,
) -> Result<()> {
    if let HeaderPolicy::Write(names) = &header {
        if let Err(err) = writer.write_record(names) {
            note_write_failure(&counters, &reporter, "header", &err);
        }
    }

    while let Ok(record) = result_receiver.recv() {
        match writer.write_record(&record.fields) {
            Ok(()) => {
                counters.add_row_written();
            }
            Err(err) => {
                let label = format!("row {}", record.position);
                note_write_failure(&counters, &reporter, &label, &err);
            }
        }
    }

    // A failed flush is lost output, not a reason to abort the summary
    if let Err(err) = writer.flush() {
        counters.add_write_failure();
        reporter.warn(&format!("failed to flush output: {}", err));
    }
    Ok(())
}

fn note_write_failure(
    counters: &SharedCounters,
    reporter: &Reporter,
    what: &str,
    err: &csv::Error,
) {
    let seen = counters.add_write_failure();
    if seen <= WRITE_WARN_LIMIT {
        reporter.warn(&format!("failed to write {}: {}", what, err));
        if seen == WRITE_WARN_LIMIT {
            reporter.warn("further write-failure warnings suppressed");
        }
    }
}
