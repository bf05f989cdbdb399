//! Reader thread
//!
//! Single producer: drains the record source into the work channel. The
//! source already skips malformed rows, so everything that arrives here is
//! a parsed record. Dropping the sender on exit closes the channel, which
//! is how workers learn the input is exhausted.

use anyhow::Result;
use crossbeam_channel::Sender;

use crate::record::Record;
use crate::source::RecordSource;

pub(crate) fn reader_thread(mut source: RecordSource, work_sender: Sender<Record>) -> Result<()> {
    while let Some(record) = source.next_record() {
        if work_sender.send(record).is_err() {
            // All workers are gone; no one left to feed
            break;
        }
    }
    Ok(())
}
