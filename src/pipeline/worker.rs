//! Worker thread
//!
//! Pulls records from the shared work channel, applies the transform and
//! forwards any output downstream. Workers exit when the work channel is
//! closed and drained; counting transforms run without a result channel.

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;

use crate::counters::SharedCounters;
use crate::record::Record;
use crate::transform::Transform;

pub(crate) fn worker_thread(
    _worker_id: usize,
    work_receiver: Receiver<Record>,
    result_sender: Option<Sender<Record>>,
    transform: Arc<dyn Transform>,
    counters: Arc<SharedCounters>,
) -> Result<()> {
    while let Ok(record) = work_receiver.recv() {
        let output = transform.apply(&record);
        counters.add_row_processed();

        if let (Some(output_record), Some(sender)) = (output, result_sender.as_ref()) {
            if sender.send(output_record).is_err() {
                // Sink is gone; stop consuming
                break;
            }
        }
    }
    Ok(())
}
