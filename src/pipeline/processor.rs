//! Pipeline orchestration
//!
//! Wires the reader, worker pool and sink together and owns the join
//! barrier. Channel closure is the only completion signal: the reader
//! drops the work sender at end of input, workers exit once that channel
//! drains, and the sink's channel closes when the last worker drops its
//! result sender.

use anyhow::Result;
use crossbeam_channel::bounded;
use std::io::Write;
use std::sync::Arc;
use std::thread;

use crate::config::Reporter;
use crate::counters::SharedCounters;
use crate::record::Record;
use crate::source::RecordSource;
use crate::transform::Transform;

use super::reader::reader_thread;
use super::sink::sink_thread;
use super::types::{HeaderPolicy, PipelineConfig};
use super::worker::worker_thread;

/// Concurrent engine behind every subcommand
pub struct RecordPipeline {
    config: PipelineConfig,
}

impl RecordPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Stream `source` through the worker pool into a CSV writer.
    /// Returns once every thread has exited and output is flushed.
    pub fn run_to_writer<W: Write + Send + 'static>(
        &self,
        source: RecordSource,
        transform: Arc<dyn Transform>,
        writer: csv::Writer<W>,
        header: HeaderPolicy,
        counters: Arc<SharedCounters>,
        reporter: Reporter,
    ) -> Result<()> {
        let (work_sender, work_receiver) = bounded::<Record>(self.config.queue_capacity);
        let (result_sender, result_receiver) = bounded::<Record>(self.config.queue_capacity);

        let reader_handle = thread::spawn(move || reader_thread(source, work_sender));

        let mut worker_handles = Vec::with_capacity(self.config.num_workers);
        for worker_id in 0..self.config.num_workers {
            let work_receiver = work_receiver.clone();
            let result_sender = result_sender.clone();
            let worker_transform = Arc::clone(&transform);
            let worker_counters = Arc::clone(&counters);

            let handle = thread::spawn(move || {
                worker_thread(
                    worker_id,
                    work_receiver,
                    Some(result_sender),
                    worker_transform,
                    worker_counters,
                )
            });
            worker_handles.push(handle);
        }

        // Drop our clone so the result channel closes with the last worker
        drop(result_sender);

        let sink_handle = {
            let sink_counters = Arc::clone(&counters);
            let sink_reporter = reporter;
            thread::spawn(move || {
                sink_thread(result_receiver, writer, header, sink_counters, sink_reporter)
            })
        };

        reader_handle
            .join()
            .unwrap_or_else(|e| panic!("Reader thread panicked: {:?}", e))?;

        for (idx, handle) in worker_handles.into_iter().enumerate() {
            handle
                .join()
                .unwrap_or_else(|e| panic!("Worker thread {} panicked: {:?}", idx, e))?;
        }

        sink_handle
            .join()
            .unwrap_or_else(|e| panic!("Sink thread panicked: {:?}", e))?;

        Ok(())
    }

    /// Stream `source` through the worker pool with a counting transform.
    /// No sink thread runs; the result lives in the shared counters.
    pub fn run_to_counters(
        &self,
        source: RecordSource,
        transform: Arc<dyn Transform>,
        counters: Arc<SharedCounters>,
    ) -> Result<()> {
        let (work_sender, work_receiver) = bounded::<Record>(self.config.queue_capacity);

        let reader_handle = thread::spawn(move || reader_thread(source, work_sender));

        let mut worker_handles = Vec::with_capacity(self.config.num_workers);
        for worker_id in 0..self.config.num_workers {
            let work_receiver = work_receiver.clone();
            let worker_transform = Arc::clone(&transform);
            let worker_counters = Arc::clone(&counters);

            let handle = thread::spawn(move || {
                worker_thread(worker_id, work_receiver, None, worker_transform, worker_counters)
            });
            worker_handles.push(handle);
        }

        reader_handle
            .join()
            .unwrap_or_else(|e| panic!("Reader thread panicked: {:?}", e))?;

        for (idx, handle) in worker_handles.into_iter().enumerate() {
            handle
                .join()
                .unwrap_or_else(|e| panic!("Worker thread {} panicked: {:?}", idx, e))?;
        }

        Ok(())
    }
}
