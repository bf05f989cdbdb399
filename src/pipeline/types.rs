//! Pipeline configuration types

/// Worker pool and queue sizing
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of worker threads
    pub num_workers: usize,
    /// Capacity of the channels between stages
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let num_workers = num_cpus::get();
        Self {
            num_workers,
            // Queue depth tracks the worker count so a stalled sink
            // stops the reader after one in-flight record per worker
            queue_capacity: num_workers,
        }
    }
}

/// What the sink writes ahead of the first data record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// No header row
    None,
    /// Write these column names once
    Write(Vec<String>),
}
