//! Concurrent record pipeline
//!
//! Runs one reader thread, a fixed pool of worker threads and (for
//! transforms that produce output) one sink thread, connected by bounded
//! channels that provide backpressure end to end.
//!
//! # Module Structure
//!
//! - `types`: Pool sizing and output header policy
//! - `reader`: Single-producer thread feeding records into the pool
//! - `worker`: Worker thread applying the transform
//! - `sink`: Single-consumer thread persisting transformed records
//! - `processor`: RecordPipeline orchestration

mod processor;
mod reader;
mod sink;
mod types;
mod worker;

// Re-export public types
pub use processor::RecordPipeline;
pub use types::{HeaderPolicy, PipelineConfig};
