// Core library for the rowmill CSV transformation engine

pub use config::{Reporter, RowmillConfig};
pub use record::Record;
pub use stats::RunSummary;

pub mod cli;
pub mod config;
pub mod counters;
pub mod decompression;
pub mod gen;
pub mod header;
pub mod pipeline;
pub mod platform;
pub mod progress;
pub mod record;
pub mod reference;
pub mod runner;
pub mod source;
pub mod stats;
pub mod transform;
pub mod tty;
