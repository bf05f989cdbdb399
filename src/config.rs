//! Run configuration
//!
//! Immutable configuration built once from the CLI and passed by reference
//! into every component. Per-subcommand inputs (paths, column lists) stay
//! with their subcommand; this covers the knobs every pipeline shares.

use anyhow::{anyhow, Result};

use crate::cli::CommonArgs;
use crate::pipeline::PipelineConfig;

/// Main configuration struct for rowmill
#[derive(Debug, Clone)]
pub struct RowmillConfig {
    pub processing: ProcessingConfig,
    pub performance: PerformanceConfig,
    pub reporting: ReportingConfig,
}

/// Record parsing and padding configuration
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub delimiter: u8,
    pub sentinel: String,
}

/// Performance configuration
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    /// Worker threads; 0 means one per core
    pub threads: usize,
    /// Channel capacity; 0 means same as the worker count
    pub queue_size: usize,
}

/// Status and warning output configuration
#[derive(Debug, Clone)]
pub struct ReportingConfig {
    pub quiet: bool,
    /// Log the first N reference keys and matches when > 0
    pub sample: u64,
}

impl RowmillConfig {
    /// Create configuration from the shared CLI arguments
    pub fn from_cli(common: &CommonArgs) -> Result<Self> {
        Ok(Self {
            processing: ProcessingConfig {
                delimiter: parse_delimiter(&common.delimiter)?,
                sentinel: common.sentinel.clone(),
            },
            performance: PerformanceConfig {
                threads: common.threads,
                queue_size: common.queue_size,
            },
            reporting: ReportingConfig {
                quiet: common.quiet,
                sample: common.sample,
            },
        })
    }

    /// Get effective thread count with defaults
    pub fn effective_threads(&self) -> usize {
        if self.performance.threads == 0 {
            num_cpus::get()
        } else {
            self.performance.threads
        }
    }

    /// Get effective channel capacity with defaults
    pub fn effective_queue_size(&self) -> usize {
        if self.performance.queue_size == 0 {
            self.effective_threads()
        } else {
            self.performance.queue_size
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            num_workers: self.effective_threads(),
            queue_capacity: self.effective_queue_size(),
        }
    }

    pub fn reporter(&self) -> Reporter {
        Reporter::new(self.reporting.quiet)
    }
}

/// Parse a delimiter argument: one ASCII character, or "\t" for tab
pub fn parse_delimiter(spec: &str) -> Result<u8> {
    if spec == "\\t" || spec == "\t" {
        return Ok(b'\t');
    }
    let mut bytes = spec.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(b), None) if b.is_ascii() => Ok(b),
        _ => Err(anyhow!(
            "delimiter must be a single ASCII character or \\t, got '{}'",
            spec
        )),
    }
}

/// Prefixed stderr messages, silenced by --quiet. Fatal errors bypass this
/// and are printed by main unconditionally.
#[derive(Debug, Clone)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// A reporter that swallows everything
    pub fn quiet() -> Self {
        Self::new(true)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("rowmill: warning: {}", message);
        }
    }

    pub fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("rowmill: {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(threads: usize, queue_size: usize) -> RowmillConfig {
        RowmillConfig {
            processing: ProcessingConfig {
                delimiter: b',',
                sentinel: "NULL".into(),
            },
            performance: PerformanceConfig { threads, queue_size },
            reporting: ReportingConfig {
                quiet: true,
                sample: 0,
            },
        }
    }

    #[test]
    fn test_zero_threads_means_one_per_core() {
        assert!(config(0, 0).effective_threads() > 0);
        assert_eq!(config(3, 0).effective_threads(), 3);
    }

    #[test]
    fn test_queue_defaults_to_worker_count() {
        let c = config(4, 0);
        assert_eq!(c.effective_queue_size(), 4);
        assert_eq!(config(4, 16).effective_queue_size(), 16);
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\t").unwrap(), b'\t');
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_reporter_quiet_flag() {
        assert!(Reporter::quiet().is_quiet());
        assert!(!Reporter::new(false).is_quiet());
    }
}
