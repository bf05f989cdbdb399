//! Record source
//!
//! Sequential CSV reader feeding the pipeline: opens a path (or stdin),
//! consumes the header row, then yields data records until end of stream.
//! A record the parser rejects is logged with its position and dropped;
//! the scan itself never aborts. Opening the stream and reading the header
//! are the only fatal failure modes, and both happen before any worker
//! thread exists.

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::config::Reporter;
use crate::counters::SharedCounters;
use crate::decompression;
use crate::record::Record;

/// Input pseudo-path selecting stdin
pub const STDIN_PATH: &str = "-";

pub struct RecordSource {
    reader: csv::Reader<Box<dyn Read + Send>>,
    header: Vec<String>,
    label: String,
    next_position: u64,
    counters: Arc<SharedCounters>,
    reporter: Reporter,
}

impl RecordSource {
    /// Open `input` ("-" for stdin) and consume its header row
    pub fn open(
        input: &str,
        delimiter: u8,
        counters: Arc<SharedCounters>,
        reporter: Reporter,
    ) -> Result<Self> {
        let (raw, label): (Box<dyn Read + Send>, String) = if input == STDIN_PATH {
            let stream = decompression::maybe_decompress(std::io::stdin())
                .context("failed to read stdin")?;
            (stream, "<stdin>".to_string())
        } else {
            let stream = decompression::open_path(Path::new(input))?;
            (stream, input.to_string())
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(raw);

        let mut first = csv::StringRecord::new();
        let got_header = reader
            .read_record(&mut first)
            .with_context(|| format!("failed to read header of {}", label))?;
        if !got_header {
            return Err(anyhow!("input {} is empty (no header row)", label));
        }
        let header: Vec<String> = first.iter().map(|s| s.trim().to_string()).collect();

        Ok(Self {
            reader,
            header,
            label,
            next_position: 0,
            counters,
            reporter,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Next data record, skipping rows the parser rejects.
    /// Returns None once the stream is exhausted.
    pub fn next_record(&mut self) -> Option<Record> {
        let mut raw = csv::StringRecord::new();
        loop {
            self.next_position += 1;
            match self.reader.read_record(&mut raw) {
                Ok(true) => {
                    self.counters.add_row_read();
                    let fields = raw.iter().map(|s| s.to_string()).collect();
                    return Some(Record::new(fields, self.next_position));
                }
                Ok(false) => return None,
                // An IO error is a broken stream, not a bad row; retrying
                // would spin on the same failure.
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => {
                    self.reporter.warn(&format!(
                        "read error in {}, stopping scan: {}",
                        self.label, err
                    ));
                    return None;
                }
                Err(err) => {
                    self.counters.add_row_malformed();
                    self.reporter.warn(&format!(
                        "skipping malformed row {} in {}: {}",
                        self.next_position, self.label, err
                    ));
                }
            }
        }
    }
}
