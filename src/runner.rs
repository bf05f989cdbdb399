//! Subcommand execution module
//!
//! One run_* function per subcommand. Each one owns the fatal setup zone:
//! opening inputs, resolving columns against the header, creating the
//! output writer. Once the pipeline threads are running, per-row trouble
//! is counted and reported instead of aborted on.

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use crate::cli::{DeriveArgs, GenArgs, OverlapArgs, SelectArgs};
use crate::config::RowmillConfig;
use crate::counters::SharedCounters;
use crate::gen::{self, GenSpec};
use crate::header::{parse_column_spec, resolve_columns, ColumnSpec};
use crate::pipeline::{HeaderPolicy, RecordPipeline};
use crate::progress::ProgressReporter;
use crate::reference::{build_reference_set, resolve_key_index};
use crate::source::{RecordSource, STDIN_PATH};
use crate::stats::RunSummary;
use crate::transform::{Combine, Membership, Project, Transform};

/// Project each row onto the configured columns
pub fn run_select(args: &SelectArgs) -> Result<RunSummary> {
    let config = RowmillConfig::from_cli(&args.common)?;
    let reporter = config.reporter();
    let counters = Arc::new(SharedCounters::new());
    let start = Instant::now();

    let input = args.input.as_deref().unwrap_or(STDIN_PATH);
    let source = RecordSource::open(
        input,
        config.processing.delimiter,
        Arc::clone(&counters),
        reporter.clone(),
    )?;

    // Name selection carries the matched header spellings into the output;
    // index selection writes no header at all.
    let (indices, header) = match parse_column_spec(&args.columns)? {
        ColumnSpec::Indices(indices) => (indices, HeaderPolicy::None),
        ColumnSpec::Names(names) => {
            let indices = resolve_columns(source.header(), &names, source.label())?;
            let projected = indices
                .iter()
                .map(|&index| source.header()[index].clone())
                .collect();
            (indices, HeaderPolicy::Write(projected))
        }
    };

    let writer = open_output(args.output.as_deref(), config.processing.delimiter)?;
    let transform: Arc<dyn Transform> = Arc::new(Project::new(
        indices,
        config.processing.sentinel.clone(),
        Arc::clone(&counters),
        reporter.clone(),
    ));

    let pipeline = RecordPipeline::new(config.pipeline_config());
    let mut progress = ProgressReporter::start(Arc::clone(&counters), reporter.clone(), false);
    pipeline.run_to_writer(
        source,
        transform,
        writer,
        header,
        Arc::clone(&counters),
        reporter,
    )?;
    progress.stop();

    Ok(RunSummary {
        counters: counters.snapshot(),
        elapsed: start.elapsed(),
        reports_matches: false,
    })
}

/// Append a column combined from two existing columns
pub fn run_derive(args: &DeriveArgs) -> Result<RunSummary> {
    let config = RowmillConfig::from_cli(&args.common)?;
    let reporter = config.reporter();
    let counters = Arc::new(SharedCounters::new());
    let start = Instant::now();

    let input = args.input.as_deref().unwrap_or(STDIN_PATH);
    let source = RecordSource::open(
        input,
        config.processing.delimiter,
        Arc::clone(&counters),
        reporter.clone(),
    )?;

    let (first, second) = resolve_source_pair(source.header(), &args.from, source.label())?;

    let mut header = source.header().to_vec();
    header.push(args.name.clone());

    let writer = open_output(args.output.as_deref(), config.processing.delimiter)?;
    let transform: Arc<dyn Transform> = Arc::new(Combine::new(
        first,
        second,
        args.separator.clone(),
        config.processing.sentinel.clone(),
        Arc::clone(&counters),
        reporter.clone(),
    ));

    let pipeline = RecordPipeline::new(config.pipeline_config());
    let mut progress = ProgressReporter::start(Arc::clone(&counters), reporter.clone(), false);
    pipeline.run_to_writer(
        source,
        transform,
        writer,
        HeaderPolicy::Write(header),
        Arc::clone(&counters),
        reporter,
    )?;
    progress.stop();

    Ok(RunSummary {
        counters: counters.snapshot(),
        elapsed: start.elapsed(),
        reports_matches: false,
    })
}

/// Count stream rows whose key appears in the reference file
pub fn run_overlap(args: &OverlapArgs) -> Result<RunSummary> {
    let config = RowmillConfig::from_cli(&args.common)?;
    let reporter = config.reporter();
    let start = Instant::now();

    let key_spec = parse_column_spec(&args.key)?;

    // The reference file is loaded completely before the stream is opened.
    let set = Arc::new(build_reference_set(
        &args.reference,
        &key_spec,
        config.processing.delimiter,
        &reporter,
        config.reporting.sample,
    )?);

    let counters = Arc::new(SharedCounters::new());
    let source = RecordSource::open(
        &args.stream,
        config.processing.delimiter,
        Arc::clone(&counters),
        reporter.clone(),
    )?;
    let key = resolve_key_index(source.header(), &key_spec, source.label())?;

    let transform: Arc<dyn Transform> = Arc::new(Membership::new(
        key,
        set,
        Arc::clone(&counters),
        reporter.clone(),
        config.reporting.sample,
    ));

    let pipeline = RecordPipeline::new(config.pipeline_config());
    let mut progress = ProgressReporter::start(Arc::clone(&counters), reporter.clone(), true);
    pipeline.run_to_counters(source, transform, Arc::clone(&counters))?;
    progress.stop();

    // The count goes to stdout; diagnostics stay on stderr.
    println!("{}", counters.snapshot().rows_matched);

    Ok(RunSummary {
        counters: counters.snapshot(),
        elapsed: start.elapsed(),
        reports_matches: true,
    })
}

/// Write a synthetic input file
pub fn run_generate(args: &GenArgs) -> Result<()> {
    let config = RowmillConfig::from_cli(&args.common)?;
    let reporter = config.reporter();
    let start = Instant::now();

    let spec = GenSpec {
        rows: args.rows,
        cols: args.cols,
        seed: args.seed,
    };

    let mut writer = open_output(args.output.as_deref(), config.processing.delimiter)?;
    let rows = gen::generate(&spec, &mut writer, &reporter)?;

    reporter.status(&format!(
        "generated {} rows in {}ms",
        rows,
        start.elapsed().as_millis()
    ));
    Ok(())
}

/// Open the output destination: a file path, or stdout for None / "-".
/// The writer is flexible because padded and derived rows can disagree
/// with the header width.
fn open_output(
    path: Option<&str>,
    delimiter: u8,
) -> Result<csv::Writer<Box<dyn Write + Send>>> {
    let raw: Box<dyn Write + Send> = match path {
        None | Some(STDIN_PATH) => Box::new(io::stdout()),
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("failed to create {}", path))?;
            Box::new(file)
        }
    };
    Ok(csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(raw))
}

/// Resolve the two source columns for derive, by name or by index.
/// Both must exist in the header; this is checked once, up front.
fn resolve_source_pair(header: &[String], spec: &str, source: &str) -> Result<(usize, usize)> {
    let columns = match parse_column_spec(spec)? {
        ColumnSpec::Indices(indices) => indices,
        ColumnSpec::Names(names) => resolve_columns(header, &names, source)?,
    };
    match columns[..] {
        [first, second] => {
            for index in [first, second] {
                if index >= header.len() {
                    return Err(anyhow!(
                        "column index {} is out of range for {} ({} columns)",
                        index,
                        source,
                        header.len()
                    ));
                }
            }
            Ok((first, second))
        }
        _ => Err(anyhow!(
            "--from needs exactly two columns, got {}",
            columns.len()
        )),
    }
}

// Quiet CommonArgs for driving the runners from unit tests.
#[cfg(test)]
fn test_common(threads: usize) -> crate::cli::CommonArgs {
    crate::cli::CommonArgs {
        threads,
        queue_size: 0,
        sentinel: "NULL".to_string(),
        delimiter: ",".to_string(),
        quiet: true,
        sample: 0,
    }
}
