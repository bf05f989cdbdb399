// CLI-specific types and structures
// This module contains the command-line interface definitions and parsing logic

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rowmill")]
#[command(about = "A streaming, multi-threaded transformation engine for very large CSV files")]
#[command(
    long_about = "A streaming, multi-threaded transformation engine for very large CSV files\n\nReads record-per-line delimited text, fans rows out to a fixed worker pool over\nbounded queues, and writes results from a single sink thread, so memory stays\nflat regardless of input size. Gzip and zstd inputs are decompressed on the fly.\nMalformed rows are logged and skipped; a run never aborts mid-stream.\n\nCOMMON EXAMPLES:\n  rowmill select -c phone_number,name contacts.csv -o phones.csv\n  rowmill select -c 0,2 data.csv.gz\n  rowmill derive --from first_name,last_name --name full_name people.csv\n  rowmill overlap --key phone_number reference.csv stream.csv\n  rowmill gen --rows 1000000 --seed 42 -o synthetic.csv"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Keep a fixed subset of columns from each row
    Select(SelectArgs),
    /// Append a column derived from two existing columns
    Derive(DeriveArgs),
    /// Count rows of a stream whose key appears in a reference file
    Overlap(OverlapArgs),
    /// Generate a synthetic CSV input for exercising the pipelines
    Gen(GenArgs),
}

impl Command {
    /// The options shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Select(args) => &args.common,
            Command::Derive(args) => &args.common,
            Command::Overlap(args) => &args.common,
            Command::Gen(args) => &args.common,
        }
    }
}

#[derive(Args)]
pub struct SelectArgs {
    /// Input file (stdin if not specified, or use "-" to explicitly specify stdin)
    pub input: Option<String>,

    /// Columns to keep, in order: zero-based indices ("0,2,12") or header
    /// names ("name,phone_number"). Name selection writes the selected
    /// header; index selection writes data rows only.
    #[arg(short = 'c', long = "columns")]
    pub columns: String,

    /// Output file (stdout if not specified, or "-")
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct DeriveArgs {
    /// Input file (stdin if not specified, or use "-" to explicitly specify stdin)
    pub input: Option<String>,

    /// The two source columns joined into the derived value, e.g.
    /// "first_name,last_name"
    #[arg(long = "from")]
    pub from: String,

    /// Name of the derived column, appended to the header
    #[arg(long = "name")]
    pub name: String,

    /// Separator placed between the two trimmed source values
    #[arg(long = "separator", default_value = " ")]
    pub separator: String,

    /// Output file (stdout if not specified, or "-")
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct OverlapArgs {
    /// Reference file whose key column fills the lookup set
    pub reference: String,

    /// Stream file tested row by row against the reference set
    pub stream: String,

    /// Key column, present in both files: a header name or a zero-based index
    #[arg(short = 'k', long = "key")]
    pub key: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct GenArgs {
    /// Number of data rows to generate
    #[arg(long = "rows")]
    pub rows: u64,

    /// Number of value columns before the trailing phone_number column
    #[arg(long = "cols", default_value_t = 3)]
    pub cols: usize,

    /// Seed for deterministic output
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Output file (stdout if not specified, or "-")
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by every subcommand
#[derive(Args, Clone)]
pub struct CommonArgs {
    /// Worker threads (0 = one per core)
    #[arg(
        long = "threads",
        default_value_t = 0,
        help_heading = "Performance Options"
    )]
    pub threads: usize,

    /// Capacity of the queues between pipeline stages (0 = worker count)
    #[arg(
        long = "queue-size",
        default_value_t = 0,
        help_heading = "Performance Options"
    )]
    pub queue_size: usize,

    /// Placeholder written when a row is missing a selected column
    #[arg(
        long = "sentinel",
        default_value = "NULL",
        help_heading = "Processing Options"
    )]
    pub sentinel: String,

    /// Field delimiter: a single character, or \t for tab
    #[arg(
        short = 'd',
        long = "delimiter",
        default_value = ",",
        help_heading = "Processing Options"
    )]
    pub delimiter: String,

    /// Suppress progress and warnings
    #[arg(short = 'q', long = "quiet", help_heading = "Output Options")]
    pub quiet: bool,

    /// Log the first N reference keys and matches (overlap diagnostics)
    #[arg(long = "sample", default_value_t = 0, help_heading = "Output Options")]
    pub sample: u64,
}
