use anyhow::Result;
use clap::{CommandFactory, Parser};

mod cli;
mod config;
mod counters;
mod decompression;
mod gen;
mod header;
mod pipeline;
mod platform;
mod progress;
mod record;
mod reference;
mod runner;
mod source;
mod stats;
mod transform;
mod tty;

use cli::{Cli, Command};
use platform::ExitCode;
use source::STDIN_PATH;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = validate_cli_args(&cli) {
        eprintln!("rowmill: error: {}", e);
        ExitCode::InvalidUsage.exit();
    }

    // Show usage instead of blocking on a terminal that will never pipe
    // data. An explicit "-" still reads the terminal.
    if tty::is_stdin_tty() && reads_stdin_by_default(&cli.command) {
        println!("{}", Cli::command().render_usage());
        println!("A streaming, multi-threaded transformation engine for very large CSV files");
        println!("Try 'rowmill --help' for more information.");
        ExitCode::Success.exit();
    }

    let outcome = match &cli.command {
        Command::Select(args) => runner::run_select(args).map(Some),
        Command::Derive(args) => runner::run_derive(args).map(Some),
        Command::Overlap(args) => runner::run_overlap(args).map(Some),
        Command::Gen(args) => runner::run_generate(args).map(|()| None),
    };

    match outcome {
        Ok(Some(summary)) => {
            // The final summary is printed with or without --quiet.
            eprintln!("rowmill: {}", summary.format_summary());
            if summary.completed_with_loss() {
                eprintln!(
                    "rowmill: error: output incomplete ({} write failures)",
                    summary.counters.write_failures
                );
                ExitCode::GeneralError.exit();
            }
            ExitCode::Success.exit();
        }
        Ok(None) => ExitCode::Success.exit(),
        Err(e) => {
            eprintln!("rowmill: error: {:#}", e);
            ExitCode::GeneralError.exit();
        }
    }
}

/// Validate CLI argument combinations for early error detection
fn validate_cli_args(cli: &Cli) -> Result<()> {
    config::parse_delimiter(&cli.command.common().delimiter)?;

    if cli.command.common().threads > 1000 {
        return Err(anyhow::anyhow!("thread count too high (max 1000)"));
    }

    if let Command::Overlap(args) = &cli.command {
        if args.reference == STDIN_PATH && args.stream == STDIN_PATH {
            return Err(anyhow::anyhow!(
                "stdin (\"-\") can only be used for one input"
            ));
        }
    }

    Ok(())
}

/// True when the subcommand would read stdin because no input path was given
fn reads_stdin_by_default(command: &Command) -> bool {
    match command {
        Command::Select(args) => args.input.is_none(),
        Command::Derive(args) => args.input.is_none(),
        Command::Overlap(_) | Command::Gen(_) => false,
    }
}
