//! sweep: find large, old, and disposable files and mark them for review.
//!
//! Thin binary entry point. Scanning and review actions live in
//! `sweep-core`; the review window lives in `sweep-gui`.

mod cli;
mod run;
mod summary;

use clap::Parser;
use std::process::ExitCode;
use sweep_core::ReviewError;
use tracing::Level;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON/CSV output.
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("sweep {} starting", env!("CARGO_PKG_VERSION"));

    match run::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code_for(&err)
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ReviewError>() {
        Some(ReviewError::TagToolMissing) => ExitCode::from(run::EXIT_TAG_MISSING),
        _ => ExitCode::FAILURE,
    }
}
