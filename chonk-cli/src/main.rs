//! Chonk CLI entry point

use chonk_cli::commands::Commands;
use clap::Parser;
use std::process::ExitCode;

/// Hierarchical text chunking for ML datasets
#[derive(Debug, Parser)]
#[command(name = "chonk", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
