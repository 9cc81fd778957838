//! CLI command implementations

use anyhow::Result;
use chonk_core::SizeMetric;
use clap::Subcommand;

use crate::output::OutputFormat;

pub mod generate_config;
pub mod process;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text files into dataset chunks
    Process(process::ProcessArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Generate a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,

    /// List available size metrics
    Metrics,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::List { subcommand } => {
                for line in subcommand.lines() {
                    println!("{line}");
                }
                Ok(())
            }
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

impl ListCommands {
    /// Lines printed for this listing
    pub fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Formats => OutputFormat::ALL
                .iter()
                .map(|format| format!("{:<8} {}", format.as_str(), format.description()))
                .collect(),
            ListCommands::Metrics => SizeMetric::ALL
                .iter()
                .map(|metric| {
                    let flag = match metric {
                        SizeMetric::Characters => "--chunk-size / --min-size",
                        SizeMetric::EstimatedTokens => "--max-tokens / --min-tokens",
                    };
                    format!("{:<11} {} ({flag})", metric.as_str(), metric.unit())
                })
                .collect(),
        }
    }
}
