//! Output formatting module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod debug;
pub mod json;

pub use debug::DebugFormatter;
pub use json::{AlpacaFormatter, JsonFormatter, JsonlFormatter};

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single chunk
    fn format_chunk(&mut self, chunk: &str) -> Result<()>;

    /// Finalize output (e.g., write the collected JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported dataset record formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One {"text": ...} object per line
    #[default]
    Jsonl,
    /// JSON array of {"text": ...} objects
    Json,
    /// JSON array of {"instruction", "input", "output"} objects
    Alpaca,
}

impl OutputFormat {
    /// All supported formats
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Jsonl,
        OutputFormat::Json,
        OutputFormat::Alpaca,
    ];

    /// Format name as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
            OutputFormat::Alpaca => "alpaca",
        }
    }

    /// Short description for `list formats`
    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "one {\"text\": chunk} object per line",
            OutputFormat::Json => "JSON array of {\"text\": chunk} objects",
            OutputFormat::Alpaca => {
                "JSON array of {\"instruction\": \"\", \"input\": \"\", \"output\": chunk} objects"
            }
        }
    }

    /// Extension applied to an explicit output path
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json | OutputFormat::Alpaca => "json",
        }
    }

    /// Extension used when the output path is derived from the input path
    fn derived_extension(&self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
            OutputFormat::Alpaca => "alpaca.json",
        }
    }

    /// Where the records for `input` are written
    pub fn output_path(&self, input: &Path, output: Option<&Path>) -> PathBuf {
        match output {
            Some(path) => path.with_extension(self.extension()),
            None => input.with_extension(self.derived_extension()),
        }
    }

    /// Create a formatter for this format writing to `writer`
    pub fn formatter<'a, W>(&self, writer: W) -> Box<dyn OutputFormatter + 'a>
    where
        W: Write + Send + Sync + 'a,
    {
        match self {
            OutputFormat::Jsonl => Box::new(JsonlFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Alpaca => Box::new(AlpacaFormatter::new(writer)),
        }
    }
}

/// Path of the human-readable debug dump for `input`
pub fn debug_path(input: &Path) -> PathBuf {
    input.with_extension("debug.txt")
}
