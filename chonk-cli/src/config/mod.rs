//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
///
/// Every value is a default that command-line flags override.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Chunking-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkingConfig {
    /// Minimum chunk size in characters (used with --chunk-size)
    pub min_size: usize,

    /// Minimum chunk size in estimated tokens (used with --max-tokens)
    pub min_tokens: usize,

    /// Strip leading titles up to this many estimated tokens (0 disables)
    pub remove_title: usize,

    /// Drop lines starting with this prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_prefix: Option<String>,
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default record format
    pub format: OutputFormat,

    /// Also write a human-readable debug dump
    pub debug: bool,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Commented template with the default values
    pub fn template() -> String {
        let defaults = Self::default();
        format!(
            r##"# chonk configuration
#
# Values here are defaults; command-line flags take precedence.

[chunking]
# Minimum chunk size in characters, used with --chunk-size
min_size = {min_size}

# Minimum chunk size in estimated tokens, used with --max-tokens
min_tokens = {min_tokens}

# Strip a leading title paragraph of at most this many estimated tokens
# (0 disables title stripping)
remove_title = {remove_title}

# Drop every line that starts with this prefix (after trimming)
# skip_prefix = "#"

[output]
# Record format: "jsonl", "json" or "alpaca"
format = "{format}"

# Also write <input>.debug.txt with every chunk and its size
debug = {debug}
"##,
            min_size = defaults.chunking.min_size,
            min_tokens = defaults.chunking.min_tokens,
            remove_title = defaults.chunking.remove_title,
            format = defaults.output.format.as_str(),
            debug = defaults.output.debug,
        )
    }
}
