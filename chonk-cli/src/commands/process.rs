//! Process command implementation

use anyhow::{Context, Result};
use chonk_core::{Chunker, ChunkerConfig, SizeMetric};
use clap::{ArgGroup, Args};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{debug_path, DebugFormatter, OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;

/// Arguments for the process command
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("max").required(true).args(["chunk_size", "max_tokens"])))]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Maximum chunk size in characters
    #[arg(short = 's', long, value_name = "CHARS")]
    pub chunk_size: Option<usize>,

    /// Maximum chunk size in estimated tokens
    #[arg(short = 't', long, value_name = "TOKENS")]
    pub max_tokens: Option<usize>,

    /// Minimum chunk size in characters (with --chunk-size)
    #[arg(long, value_name = "CHARS")]
    pub min_size: Option<usize>,

    /// Minimum chunk size in estimated tokens (with --max-tokens)
    #[arg(long, value_name = "TOKENS")]
    pub min_tokens: Option<usize>,

    /// Strip a leading title of at most this many estimated tokens
    #[arg(long, value_name = "TOKENS")]
    pub remove_title: Option<usize>,

    /// Drop lines that start with this prefix
    #[arg(long, value_name = "PREFIX", allow_hyphen_values = true)]
    pub skip_prefix: Option<String>,

    /// Output file (single input only; default: next to the input)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also write a human-readable debug dump next to each input
    #[arg(long)]
    pub debug: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "CHONK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Files read and written for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub debug: Option<PathBuf>,
}

/// Settings for one run, after merging flags over the config file
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub chunker: ChunkerConfig,
    pub format: OutputFormat,
    pub debug: bool,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting text chunking");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let settings = self.resolve(&file_config)?;

        let files = resolve_patterns(&self.input)?;
        if self.output.is_some() && files.len() > 1 {
            return Err(CliError::ConfigError(format!(
                "--output requires a single input file, got {}",
                files.len()
            ))
            .into());
        }
        log::info!("Found {} file(s) to process", files.len());

        let plans = self.plan_outputs(&files, &settings)?;

        let chunker = Chunker::new(settings.chunker.clone());
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(plans.len() as u64);

        for plan in &plans {
            let count = process_file(&chunker, settings.format, plan, &progress)?;
            progress.file_completed(&plan.input.display().to_string(), count);
        }

        progress.finish();
        log::info!("Processing complete");
        Ok(())
    }

    /// Merge command-line flags over `config`
    pub fn resolve(&self, config: &CliConfig) -> Result<ResolvedSettings> {
        let (metric, max_size) = match (self.chunk_size, self.max_tokens) {
            (_, Some(tokens)) => (SizeMetric::EstimatedTokens, tokens),
            (Some(chars), None) => (SizeMetric::Characters, chars),
            (None, None) => {
                return Err(CliError::ConfigError(
                    "Either --chunk-size or --max-tokens is required".to_string(),
                )
                .into())
            }
        };

        if max_size == 0 {
            return Err(
                CliError::ConfigError("Chunk size must be greater than 0".to_string()).into(),
            );
        }

        let min_size = match metric {
            SizeMetric::Characters => {
                if self.min_tokens.is_some() {
                    log::warn!("--min-tokens is ignored with --chunk-size; use --min-size");
                }
                self.min_size.unwrap_or(config.chunking.min_size)
            }
            SizeMetric::EstimatedTokens => {
                if self.min_size.is_some() {
                    log::warn!("--min-size is ignored with --max-tokens; use --min-tokens");
                }
                self.min_tokens.unwrap_or(config.chunking.min_tokens)
            }
        };

        let mut builder = ChunkerConfig::builder()
            .max_size(max_size)
            .min_size(min_size)
            .metric(metric)
            .title_token_limit(self.remove_title.unwrap_or(config.chunking.remove_title));

        if let Some(prefix) = self.skip_prefix.as_ref().or(config.chunking.skip_prefix.as_ref()) {
            builder = builder.forbidden_line_prefix(prefix.as_str());
        }

        let chunker = builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        Ok(ResolvedSettings {
            chunker,
            format: self.format.unwrap_or(config.output.format),
            debug: self.debug || config.output.debug,
        })
    }

    /// Work out every file to be written before any is created.
    ///
    /// Paths are compared in canonical form, so a target that is an input
    /// file or is claimed by two inputs is refused however it is spelled.
    pub fn plan_outputs(
        &self,
        files: &[PathBuf],
        settings: &ResolvedSettings,
    ) -> Result<Vec<FilePlan>> {
        let inputs = files
            .iter()
            .map(|file| canonical_target(file))
            .collect::<Result<HashSet<_>>>()?;

        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
        let mut plans = Vec::with_capacity(files.len());

        for input in files {
            let output = settings.format.output_path(input, self.output.as_deref());
            let debug = settings.debug.then(|| debug_path(input));

            for target in std::iter::once(&output).chain(debug.as_ref()) {
                let key = canonical_target(target)?;
                if inputs.contains(&key) {
                    return Err(CliError::OutputError(format!(
                        "'{}' would overwrite an input file",
                        target.display()
                    ))
                    .into());
                }
                if let Some(previous) = claimed.insert(key, input.as_path()) {
                    return Err(CliError::OutputError(format!(
                        "'{}' would be written for both '{}' and '{}'",
                        target.display(),
                        previous.display(),
                        input.display()
                    ))
                    .into());
                }
            }

            plans.push(FilePlan {
                input: input.clone(),
                output,
                debug,
            });
        }

        Ok(plans)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }

        Ok(())
    }
}

/// Chunk one file and write its outputs, returning the chunk count
fn process_file(
    chunker: &Chunker,
    format: OutputFormat,
    plan: &FilePlan,
    progress: &ProgressReporter,
) -> Result<usize> {
    log::info!("Processing file: {}", plan.input.display());

    let text = FileReader::read_text(&plan.input)?;
    let chunks = chunker.chunk(&text);

    let mut formatter = format.formatter(create_writer(&plan.output)?);
    write_chunks(formatter.as_mut(), &chunks)?;
    progress.println(&format!(
        "Saved {} chunks to '{}'",
        chunks.len(),
        plan.output.display()
    ));

    if let Some(path) = &plan.debug {
        let mut formatter =
            DebugFormatter::new(create_writer(path)?, chunker.metric(), chunks.len());
        write_chunks(&mut formatter, &chunks)?;
        progress.println(&format!("Debug file saved to '{}'", path.display()));
    }

    Ok(chunks.len())
}

/// Absolute, symlink-free form of `path`, which need not exist yet
fn canonical_target(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| CliError::OutputError(format!("'{}' is not a file path", path.display())))?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let dir = parent
        .canonicalize()
        .with_context(|| format!("Output directory not found: {}", parent.display()))?;

    Ok(dir.join(file_name))
}

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_chunks(formatter: &mut dyn OutputFormatter, chunks: &[String]) -> Result<()> {
    for chunk in chunks {
        formatter.format_chunk(chunk)?;
    }
    formatter.finish()
}
