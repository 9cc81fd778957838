//! Configuration for the chunker

use crate::error::{Error, Result};
use crate::metric::SizeMetric;

/// Default configuration constants
pub mod defaults {
    /// Default maximum chunk size, in the units of the chosen metric
    pub const MAX_SIZE: usize = 2000;

    /// Default minimum chunk size (no floor)
    pub const MIN_SIZE: usize = 0;

    /// Default title limit (title stripping disabled)
    pub const TITLE_TOKEN_LIMIT: usize = 0;
}

/// Upper and lower bounds on the size of an accepted chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    max_size: usize,
    min_size: usize,
}

impl SizeLimits {
    /// Create limits, rejecting a floor above the ceiling
    pub fn new(max_size: usize, min_size: usize) -> Result<Self> {
        if min_size > max_size {
            return Err(Error::InvertedLimits { max_size, min_size });
        }
        Ok(Self { max_size, min_size })
    }

    /// Largest size a packed chunk may reach
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Smallest size an accepted chunk may have
    pub fn min_size(&self) -> usize {
        self.min_size
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            max_size: defaults::MAX_SIZE,
            min_size: defaults::MIN_SIZE,
        }
    }
}

/// Content cleaning applied to every finalized chunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CleaningPolicy {
    /// Largest leading title that gets stripped. Always counted in
    /// estimated tokens, whichever [`SizeMetric`] bounds the chunks.
    /// Zero disables title stripping.
    pub title_token_limit: usize,
    /// Lines starting with this prefix (after trimming) are removed
    pub forbidden_line_prefix: Option<String>,
}

impl CleaningPolicy {
    /// Create a policy; an empty prefix disables prefix filtering
    pub fn new(title_token_limit: usize, forbidden_line_prefix: Option<String>) -> Self {
        Self {
            title_token_limit,
            forbidden_line_prefix: forbidden_line_prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Whether either cleaning pass is active
    pub fn is_active(&self) -> bool {
        self.title_token_limit > 0 || self.forbidden_line_prefix.is_some()
    }
}

/// Complete chunker configuration
#[derive(Debug, Clone, Default)]
pub struct ChunkerConfig {
    pub(crate) limits: SizeLimits,
    pub(crate) metric: SizeMetric,
    pub(crate) cleaning: CleaningPolicy,
}

impl ChunkerConfig {
    /// Create a configuration builder
    pub fn builder() -> ChunkerConfigBuilder {
        ChunkerConfigBuilder::default()
    }

    /// Assemble a configuration from already validated parts
    pub fn new(limits: SizeLimits, metric: SizeMetric, cleaning: CleaningPolicy) -> Self {
        Self {
            limits,
            metric,
            cleaning,
        }
    }

    /// Size limits
    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    /// Size metric
    pub fn metric(&self) -> SizeMetric {
        self.metric
    }

    /// Cleaning policy
    pub fn cleaning(&self) -> &CleaningPolicy {
        &self.cleaning
    }
}

/// Fluent builder for [`ChunkerConfig`]
#[derive(Debug, Default)]
pub struct ChunkerConfigBuilder {
    max_size: Option<usize>,
    min_size: Option<usize>,
    metric: Option<SizeMetric>,
    title_token_limit: Option<usize>,
    forbidden_line_prefix: Option<String>,
}

impl ChunkerConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum chunk size
    pub fn max_size(mut self, size: usize) -> Self {
        self.max_size = Some(size);
        self
    }

    /// Set the minimum chunk size
    pub fn min_size(mut self, size: usize) -> Self {
        self.min_size = Some(size);
        self
    }

    /// Set the size metric
    pub fn metric(mut self, metric: SizeMetric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Set the title stripping limit (0 disables)
    pub fn title_token_limit(mut self, limit: usize) -> Self {
        self.title_token_limit = Some(limit);
        self
    }

    /// Set the forbidden line prefix
    pub fn forbidden_line_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.forbidden_line_prefix = Some(prefix.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ChunkerConfig> {
        let limits = SizeLimits::new(
            self.max_size.unwrap_or(defaults::MAX_SIZE),
            self.min_size.unwrap_or(defaults::MIN_SIZE),
        )?;

        let cleaning = CleaningPolicy::new(
            self.title_token_limit.unwrap_or(defaults::TITLE_TOKEN_LIMIT),
            self.forbidden_line_prefix,
        );

        Ok(ChunkerConfig {
            limits,
            metric: self.metric.unwrap_or_default(),
            cleaning,
        })
    }
}
