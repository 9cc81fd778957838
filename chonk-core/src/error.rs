//! Error types for the chunking library

use thiserror::Error;

/// Error type for chunker construction
///
/// Chunking itself never fails; only an inconsistent configuration is
/// rejected before any text is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The minimum size floor is larger than the maximum chunk size
    #[error("invalid size limits: min_size ({min_size}) exceeds max_size ({max_size})")]
    InvertedLimits {
        /// Requested maximum chunk size
        max_size: usize,
        /// Requested minimum chunk size
        min_size: usize,
    },

    /// Any other configuration problem
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for chunker configuration
pub type Result<T> = std::result::Result<T, Error>;
