//! Hierarchical text chunking for dataset construction
//!
//! This crate turns a raw text document into an ordered list of
//! size-bounded chunks. Text is packed greedily at the coarsest level that
//! fits, descending from chapters to paragraphs, sentences and finally lines
//! only for units that are too large on their own.
//!
//! # Architecture
//!
//! - [`metric`]: character count and heuristic token estimate
//! - [`segmenter`]: punctuation-based sentence segmentation
//! - [`cleaner`]: title stripping and prefix-line filtering
//! - [`splitter`]: the greedy packing cascade
//!
//! # Example
//!
//! ```rust
//! use chonk_core::{ChunkerConfig, Chunker, SizeMetric};
//!
//! let config = ChunkerConfig::builder()
//!     .max_size(1000)
//!     .metric(SizeMetric::Characters)
//!     .title_token_limit(3)
//!     .build()
//!     .unwrap();
//!
//! let chunker = Chunker::new(config);
//! let chunks = chunker.chunk("Title\n\nHello world. This is a test.");
//!
//! assert_eq!(chunks, vec!["Hello world. This is a test."]);
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod metric;
pub mod segmenter;
pub mod splitter;

pub use cleaner::{filter_prefixed_lines, ContentCleaner};
pub use config::{ChunkerConfig, ChunkerConfigBuilder, CleaningPolicy, SizeLimits};
pub use error::{Error, Result};
pub use metric::{estimate_token_count, SizeMetric};
pub use segmenter::segment_sentences;
pub use splitter::{normalize, Chunker, Level};

/// Split `text` into cleaned chunks according to `config`
pub fn chunk(text: &str, config: &ChunkerConfig) -> Vec<String> {
    Chunker::new(config.clone()).chunk(text)
}
