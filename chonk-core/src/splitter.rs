//! Hierarchical greedy chunk splitting
//!
//! Text is cut into chapters (`\n\n\n`), and each chapter is packed
//! paragraph by paragraph (`\n\n`) into chunks no larger than the maximum
//! size. A paragraph that is too large on its own is packed sentence by
//! sentence instead, and a sentence that is too large is packed line by
//! line. A single line is never split further: if it exceeds the maximum it
//! becomes a chunk on its own.
//!
//! Every finished chunk passes through the [`ContentCleaner`] and is kept
//! only if it still meets the minimum size.

use crate::cleaner::ContentCleaner;
use crate::config::{ChunkerConfig, SizeLimits};
use crate::metric::SizeMetric;
use crate::segmenter::segment_sentences;

/// Separator between chapters
pub const CHAPTER_DELIMITER: &str = "\n\n\n";

/// Separator between paragraphs
pub const PARAGRAPH_DELIMITER: &str = "\n\n";

/// Granularity at which a block of text is packed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Paragraphs separated by blank lines
    Paragraph,
    /// Sentences found by the segmenter
    Sentence,
    /// Individual lines
    Line,
}

impl Level {
    /// String used to join units of this level inside one chunk
    pub fn separator(self) -> &'static str {
        match self {
            Level::Paragraph => PARAGRAPH_DELIMITER,
            Level::Sentence => " ",
            Level::Line => "\n",
        }
    }

    /// Level used for a unit that does not fit on its own
    pub fn finer(self) -> Option<Level> {
        match self {
            Level::Paragraph => Some(Level::Sentence),
            Level::Sentence => Some(Level::Line),
            Level::Line => None,
        }
    }

    /// Trimmed, non-empty units of `block` at this level
    pub fn units(self, block: &str) -> Vec<&str> {
        match self {
            Level::Paragraph => non_empty_trimmed(block.split(PARAGRAPH_DELIMITER)),
            Level::Sentence => segment_sentences(block),
            Level::Line => non_empty_trimmed(block.split('\n')),
        }
    }
}

fn non_empty_trimmed<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    pieces.map(str::trim).filter(|p| !p.is_empty()).collect()
}

/// Collapse CRLF line endings and trim surrounding whitespace
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

/// Splits documents into cleaned, size-bounded chunks
#[derive(Debug, Clone)]
pub struct Chunker {
    limits: SizeLimits,
    metric: SizeMetric,
    cleaner: ContentCleaner,
}

impl Chunker {
    /// Create a chunker from a validated configuration
    pub fn new(config: ChunkerConfig) -> Self {
        let ChunkerConfig {
            limits,
            metric,
            cleaning,
        } = config;

        Self {
            limits,
            metric,
            cleaner: ContentCleaner::new(cleaning),
        }
    }

    /// Size limits in use
    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    /// Size metric in use
    pub fn metric(&self) -> SizeMetric {
        self.metric
    }

    /// Split `text` into chunks in document order
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let text = normalize(text);
        let mut chunks = Vec::new();

        for chapter in non_empty_trimmed(text.split(CHAPTER_DELIMITER)) {
            self.pack(chapter, Level::Paragraph, &mut chunks);
        }

        log::debug!(
            "split {} {} into {} chunks",
            self.metric.measure(&text),
            self.metric.unit(),
            chunks.len()
        );
        chunks
    }

    /// Greedily pack the units of `block` at `level` into `out`
    fn pack(&self, block: &str, level: Level, out: &mut Vec<String>) {
        let max_size = self.limits.max_size();
        let separator = level.separator();
        let mut current = String::new();

        for unit in level.units(block) {
            let prospective = if current.is_empty() {
                unit.to_string()
            } else {
                format!("{current}{separator}{unit}")
            };

            if self.metric.measure(&prospective) <= max_size {
                current = prospective;
                continue;
            }

            self.finalize(&current, out);
            current.clear();

            if self.metric.measure(unit) > max_size {
                if let Some(finer) = level.finer() {
                    log::trace!("{level:?} exceeds {max_size}, descending to {finer:?}");
                    self.pack(unit, finer, out);
                    continue;
                }
                log::trace!("keeping oversized line as its own chunk");
            }

            current.push_str(unit);
        }

        self.finalize(&current, out);
    }

    /// Clean `chunk` and keep it if it meets the minimum size
    fn finalize(&self, chunk: &str, out: &mut Vec<String>) {
        if chunk.is_empty() {
            return;
        }

        let cleaned = self.cleaner.clean(chunk);
        if cleaned.trim().is_empty() {
            log::trace!("dropping chunk emptied by cleaning");
            return;
        }

        let size = self.metric.measure(&cleaned);
        if size < self.limits.min_size() {
            log::trace!(
                "dropping chunk of {size} {} below minimum {}",
                self.metric.unit(),
                self.limits.min_size()
            );
            return;
        }

        out.push(cleaned);
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(ChunkerConfig::default())
    }
}
