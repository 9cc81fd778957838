//! Post-processing applied to every finalized chunk

use crate::config::CleaningPolicy;
use crate::metric::estimate_token_count;
use crate::segmenter::is_terminator;

const PARAGRAPH_BREAK: &str = "\n\n";

/// Applies title stripping and prefix-line filtering, in that order
#[derive(Debug, Clone, Default)]
pub struct ContentCleaner {
    policy: CleaningPolicy,
}

impl ContentCleaner {
    /// Create a cleaner for `policy`
    pub fn new(policy: CleaningPolicy) -> Self {
        // An empty prefix means no filtering, however the policy was built
        let policy = CleaningPolicy::new(policy.title_token_limit, policy.forbidden_line_prefix);
        Self { policy }
    }

    /// The active cleaning policy
    pub fn policy(&self) -> &CleaningPolicy {
        &self.policy
    }

    /// Run both passes over `chunk`
    pub fn clean(&self, chunk: &str) -> String {
        let stripped = self.strip_title(chunk);
        match self.policy.forbidden_line_prefix.as_deref() {
            Some(prefix) => filter_prefixed_lines(stripped, prefix),
            None => stripped.to_string(),
        }
    }

    /// Drop a short leading title paragraph.
    ///
    /// Only the text before the first paragraph break is considered, and only
    /// once. It counts as a title when it is non-empty, has no terminal
    /// punctuation and its estimated token count is at most
    /// `title_token_limit`, whichever metric the chunk limits use.
    pub fn strip_title<'a>(&self, chunk: &'a str) -> &'a str {
        let limit = self.policy.title_token_limit;
        if limit == 0 {
            return chunk;
        }

        let Some(split_pos) = chunk.find(PARAGRAPH_BREAK) else {
            return chunk;
        };

        let candidate = chunk[..split_pos].trim();
        if candidate.is_empty()
            || candidate.contains(is_terminator)
            || estimate_token_count(candidate) > limit
        {
            return chunk;
        }

        log::trace!("stripping title {candidate:?}");
        chunk[split_pos..].trim_start()
    }
}

/// Remove every line whose trimmed content starts with `prefix`.
///
/// Surviving lines keep their order and are rejoined with single newlines.
pub fn filter_prefixed_lines(chunk: &str, prefix: &str) -> String {
    chunk
        .split('\n')
        .filter(|line| !line.trim().starts_with(prefix))
        .collect::<Vec<_>>()
        .join("\n")
}
