//! Size metrics used to compare text against chunk bounds
//!
//! A metric is picked once per run and passed by value through every level
//! of the splitter, so all comparisons in a run use the same unit.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Multiplier applied to the raw word/punctuation count to approximate
/// subword tokenization.
pub const TOKEN_INFLATION: f64 = 1.08;

/// How the size of a piece of text is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SizeMetric {
    /// Number of Unicode scalar values
    #[default]
    Characters,
    /// Heuristic token estimate (words and punctuation, inflated by 8%)
    #[cfg_attr(feature = "serde", serde(alias = "tokens"))]
    EstimatedTokens,
}

impl SizeMetric {
    /// All supported metrics
    pub const ALL: [SizeMetric; 2] = [SizeMetric::Characters, SizeMetric::EstimatedTokens];

    /// Measure `text` under this metric
    #[inline]
    pub fn measure(self, text: &str) -> usize {
        match self {
            SizeMetric::Characters => text.chars().count(),
            SizeMetric::EstimatedTokens => estimate_token_count(text),
        }
    }

    /// Unit label used in human-readable reports
    pub fn unit(self) -> &'static str {
        match self {
            SizeMetric::Characters => "characters",
            SizeMetric::EstimatedTokens => "tokens (est.)",
        }
    }

    /// Short identifier, as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            SizeMetric::Characters => "characters",
            SizeMetric::EstimatedTokens => "tokens",
        }
    }
}

impl fmt::Display for SizeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "characters" | "chars" => Ok(SizeMetric::Characters),
            "tokens" | "estimatedtokens" | "estimated_tokens" => Ok(SizeMetric::EstimatedTokens),
            other => Err(Error::Configuration(format!("unknown size metric: {other}"))),
        }
    }
}

/// Estimate the token count of `text` without a tokenizer.
///
/// Every run of alphanumeric characters counts as one token and every other
/// non-whitespace character counts as a token of its own. The raw count is
/// multiplied by [`TOKEN_INFLATION`] and truncated.
pub fn estimate_token_count(text: &str) -> usize {
    let mut count = 0usize;
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else {
            in_word = false;
            if !ch.is_whitespace() {
                count += 1;
            }
        }
    }

    (count as f64 * TOKEN_INFLATION) as usize
}
