//! Placeholder summarizer: the first characters of the content plus an ellipsis.

use crate::defaults;
use crate::error::Result;
use crate::traits::Summarizer;

/// Truncates content to a fixed number of characters and appends `...`.
///
/// The marker is appended even when the content is shorter than the limit.
/// Truncation counts Unicode scalar values, so multi-byte characters are
/// never split.
#[derive(Debug, Clone)]
pub struct TruncatingSummarizer {
    max_chars: usize,
}

impl Default for TruncatingSummarizer {
    fn default() -> Self {
        Self {
            max_chars: defaults::SUMMARY_MAX_CHARS,
        }
    }
}

impl TruncatingSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many characters of content are kept (default: 100).
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

impl Summarizer for TruncatingSummarizer {
    fn name(&self) -> &'static str {
        "truncate"
    }

    fn summarize(&self, content: &str) -> Result<String> {
        let mut summary: String = content.chars().take(self.max_chars).collect();
        summary.push_str(defaults::SUMMARY_ELLIPSIS);
        Ok(summary)
    }
}
