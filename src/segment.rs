/*!
 * The core data model: a single time-coded caption unit.
 */

use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::timecode::{format_time_range, format_timestamp};

// Markup-like tags are stripped before word counting
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// A single subtitle segment.
///
/// Invariant: `end_ms > start_ms` strictly. The parser drops blocks that
/// violate it and the splitter's post-validation drops any children that
/// would; code in between can rely on positive durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based sequence number; renumbered densely before serialization
    pub index: usize,

    /// Start time in milliseconds
    pub start_ms: u64,

    /// End time in milliseconds
    pub end_ms: u64,

    /// Caption text, possibly multi-line
    pub text: String,
}

impl Segment {
    /// Create a new segment
    pub fn new(index: usize, start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Segment {
            index,
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Word count of this segment's text
    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }

    /// Caption text flattened to a single line
    pub fn flat_text(&self) -> String {
        self.text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Character count of the flattened text
    pub fn char_count(&self) -> usize {
        self.flat_text().chars().count()
    }

    /// Formatted start timestamp
    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start_ms)
    }

    /// Formatted end timestamp
    pub fn format_end_time(&self) -> String {
        format_timestamp(self.end_ms)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{}", format_time_range(self.start_ms, self.end_ms))?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Count words in a piece of caption text.
///
/// Markup-like tags (`<...>`) are stripped, then the text splits on
/// whitespace and non-empty tokens are counted. The policy is uniform across
/// scripts; it undercounts unspaced scripts, which is a documented
/// limitation rather than something this crate compensates for.
pub fn word_count(text: &str) -> usize {
    let clean = TAG_REGEX.replace_all(text.trim(), "");
    clean.split_whitespace().count()
}
