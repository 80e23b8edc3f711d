/*!
 * Splitting oversized segments at linguistically sound boundaries.
 *
 * The split-point search tries punctuation first (skipping commas embedded in
 * numbers), then a word boundary near the midpoint, then a forced midpoint
 * for extremely long text. A successful split yields two children with
 * word-proportional sub-timing and a small gap between them; an infeasible
 * split leaves the segment intact and oversized.
 *
 * All positions are character positions, not byte offsets, since caption
 * text is arbitrary UTF-8.
 */

use std::fmt;
use log::debug;

use crate::diagnostics::DiagnosticSink;
use crate::segment::{Segment, word_count};
use crate::transcript::canonicalize;

/// Default minimum duration (ms) for each child of a split
pub const DEFAULT_MIN_CHILD_DURATION_MS: u64 = 200;

/// Default gap (ms) inserted between the two children of a split
pub const DEFAULT_CHILD_GAP_MS: u64 = 30;

/// Absolute noise floor (ms): anything shorter is dropped post-split
pub const DEFAULT_NOISE_FLOOR_MS: u64 = 50;

/// Configuration for one splitting pass
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Minimum duration (ms) per split child
    pub min_child_duration_ms: u64,
    /// Gap (ms) between the two children
    pub child_gap_ms: u64,
    /// Absolute duration floor (ms) below which a child is dropped
    pub noise_floor_ms: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            min_child_duration_ms: DEFAULT_MIN_CHILD_DURATION_MS,
            child_gap_ms: DEFAULT_CHILD_GAP_MS,
            noise_floor_ms: DEFAULT_NOISE_FLOOR_MS,
        }
    }
}

/// How a split point was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// The text's single punctuation mark
    SinglePunctuation,
    /// The rightmost punctuation yielding two balanced halves
    MultipleBalanced,
    /// Any punctuation inside the middle 60% (very long text only)
    MultipleAggressive,
    /// The last punctuation mark, as a fallback
    MultipleLastResort,
    /// A space near the text midpoint
    WordBoundary,
    /// The raw character midpoint (very long text only)
    ForcedSplit,
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SplitStrategy::SinglePunctuation => "single_punctuation",
            SplitStrategy::MultipleBalanced => "multiple_balanced",
            SplitStrategy::MultipleAggressive => "multiple_aggressive",
            SplitStrategy::MultipleLastResort => "multiple_last_resort",
            SplitStrategy::WordBoundary => "word_boundary",
            SplitStrategy::ForcedSplit => "forced_split",
        };
        write!(f, "{}", name)
    }
}

/// The two text halves of a viable split, plus how they were found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCandidate {
    /// Text of the first child
    pub first: String,
    /// Text of the second child
    pub second: String,
    /// Strategy that produced the split point
    pub strategy: SplitStrategy,
}

const PUNCTUATION_MARKS: &[char] = &['.', ',', ':', ';', '!', '?', '-'];

/// Run one splitting pass over a transcript.
///
/// Segments whose flattened text exceeds `char_limit` characters (with at
/// least 3 words, or 2 when more than 1.5x over the limit) are divided in
/// two. The result is validated, sorted by start time, and renumbered.
pub fn split_pass(
    segments: &[Segment],
    char_limit: usize,
    config: &SplitConfig,
    diagnostics: &mut DiagnosticSink,
) -> Vec<Segment> {
    let mut shaped: Vec<Segment> = Vec::with_capacity(segments.len());
    let mut splits_made = 0usize;

    for segment in segments {
        match split_segment(segment, char_limit, config, diagnostics) {
            Some((first, second)) => {
                shaped.push(first);
                shaped.push(second);
                splits_made += 1;
            }
            None => shaped.push(segment.clone()),
        }
    }

    let validated = drop_invalid(shaped, config.noise_floor_ms, diagnostics);
    debug!(
        "Split pass (>{} chars): {} -> {} segments ({} splits)",
        char_limit,
        segments.len(),
        validated.len(),
        splits_made
    );

    canonicalize(validated)
}

/// Try to split one segment, returning the two children on success.
///
/// Returns `None` when the segment is not oversized, no viable split point
/// exists, or the segment is too short in time to safely host two children.
fn split_segment(
    segment: &Segment,
    char_limit: usize,
    config: &SplitConfig,
    diagnostics: &mut DiagnosticSink,
) -> Option<(Segment, Segment)> {
    let text = segment.flat_text();
    let chars: Vec<char> = text.chars().collect();
    let char_len = chars.len();
    let words = word_count(&text);

    let is_very_long = char_len as f64 > char_limit as f64 * 1.5;
    let eligible = (char_len > char_limit && words >= 3) || (is_very_long && words >= 2);
    if !eligible {
        return None;
    }

    debug!(
        "Processing oversized segment {} ({} chars, {} words)",
        segment.index, char_len, words
    );

    let candidate = find_split_candidate(&chars, char_limit)?;
    debug!(
        "Split by {}: '{}' | '{}'",
        candidate.strategy, candidate.first, candidate.second
    );

    // A segment too short in time to host two children is left intact
    let total_duration = segment.duration_ms();
    let required_duration = config.min_child_duration_ms * 2 + 100;
    if total_duration < required_duration {
        diagnostics.note(format!(
            "Segment {} too short to split safely ({}ms < {}ms), keeping original",
            segment.index, total_duration, required_duration
        ));
        return None;
    }

    let available = total_duration - config.child_gap_ms;
    if available <= config.min_child_duration_ms * 2 {
        diagnostics.note(format!(
            "Segment {} too short to split with gaps ({}ms), keeping original",
            segment.index, total_duration
        ));
        return None;
    }

    // Word-proportional sub-timing with a minimum floor per child
    let first_words = word_count(&candidate.first) as u64;
    let second_words = word_count(&candidate.second) as u64;
    let total_words = first_words + second_words;

    let first_duration = if total_words > 0 {
        let ideal = (available as f64 * first_words as f64 / total_words as f64).round() as u64;
        let mut first = ideal.max(config.min_child_duration_ms);
        if available - first < config.min_child_duration_ms {
            first = available - config.min_child_duration_ms;
        }
        if first < config.min_child_duration_ms {
            first = available / 2;
        }
        first
    } else {
        (available / 2).max(config.min_child_duration_ms)
    };

    let first_end = segment.start_ms + first_duration;
    let second_start = first_end + config.child_gap_ms;

    if first_end <= segment.start_ms || second_start >= segment.end_ms {
        diagnostics.warn(format!(
            "Segment {}: split timing infeasible, keeping original",
            segment.index
        ));
        return None;
    }

    // Children inherit the parent index; canonical ordering is recovered from
    // start times before renumbering.
    Some((
        Segment::new(segment.index, segment.start_ms, first_end, candidate.first),
        Segment::new(segment.index, second_start, segment.end_ms, candidate.second),
    ))
}

/// Find a split point for a piece of text against a character limit.
///
/// Tried in priority order: punctuation, word boundary, forced midpoint (the
/// latter only for text more than 1.8x over the limit). Returns `None` when
/// no strategy yields two acceptable halves.
pub fn split_candidate(text: &str, char_limit: usize) -> Option<SplitCandidate> {
    let chars: Vec<char> = text.chars().collect();
    find_split_candidate(&chars, char_limit)
}

fn find_split_candidate(chars: &[char], char_limit: usize) -> Option<SplitCandidate> {
    let char_len = chars.len();
    let is_very_long = char_len as f64 > char_limit as f64 * 1.5;
    let min_part_len = if is_very_long { 2 } else { 3 };

    if let Some((pos, strategy)) = find_punctuation_split(chars, char_limit) {
        let first = trimmed(&chars[..=pos]);
        let second = trimmed(&chars[pos + 1..]);
        if first.chars().count() >= min_part_len && second.chars().count() >= min_part_len {
            return Some(SplitCandidate { first, second, strategy });
        }
    }

    if let Some(pos) = find_word_boundary(chars) {
        let first = trimmed(&chars[..pos]);
        let second = trimmed(&chars[pos..]);
        if first.chars().count() >= 3 && second.chars().count() >= 3 {
            return Some(SplitCandidate {
                first,
                second,
                strategy: SplitStrategy::WordBoundary,
            });
        }
    }

    if char_len as f64 > char_limit as f64 * 1.8 {
        let mid = char_len / 2;
        let first = trimmed(&chars[..mid]);
        let second = trimmed(&chars[mid..]);
        if !first.is_empty() && !second.is_empty() {
            return Some(SplitCandidate {
                first,
                second,
                strategy: SplitStrategy::ForcedSplit,
            });
        }
    }

    None
}

/// Scan for the best punctuation split position.
///
/// Commas embedded in numeric literals (digits within 5 characters on both
/// sides) are not candidates. With a single candidate the split is accepted
/// if both halves are long enough (always, for very long text). With several,
/// prefer the rightmost balanced split, then (for very long text) any
/// candidate strictly inside the middle 60%, then the last candidate.
fn find_punctuation_split(chars: &[char], char_limit: usize) -> Option<(usize, SplitStrategy)> {
    let char_len = chars.len();
    let mut positions: Vec<usize> = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        if !PUNCTUATION_MARKS.contains(&c) {
            continue;
        }
        if c == ',' && is_numeric_comma(chars, i) {
            continue;
        }
        positions.push(i);
    }

    if positions.is_empty() {
        return None;
    }

    let is_very_long = char_len as f64 > char_limit as f64 * 1.5;

    if positions.len() == 1 {
        let pos = positions[0];
        let first_len = trimmed(&chars[..=pos]).chars().count();
        let second_len = trimmed(&chars[pos + 1..]).chars().count();
        if is_very_long || (first_len >= 5 && second_len >= 5) {
            return Some((pos, SplitStrategy::SinglePunctuation));
        }
        return None;
    }

    // Rightmost position yielding two balanced halves
    let min_length = if is_very_long { 5 } else { 8 };
    for &pos in positions.iter().rev() {
        let first_len = trimmed(&chars[..=pos]).chars().count();
        let second_len = trimmed(&chars[pos + 1..]).chars().count();
        if first_len >= min_length && second_len >= min_length {
            return Some((pos, SplitStrategy::MultipleBalanced));
        }
    }

    // Very long text: any candidate away from the edges
    if is_very_long {
        for &pos in positions.iter().rev() {
            if pos as f64 > char_len as f64 * 0.2 && (pos as f64) < char_len as f64 * 0.8 {
                let first_len = trimmed(&chars[..=pos]).chars().count();
                let second_len = trimmed(&chars[pos + 1..]).chars().count();
                if first_len >= 3 && second_len >= 3 {
                    return Some((pos, SplitStrategy::MultipleAggressive));
                }
            }
        }
    }

    // Last resort: the final punctuation mark
    let pos = positions[positions.len() - 1];
    let first_len = trimmed(&chars[..=pos]).chars().count();
    let second_len = trimmed(&chars[pos + 1..]).chars().count();
    if first_len >= 3 && second_len >= 3 {
        return Some((pos, SplitStrategy::MultipleLastResort));
    }

    None
}

/// True when the comma at `pos` sits inside a numeric literal like "1,500"
fn is_numeric_comma(chars: &[char], pos: usize) -> bool {
    let before = chars[pos.saturating_sub(5)..pos]
        .iter()
        .any(|c| c.is_ascii_digit());
    let after = chars[pos + 1..(pos + 6).min(chars.len())]
        .iter()
        .any(|c| c.is_ascii_digit());
    before && after
}

/// Find a space near the text midpoint.
///
/// Searches outward from the center within a 20%-of-length window first, then
/// accepts any space inside the middle 60% of the text.
fn find_word_boundary(chars: &[char]) -> Option<usize> {
    let char_len = chars.len();
    if char_len < 3 {
        return None;
    }

    let target = char_len / 2;
    let search_range = ((char_len as f64 * 0.2) as usize).max(10);

    for offset in 0..search_range {
        for pos in [target.checked_sub(offset), Some(target + offset)].into_iter().flatten() {
            if pos > 0 && pos < char_len - 1 && chars[pos] == ' ' {
                return Some(pos);
            }
        }
    }

    chars.iter().enumerate().position(|(i, &c)| {
        c == ' ' && i as f64 > char_len as f64 * 0.2 && (i as f64) < char_len as f64 * 0.8
    })
}

/// Drop segments with trivial text, inverted timing, or sub-noise duration
fn drop_invalid(
    segments: Vec<Segment>,
    noise_floor_ms: u64,
    diagnostics: &mut DiagnosticSink,
) -> Vec<Segment> {
    segments
        .into_iter()
        .filter(|segment| {
            let text = segment.text.trim();
            if text.chars().count() < 2 {
                diagnostics.warn(format!("Dropping trivial segment: '{}'", text));
                return false;
            }
            if segment.start_ms >= segment.end_ms {
                diagnostics.warn(format!(
                    "Dropping segment with invalid timing: {}ms >= {}ms",
                    segment.start_ms, segment.end_ms
                ));
                return false;
            }
            if segment.duration_ms() < noise_floor_ms {
                diagnostics.warn(format!(
                    "Dropping extremely short segment ({}ms)",
                    segment.duration_ms()
                ));
                return false;
            }
            true
        })
        .collect()
}

/// Trim a character slice into an owned string
fn trimmed(chars: &[char]) -> String {
    chars.iter().collect::<String>().trim().to_string()
}
