/*!
 * Proportional timing redistribution within continuity groups.
 *
 * Within a group, each segment's duration is made proportional to its word
 * count, subject to a minimum floor and fixed inter-segment gaps. The group's
 * original start and end are preserved exactly: the last segment absorbs
 * whatever time remains. Redistribution never fails: degenerate groups are
 * returned unchanged with a diagnostic.
 */

use log::debug;

use crate::diagnostics::DiagnosticSink;
use crate::grouping::{DEFAULT_MAX_GAP_MS, group_continuous};
use crate::segment::Segment;
use crate::transcript::canonicalize;

/// Default minimum duration (ms) a redistributed segment may receive
pub const DEFAULT_MIN_DURATION_MS: u64 = 1200;

/// Default gap (ms) inserted between redistributed segments
pub const DEFAULT_GAP_MS: u64 = 30;

/// Configuration for timing redistribution
#[derive(Debug, Clone)]
pub struct RetimeConfig {
    /// Maximum gap (ms) for segments to share a continuity group
    pub max_gap_ms: u64,
    /// Minimum duration (ms) per redistributed segment
    pub min_duration_ms: u64,
    /// Fixed gap (ms) between redistributed segments
    pub gap_ms: u64,
}

impl Default for RetimeConfig {
    fn default() -> Self {
        Self {
            max_gap_ms: DEFAULT_MAX_GAP_MS,
            min_duration_ms: DEFAULT_MIN_DURATION_MS,
            gap_ms: DEFAULT_GAP_MS,
        }
    }
}

/// Redistribute timing across a whole transcript.
///
/// Groups continuous segments, redistributes each group of two or more, and
/// returns the transcript in canonical order (sorted by start time, densely
/// renumbered). Size-1 groups pass through untouched.
pub fn redistribute_transcript(
    segments: &[Segment],
    config: &RetimeConfig,
    diagnostics: &mut DiagnosticSink,
) -> Vec<Segment> {
    if segments.is_empty() {
        diagnostics.warn("Nothing to redistribute: empty transcript");
        return Vec::new();
    }

    let groups = group_continuous(segments, config.max_gap_ms);
    debug!(
        "Redistributing timing: {} segments in {} continuity group(s)",
        segments.len(),
        groups.len()
    );

    let mut redistributed = Vec::with_capacity(segments.len());
    for group in groups {
        if group.len() > 1 {
            redistributed.extend(redistribute_group(&group, config, diagnostics));
        } else {
            redistributed.extend(group);
        }
    }

    canonicalize(redistributed)
}

/// Redistribute timing within one continuity group.
///
/// The group's start and end boundaries are preserved exactly; only the
/// internal partition changes. Groups with zero total words or non-positive
/// span are returned unchanged with a diagnostic.
pub fn redistribute_group(
    group: &[Segment],
    config: &RetimeConfig,
    diagnostics: &mut DiagnosticSink,
) -> Vec<Segment> {
    if group.len() <= 1 {
        return group.to_vec();
    }

    let word_counts: Vec<usize> = group.iter().map(|s| s.word_count()).collect();
    let total_words: usize = word_counts.iter().sum();

    if total_words == 0 {
        diagnostics.warn("Group has no words, keeping original timing");
        return group.to_vec();
    }

    let group_start_ms = group[0].start_ms;
    let group_end_ms = group[group.len() - 1].end_ms;
    if group_end_ms <= group_start_ms {
        diagnostics.warn("Group has non-positive duration, keeping original timing");
        return group.to_vec();
    }
    let total_available_ms = group_end_ms - group_start_ms;

    // Reserve time for inter-segment gaps, shrinking the gap when the group
    // is too tight to host the configured one.
    let num_gaps = (group.len() - 1) as u64;
    let mut gap_ms = config.gap_ms;
    let mut content_duration_ms = total_available_ms as i64 - (num_gaps * gap_ms) as i64;

    if content_duration_ms <= 0 {
        gap_ms = (total_available_ms / (group.len() as u64 * 4)).max(10);
        content_duration_ms = total_available_ms as i64 - (num_gaps * gap_ms) as i64;
        if content_duration_ms <= 0 {
            gap_ms = 0;
            content_duration_ms = total_available_ms as i64;
        }
        diagnostics.note(format!(
            "Group too short for configured gaps, shrunk gap to {}ms",
            gap_ms
        ));
    }
    let content_duration_ms = content_duration_ms as u64;

    // When the span cannot host the configured floor for every segment, the
    // floor is scaled down; otherwise boundaries would run past the group end.
    let min_duration_ms = if (group.len() as u64 - 1) * (config.min_duration_ms + gap_ms)
        >= total_available_ms
    {
        let scaled = (content_duration_ms / group.len() as u64).max(1);
        diagnostics.note(format!(
            "Group span {}ms cannot fit {}ms minimum durations, scaling floor to {}ms",
            total_available_ms, config.min_duration_ms, scaled
        ));
        scaled
    } else {
        config.min_duration_ms
    };

    debug!(
        "Redistributing group: {} segments, {} words, {}ms span, {}ms content",
        group.len(),
        total_words,
        total_available_ms,
        content_duration_ms
    );

    let mut redistributed: Vec<Segment> = Vec::with_capacity(group.len());
    let mut current_start_ms = group_start_ms;

    for (i, segment) in group.iter().enumerate() {
        let end_ms = if i == group.len() - 1 {
            // Last segment absorbs the remainder so the group end is exact
            group_end_ms
        } else {
            let proportion = word_counts[i] as f64 / total_words as f64;
            let proportional = (content_duration_ms as f64 * proportion).round() as u64;
            let duration = proportional.max(min_duration_ms);
            let mut end_ms = current_start_ms + duration;

            // Cap so each remaining segment can still get its minimum
            let remaining = (group.len() - i - 1) as u64;
            let reserve = remaining * (min_duration_ms + gap_ms);
            let max_allowed_end = group_end_ms.saturating_sub(reserve);
            if end_ms > max_allowed_end {
                end_ms = max_allowed_end;
            }
            end_ms.max(current_start_ms + min_duration_ms)
        };

        let mut shaped = segment.clone();
        shaped.start_ms = current_start_ms;
        shaped.end_ms = end_ms;
        current_start_ms = shaped.end_ms + gap_ms;
        redistributed.push(shaped);
    }

    // The min-duration floor can push boundaries past each other under
    // extreme word-count skew; repair locally while keeping the span fixed.
    if let Some(last) = redistributed.last_mut() {
        last.end_ms = group_end_ms;
    }
    resolve_overlaps(&mut redistributed, min_duration_ms, gap_ms);

    redistributed
}

/// Push boundaries locally so adjacent segments no longer overlap
fn resolve_overlaps(segments: &mut [Segment], min_duration_ms: u64, gap_ms: u64) {
    for i in 0..segments.len().saturating_sub(1) {
        if segments[i].end_ms >= segments[i + 1].start_ms {
            segments[i].end_ms = segments[i + 1].start_ms.saturating_sub(gap_ms);

            if segments[i].duration_ms() < min_duration_ms {
                segments[i].end_ms = segments[i].start_ms + min_duration_ms;
                if segments[i].end_ms + gap_ms > segments[i + 1].start_ms {
                    segments[i + 1].start_ms = segments[i].end_ms + gap_ms;
                }
            }
        }
    }
}
