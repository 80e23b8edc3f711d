/*!
 * Parsing and serialization of the blank-line-separated subtitle block format.
 *
 * Each block is an index line, a `start --> end` time line, and one or more
 * text lines. Parsing is tolerant: a block that cannot be understood is
 * skipped entirely, with a diagnostic, and never yields a partial segment.
 */

use crate::diagnostics::DiagnosticSink;
use crate::segment::Segment;
use crate::timecode::{format_time_range, parse_time_range};

/// Parse raw transcript content into segments, in input order.
///
/// A block is skipped (with a recorded warning) when it has fewer than three
/// lines, its index line is not an integer, its time line does not split on
/// the arrow token, or its parsed times do not satisfy `end > start`.
/// A UTF-8 BOM and CR line endings are tolerated.
pub fn parse(content: &str, diagnostics: &mut DiagnosticSink) -> Vec<Segment> {
    let normalized = content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut segments = Vec::new();

    for block in normalized.trim().split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        let lines: Vec<&str> = block.split('\n').collect();
        if lines.len() < 3 {
            diagnostics.warn(format!(
                "Skipping malformed subtitle block (only {} line(s)): '{}'",
                lines.len(),
                lines.first().unwrap_or(&"")
            ));
            continue;
        }

        let Ok(index) = lines[0].trim().parse::<usize>() else {
            diagnostics.warn(format!(
                "Skipping subtitle block with non-numeric index line: '{}'",
                lines[0].trim()
            ));
            continue;
        };

        let Some((start_ms, end_ms)) = parse_time_range(lines[1].trim(), diagnostics) else {
            diagnostics.warn(format!(
                "Skipping subtitle block {}: time line '{}' has no ' --> ' separator",
                index,
                lines[1].trim()
            ));
            continue;
        };

        if end_ms <= start_ms {
            diagnostics.warn(format!(
                "Skipping subtitle block {}: non-positive duration ({}ms >= {}ms)",
                index, start_ms, end_ms
            ));
            continue;
        }

        let text = lines[2..].join("\n").trim().to_string();
        segments.push(Segment::new(index, start_ms, end_ms, text));
    }

    if segments.is_empty() {
        diagnostics.warn("No valid subtitle blocks found in content");
    }

    segments
}

/// Render segments back to the block format.
///
/// Segments are sorted by start time (the canonical order) and renumbered
/// densely from 1. Blocks are blank-line separated with no trailing blank
/// beyond the last block.
pub fn serialize(segments: &[Segment]) -> String {
    let mut ordered: Vec<&Segment> = segments.iter().collect();
    ordered.sort_by_key(|s| s.start_ms);

    let mut out = String::new();
    for (i, segment) in ordered.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        out.push_str(&format!(
            "{}\n{}\n{}",
            i + 1,
            format_time_range(segment.start_ms, segment.end_ms),
            segment.text
        ));
    }

    out
}

/// Sort segments by start time and renumber them densely from 1.
///
/// Applied after every shaping pass so that split children (which inherit
/// their parent's index) fall into place by time, avoiding any fractional
/// index scheme.
pub fn canonicalize(mut segments: Vec<Segment>) -> Vec<Segment> {
    segments.sort_by_key(|s| s.start_ms);
    for (i, segment) in segments.iter_mut().enumerate() {
        segment.index = i + 1;
    }
    segments
}
