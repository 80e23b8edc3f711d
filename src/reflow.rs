/*!
 * Re-flowing an original-language word stream onto shaped segment boundaries.
 *
 * Splitting runs on the translated transcript only, so the original-language
 * transcript can end up with a different segmentation. This pass spreads the
 * original's words, in order, across the shaped transcript's boundaries so
 * both sides line up card for card. Total word count and word order are
 * preserved; rounding leftovers go to the final segment.
 */

use log::debug;

use crate::diagnostics::DiagnosticSink;
use crate::segment::Segment;

/// Spread the words of `original` across the boundaries of `shaped`.
///
/// Segment *i* of the result carries words `[round(i*avg), round((i+1)*avg))`
/// of the original stream, where `avg = total_words / segment_count`. When
/// either side is empty the shaped transcript is returned unchanged with a
/// diagnostic. Applying the pass twice over the same boundaries yields the
/// same result.
pub fn redistribute_source_text(
    original: &[Segment],
    shaped: &[Segment],
    diagnostics: &mut DiagnosticSink,
) -> Vec<Segment> {
    let words: Vec<&str> = original
        .iter()
        .flat_map(|s| s.text.split_whitespace())
        .collect();

    if words.is_empty() || shaped.is_empty() {
        diagnostics.warn("No content to redistribute, returning shaped transcript unchanged");
        return shaped.to_vec();
    }

    let total_segments = shaped.len();
    let avg_words = words.len() as f64 / total_segments as f64;
    debug!(
        "Redistributing {} words across {} segments (~{:.1} words/segment)",
        words.len(),
        total_segments,
        avg_words
    );

    let mut result: Vec<Segment> = Vec::with_capacity(total_segments);
    let mut word_index = 0usize;

    for (i, segment) in shaped.iter().enumerate() {
        let expected_end = (((i + 1) as f64) * avg_words).round() as usize;
        let expected_end = expected_end.min(words.len());

        let slice = &words[word_index.min(expected_end)..expected_end];
        let mut text = slice.join(" ");

        // Never emit an empty card while words remain
        if text.is_empty() && word_index < words.len() {
            text = words[word_index].to_string();
            word_index += 1;
        } else {
            word_index = expected_end;
        }

        if !text.is_empty() {
            result.push(Segment::new(
                segment.index,
                segment.start_ms,
                segment.end_ms,
                text,
            ));
        }
    }

    // Rounding remainder is appended to the final segment
    if word_index < words.len() {
        let remaining = words[word_index..].join(" ");
        if let Some(last) = result.last_mut() {
            last.text.push(' ');
            last.text.push_str(&remaining);
        } else if let Some(last_shaped) = shaped.last() {
            result.push(Segment::new(
                last_shaped.index,
                last_shaped.start_ms,
                last_shaped.end_ms,
                remaining,
            ));
        }
    }

    result
}
