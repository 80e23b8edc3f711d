/*!
 * Conversion between SRT timestamps (`HH:MM:SS,mmm`) and millisecond offsets.
 *
 * Parsing is deliberately forgiving: externally-sourced transcripts routinely
 * carry malformed time lines, and a bad timestamp must never abort the
 * surrounding pipeline. Parse failures yield 0 with a recorded diagnostic.
 */

use crate::diagnostics::DiagnosticSink;

/// Parse an SRT timestamp to milliseconds.
///
/// Any malformed input (wrong separators, non-numeric fields) yields 0 with a
/// diagnostic rather than an error. Minutes or seconds above 59 are diagnosed
/// but the arithmetic still proceeds; hours are unbounded on input.
pub fn parse_timestamp(timestamp: &str, diagnostics: &mut DiagnosticSink) -> u64 {
    let timestamp = timestamp.trim();

    let Some((time_part, ms_part)) = timestamp.split_once(',') else {
        diagnostics.warn(format!(
            "Failed to parse timestamp '{}': missing millisecond separator, using 0",
            timestamp
        ));
        return 0;
    };

    let fields: Vec<&str> = time_part.split(':').collect();
    if fields.len() != 3 {
        diagnostics.warn(format!(
            "Failed to parse timestamp '{}': expected HH:MM:SS,mmm, using 0",
            timestamp
        ));
        return 0;
    }

    let parsed: Option<(u64, u64, u64, u64)> = (|| {
        let hours = fields[0].trim().parse().ok()?;
        let minutes = fields[1].trim().parse().ok()?;
        let seconds = fields[2].trim().parse().ok()?;
        let millis = ms_part.trim().parse().ok()?;
        Some((hours, minutes, seconds, millis))
    })();

    let Some((hours, minutes, seconds, millis)) = parsed else {
        diagnostics.warn(format!(
            "Failed to parse timestamp '{}': non-numeric field, using 0",
            timestamp
        ));
        return 0;
    };

    if minutes > 59 || seconds > 59 || millis > 999 {
        diagnostics.warn(format!(
            "Out-of-range components in timestamp '{}'",
            timestamp
        ));
    }

    (hours * 3600 + minutes * 60 + seconds) * 1000 + millis
}

/// Format a millisecond offset as an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Hours are clamped to 99 (the format's ceiling), so offsets beyond
/// 99:59:59,999 silently truncate. Known limitation, not a crash.
pub fn format_timestamp(total_ms: u64) -> String {
    let millis = total_ms % 1000;
    let total_seconds = total_ms / 1000;

    let hours = (total_seconds / 3600).min(99);
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Format a `start --> end` time-range line
pub fn format_time_range(start_ms: u64, end_ms: u64) -> String {
    format!("{} --> {}", format_timestamp(start_ms), format_timestamp(end_ms))
}

/// Parse a `start --> end` time-range line.
///
/// Returns `None` (the block-level skip signal) when the line does not split
/// on the arrow token; individual timestamp irregularities degrade to 0 as in
/// [`parse_timestamp`].
pub fn parse_time_range(line: &str, diagnostics: &mut DiagnosticSink) -> Option<(u64, u64)> {
    let (start, end) = line.split_once(" --> ")?;
    Some((
        parse_timestamp(start, diagnostics),
        parse_timestamp(end, diagnostics),
    ))
}
