/*!
 * The intermediate format exchanged with an external translation collaborator.
 *
 * Outbound, each segment becomes `{index: {"t": "start --> end", "s": text}}`;
 * the collaborator receives only `{index: text}` (timestamps withheld to save
 * payload) and returns `{index: translated_text}` plus `"success"` and
 * `"comment"` sentinel keys. The engine validates that the reply covers every
 * input index with a plain-string value, then re-attaches the original
 * timestamps before any splitting or redistribution happens.
 *
 * An incomplete or malformed reply genuinely blocks reconstruction, so this
 * is the one place in the crate that surfaces typed errors instead of
 * degrading with a diagnostic.
 */

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::DiagnosticSink;
use crate::errors::ExchangeError;
use crate::segment::Segment;
use crate::timecode::format_time_range;
use crate::transcript::canonicalize;

/// Reserved keys in a translation reply that are not segment indices
const SENTINEL_KEYS: &[&str] = &["success", "comment"];

/// One segment in the exchange mapping: time range and text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSegment {
    /// Original `start --> end` time-range string
    pub t: String,
    /// Caption text, flattened to a single line
    pub s: String,
}

/// Build the index-keyed exchange mapping from a transcript
pub fn to_exchange(segments: &[Segment]) -> BTreeMap<String, ExchangeSegment> {
    segments
        .iter()
        .map(|segment| {
            (
                segment.index.to_string(),
                ExchangeSegment {
                    t: format_time_range(segment.start_ms, segment.end_ms),
                    s: segment.flat_text(),
                },
            )
        })
        .collect()
}

/// The timestamp-stripped payload sent to the translation collaborator
pub fn strip_for_translation(
    exchange: &BTreeMap<String, ExchangeSegment>,
) -> BTreeMap<String, String> {
    exchange
        .iter()
        .map(|(index, segment)| (index.clone(), segment.s.clone()))
        .collect()
}

/// Validate a translation reply against the segments that were sent.
///
/// The reply must be a JSON object carrying `"success": true`, and every
/// input index must be present with a plain-string value. On success the
/// translated texts are returned keyed by index; on failure the error names
/// the missing indices or the offending value.
pub fn validate_reply(
    original: &BTreeMap<String, ExchangeSegment>,
    reply: &Value,
) -> Result<BTreeMap<String, String>, ExchangeError> {
    let Some(object) = reply.as_object() else {
        return Err(ExchangeError::NotAnObject);
    };

    if !object.get("success").and_then(Value::as_bool).unwrap_or(false) {
        let comment = object
            .get("comment")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        return Err(ExchangeError::MarkedUnsuccessful { comment });
    }

    let mut missing: Vec<String> = original
        .keys()
        .filter(|index| !object.contains_key(*index))
        .cloned()
        .collect();
    if !missing.is_empty() {
        missing.sort_by_key(|index| index.parse::<usize>().unwrap_or(usize::MAX));
        return Err(ExchangeError::MissingSegments { indices: missing });
    }

    let mut translated = BTreeMap::new();
    for index in original.keys() {
        match object.get(index) {
            Some(Value::String(text)) => {
                translated.insert(index.clone(), text.clone());
            }
            Some(other) => {
                return Err(ExchangeError::WrongValueType {
                    index: index.clone(),
                    found: json_type_name(other).to_string(),
                });
            }
            // Unreachable after the completeness check, but keep the error
            // honest if the two checks ever drift apart.
            None => {
                return Err(ExchangeError::MissingSegments {
                    indices: vec![index.clone()],
                });
            }
        }
    }

    Ok(translated)
}

/// Re-attach original time ranges to validated translated texts
pub fn reattach_timestamps(
    original: &BTreeMap<String, ExchangeSegment>,
    translated: &BTreeMap<String, String>,
) -> BTreeMap<String, ExchangeSegment> {
    original
        .iter()
        .filter(|(index, _)| !SENTINEL_KEYS.contains(&index.as_str()))
        .filter_map(|(index, segment)| {
            translated.get(index).map(|text| {
                (
                    index.clone(),
                    ExchangeSegment {
                        t: segment.t.clone(),
                        s: text.clone(),
                    },
                )
            })
        })
        .collect()
}

/// Convert an exchange mapping back into a transcript.
///
/// Entries with unparseable indices or time ranges are skipped with a
/// diagnostic. The result is in canonical order, renumbered densely.
pub fn exchange_to_segments(
    exchange: &BTreeMap<String, ExchangeSegment>,
    diagnostics: &mut DiagnosticSink,
) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(exchange.len());

    for (key, entry) in exchange {
        if SENTINEL_KEYS.contains(&key.as_str()) {
            continue;
        }

        let Ok(index) = key.parse::<usize>() else {
            diagnostics.warn(format!("Skipping exchange entry with non-numeric index '{}'", key));
            continue;
        };

        let Some((start, end)) = entry.t.split_once(" --> ") else {
            diagnostics.warn(format!(
                "Skipping exchange entry {}: time range '{}' has no ' --> ' separator",
                index, entry.t
            ));
            continue;
        };

        let start_ms = crate::timecode::parse_timestamp(start, diagnostics);
        let end_ms = crate::timecode::parse_timestamp(end, diagnostics);
        if end_ms <= start_ms {
            diagnostics.warn(format!(
                "Skipping exchange entry {}: non-positive duration",
                index
            ));
            continue;
        }

        segments.push(Segment::new(index, start_ms, end_ms, entry.s.clone()));
    }

    canonicalize(segments)
}

/// Human-readable JSON type name for error messages
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
