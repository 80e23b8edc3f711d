/*!
 * Tests for the translation exchange format and reply validation
 */

use serde_json::json;

use subshape::diagnostics::DiagnosticSink;
use subshape::errors::ExchangeError;
use subshape::exchange::{
    exchange_to_segments, reattach_timestamps, strip_for_translation, to_exchange, validate_reply,
};
use crate::common::seg;

fn sample_segments() -> Vec<subshape::Segment> {
    vec![
        seg(1, 1000, 2500, "Good evening and welcome."),
        seg(2, 2600, 4000, "Tonight we look\nat the harvest."),
        seg(3, 4100, 6000, "Farmers are worried."),
    ]
}

#[test]
fn test_toExchange_shouldKeyByIndexWithTimeRangeAndFlatText() {
    let exchange = to_exchange(&sample_segments());

    assert_eq!(exchange.len(), 3);
    let entry = &exchange["2"];
    assert_eq!(entry.t, "00:00:02,600 --> 00:00:04,000");
    assert_eq!(entry.s, "Tonight we look at the harvest.");
}

#[test]
fn test_stripForTranslation_shouldDropTimestamps() {
    let exchange = to_exchange(&sample_segments());
    let payload = strip_for_translation(&exchange);

    assert_eq!(payload.len(), 3);
    assert_eq!(payload["1"], "Good evening and welcome.");
    assert!(!payload.values().any(|v| v.contains("-->")));
}

#[test]
fn test_validateReply_withCompleteReply_shouldReturnTranslations() {
    let exchange = to_exchange(&sample_segments());
    let reply = json!({
        "success": true,
        "comment": "done",
        "1": "Bonsoir et bienvenue.",
        "2": "Ce soir, la moisson.",
        "3": "Les fermiers s'inquiètent."
    });

    let translated = validate_reply(&exchange, &reply).unwrap();
    assert_eq!(translated.len(), 3);
    assert_eq!(translated["1"], "Bonsoir et bienvenue.");
}

#[test]
fn test_validateReply_withMissingIndex_shouldNameItInError() {
    // Scenario D: the reply covers 1 and 3 but not 2
    let exchange = to_exchange(&sample_segments());
    let reply = json!({
        "success": true,
        "1": "Un.",
        "3": "Trois."
    });

    let err = validate_reply(&exchange, &reply).unwrap_err();
    match &err {
        ExchangeError::MissingSegments { indices } => {
            assert_eq!(indices, &vec!["2".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains('2'));
}

#[test]
fn test_validateReply_withNonStringValue_shouldNameIndexAndType() {
    let exchange = to_exchange(&sample_segments());
    let reply = json!({
        "success": true,
        "1": "Un.",
        "2": 42,
        "3": "Trois."
    });

    let err = validate_reply(&exchange, &reply).unwrap_err();
    match err {
        ExchangeError::WrongValueType { index, found } => {
            assert_eq!(index, "2");
            assert_eq!(found, "number");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_validateReply_withUnsuccessfulFlag_shouldSurfaceComment() {
    let exchange = to_exchange(&sample_segments());
    let reply = json!({
        "success": false,
        "comment": "source text unusable"
    });

    let err = validate_reply(&exchange, &reply).unwrap_err();
    match err {
        ExchangeError::MarkedUnsuccessful { comment } => {
            assert_eq!(comment, "source text unusable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_validateReply_withMissingSuccessKey_shouldBeUnsuccessful() {
    let exchange = to_exchange(&sample_segments());
    let reply = json!({ "1": "a", "2": "b", "3": "c" });

    assert!(matches!(
        validate_reply(&exchange, &reply),
        Err(ExchangeError::MarkedUnsuccessful { .. })
    ));
}

#[test]
fn test_validateReply_withNonObjectReply_shouldFail() {
    let exchange = to_exchange(&sample_segments());
    assert!(matches!(
        validate_reply(&exchange, &json!(["not", "an", "object"])),
        Err(ExchangeError::NotAnObject)
    ));
}

#[test]
fn test_reattachTimestamps_shouldPairTranslationsWithOriginalRanges() {
    let exchange = to_exchange(&sample_segments());
    let reply = json!({
        "success": true,
        "1": "Un.",
        "2": "Deux.",
        "3": "Trois."
    });

    let translated = validate_reply(&exchange, &reply).unwrap();
    let reattached = reattach_timestamps(&exchange, &translated);

    assert_eq!(reattached.len(), 3);
    assert_eq!(reattached["1"].t, "00:00:01,000 --> 00:00:02,500");
    assert_eq!(reattached["1"].s, "Un.");
}

#[test]
fn test_exchangeToSegments_shouldRecoverOriginalTiming() {
    let segments = sample_segments();
    let exchange = to_exchange(&segments);

    let mut sink = DiagnosticSink::new();
    let recovered = exchange_to_segments(&exchange, &mut sink);

    assert_eq!(recovered.len(), 3);
    assert_eq!(recovered[0].start_ms, 1000);
    assert_eq!(recovered[0].end_ms, 2500);
    assert_eq!(recovered[2].text, "Farmers are worried.");
    assert!(sink.is_empty());
}

#[test]
fn test_exchangeToSegments_withBadEntries_shouldSkipThemWithDiagnostics() {
    let mut exchange = to_exchange(&sample_segments());
    exchange.insert(
        "not-a-number".to_string(),
        subshape::exchange::ExchangeSegment {
            t: "00:00:07,000 --> 00:00:08,000".to_string(),
            s: "Skipped.".to_string(),
        },
    );
    exchange.insert(
        "9".to_string(),
        subshape::exchange::ExchangeSegment {
            t: "no separator here".to_string(),
            s: "Also skipped.".to_string(),
        },
    );

    let mut sink = DiagnosticSink::new();
    let recovered = exchange_to_segments(&exchange, &mut sink);

    assert_eq!(recovered.len(), 3);
    assert_eq!(sink.warning_count(), 2);
}
