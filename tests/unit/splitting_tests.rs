/*!
 * Tests for oversized-segment splitting
 */

use subshape::diagnostics::DiagnosticSink;
use subshape::segment::word_count;
use subshape::splitting::{SplitConfig, SplitStrategy, split_candidate, split_pass};
use crate::common::seg;

#[test]
fn test_splitPass_withOversizedSegment_shouldSplitAtPunctuation() {
    // Scenario A: 41 chars against a 20-char limit splits at the period,
    // with word-proportional sub-timing and a 30ms gap between children
    let segments = vec![seg(1, 0, 4000, "Hello there. How are you today my friend?")];

    let mut sink = DiagnosticSink::new();
    let shaped = split_pass(&segments, 20, &SplitConfig::default(), &mut sink);

    assert_eq!(shaped.len(), 2);
    assert_eq!(shaped[0].text, "Hello there.");
    assert_eq!(shaped[1].text, "How are you today my friend?");

    // 3970ms of content, 2 of 8 words in the first half
    assert_eq!(shaped[0].start_ms, 0);
    assert_eq!(shaped[0].end_ms, 993);
    assert_eq!(shaped[1].start_ms, 1023);
    assert_eq!(shaped[1].end_ms, 4000);
    assert_eq!(shaped[0].index, 1);
    assert_eq!(shaped[1].index, 2);
}

#[test]
fn test_splitPass_withSegmentUnderLimit_shouldKeepItUntouched() {
    let segments = vec![seg(1, 0, 2000, "Short enough.")];

    let mut sink = DiagnosticSink::new();
    let shaped = split_pass(&segments, 40, &SplitConfig::default(), &mut sink);

    assert_eq!(shaped.len(), 1);
    assert_eq!(shaped[0].text, "Short enough.");
    assert_eq!(shaped[0].end_ms, 2000);
}

#[test]
fn test_splitPass_withTooShortDuration_shouldKeepOriginal() {
    // 400ms cannot host two children of 200ms plus margin
    let segments = vec![seg(1, 0, 400, "Hello there. How are you today my friend?")];

    let mut sink = DiagnosticSink::new();
    let shaped = split_pass(&segments, 20, &SplitConfig::default(), &mut sink);

    assert_eq!(shaped.len(), 1);
    assert_eq!(shaped[0].text, "Hello there. How are you today my friend?");
}

#[test]
fn test_splitPass_shouldConserveWords() {
    let text = "The harvest was poor this year, and the farmers are asking for help from the capital";
    let segments = vec![seg(1, 0, 6000, text)];

    let mut sink = DiagnosticSink::new();
    let shaped = split_pass(&segments, 40, &SplitConfig::default(), &mut sink);

    assert!(shaped.len() >= 2);
    let total: usize = shaped.iter().map(|s| s.word_count()).sum();
    assert_eq!(total, word_count(text));
}

#[test]
fn test_splitPass_shouldDropTrivialAndInvalidSegments() {
    let segments = vec![
        seg(1, 0, 1000, "a"),
        seg(2, 1100, 1100, "inverted timing here"),
        seg(3, 1200, 1240, "ok!"),
        seg(4, 2000, 3000, "A segment worth keeping."),
    ];

    let mut sink = DiagnosticSink::new();
    let shaped = split_pass(&segments, 60, &SplitConfig::default(), &mut sink);

    assert_eq!(shaped.len(), 1);
    assert_eq!(shaped[0].text, "A segment worth keeping.");
    assert_eq!(shaped[0].index, 1);
    assert_eq!(sink.warning_count(), 3);
}

#[test]
fn test_splitCandidate_withSinglePunctuation_shouldUseSinglePunctuationStrategy() {
    let candidate = split_candidate("Hello everyone. Welcome here", 20).unwrap();

    assert_eq!(candidate.strategy, SplitStrategy::SinglePunctuation);
    assert_eq!(candidate.first, "Hello everyone.");
    assert_eq!(candidate.second, "Welcome here");
}

#[test]
fn test_splitCandidate_withMultiplePunctuation_shouldPreferRightmostBalanced() {
    let candidate = split_candidate("Hello there. How are you today my friend?", 20).unwrap();

    assert_eq!(candidate.strategy, SplitStrategy::MultipleBalanced);
    assert_eq!(candidate.first, "Hello there.");
}

#[test]
fn test_splitCandidate_withNumericComma_shouldNotSplitInsideNumber() {
    // The comma in "1,500" is part of a number, so the split falls back to a
    // word boundary near the midpoint
    let candidate = split_candidate("We sold 1,500 units yesterday afternoon quickly", 30).unwrap();

    assert_eq!(candidate.strategy, SplitStrategy::WordBoundary);
    assert!(candidate.first.contains("1,500"));
}

#[test]
fn test_splitCandidate_withNoBoundariesAndVeryLongText_shouldForceSplit() {
    let text = "x".repeat(50);
    let candidate = split_candidate(&text, 20).unwrap();

    assert_eq!(candidate.strategy, SplitStrategy::ForcedSplit);
    assert_eq!(candidate.first.len(), 25);
    assert_eq!(candidate.second.len(), 25);
}

#[test]
fn test_splitCandidate_withNoBoundariesAndModeratelyLongText_shouldGiveUp() {
    // 30 chars over a 20-char limit is not enough to justify a mid-word cut
    let text = "y".repeat(30);
    assert!(split_candidate(&text, 20).is_none());
}

#[test]
fn test_splitPass_withSingleGiantWord_shouldNeverSplitIt() {
    // One word fails the eligibility word-count check regardless of length
    let text = "z".repeat(80);
    let segments = vec![seg(1, 0, 5000, &text)];

    let mut sink = DiagnosticSink::new();
    let shaped = split_pass(&segments, 20, &SplitConfig::default(), &mut sink);

    assert_eq!(shaped.len(), 1);
    assert_eq!(shaped[0].text, text);
}

#[test]
fn test_splitPass_appliedTwice_shouldReduceBelowCoarseLimit() {
    let text = "First we plant the seeds, then we water them daily, \
                and finally we harvest everything in the autumn months";
    let segments = vec![seg(1, 0, 10_000, text)];

    let mut sink = DiagnosticSink::new();
    let coarse = split_pass(&segments, 60, &SplitConfig::default(), &mut sink);
    let fine = split_pass(&coarse, 40, &SplitConfig::default(), &mut sink);

    assert!(fine.len() > coarse.len() || coarse.len() > 1);
    let indices: Vec<usize> = fine.iter().map(|s| s.index).collect();
    assert_eq!(indices, (1..=fine.len()).collect::<Vec<_>>());
    for window in fine.windows(2) {
        assert!(window[0].start_ms <= window[1].start_ms);
    }
}
