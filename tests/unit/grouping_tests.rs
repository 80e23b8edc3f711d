/*!
 * Tests for continuity grouping
 */

use subshape::grouping::group_continuous;
use crate::common::seg;

#[test]
fn test_groupContinuous_withSmallAndLargeGaps_shouldSplitAtLargeGap() {
    // Scenario B: gap of 100ms continues the group, gap of 900ms breaks it
    let segments = vec![
        seg(1, 0, 1000, "one two"),
        seg(2, 1100, 2000, "three four five six"),
        seg(3, 2900, 4000, "seven eight"),
    ];

    let groups = group_continuous(&segments, 500);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[1].len(), 1);
    assert_eq!(groups[1][0].text, "seven eight");
}

#[test]
fn test_groupContinuous_withGapEqualToThreshold_shouldContinueGroup() {
    // The threshold is inclusive: gap == max_gap_ms continues the group
    let segments = vec![seg(1, 0, 1000, "a"), seg(2, 1500, 2000, "b")];
    let groups = group_continuous(&segments, 500);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_groupContinuous_withGapJustOverThreshold_shouldBreakGroup() {
    let segments = vec![seg(1, 0, 1000, "a"), seg(2, 1501, 2000, "b")];
    let groups = group_continuous(&segments, 500);
    assert_eq!(groups.len(), 2);
}

#[test]
fn test_groupContinuous_withOverlappingSegments_shouldContinueGroup() {
    let segments = vec![seg(1, 0, 1000, "a"), seg(2, 800, 1800, "b")];
    let groups = group_continuous(&segments, 500);
    assert_eq!(groups.len(), 1);
}

#[test]
fn test_groupContinuous_withEmptyInput_shouldReturnNoGroups() {
    let groups = group_continuous(&[], 500);
    assert!(groups.is_empty());
}

#[test]
fn test_groupContinuous_withSingleSegment_shouldReturnOneGroup() {
    let segments = vec![seg(1, 0, 1000, "alone")];
    let groups = group_continuous(&segments, 500);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 1);
}
