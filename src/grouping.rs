/*!
 * Partitioning a transcript into continuity groups.
 *
 * A continuity group is a maximal run of segments whose inter-segment gaps
 * stay at or below a threshold: one continuous utterance spread across
 * multiple caption cards. Redistribution treats each group as a unit.
 */

use crate::segment::Segment;

/// Default maximum gap (ms) for two segments to count as continuous
pub const DEFAULT_MAX_GAP_MS: u64 = 500;

/// Partition ordered segments into maximal continuity groups.
///
/// A single linear scan: a gap strictly greater than `max_gap_ms` between the
/// previous segment's end and the current segment's start breaks the group;
/// a gap equal to the threshold continues it. Overlapping segments (negative
/// gap) always continue the current group.
pub fn group_continuous(segments: &[Segment], max_gap_ms: u64) -> Vec<Vec<Segment>> {
    if segments.is_empty() {
        return Vec::new();
    }

    let mut groups = Vec::new();
    let mut current_group = vec![segments[0].clone()];

    for pair in segments.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let gap_ms = curr.start_ms as i64 - prev.end_ms as i64;

        if gap_ms <= max_gap_ms as i64 {
            current_group.push(curr.clone());
        } else {
            groups.push(std::mem::replace(&mut current_group, vec![curr.clone()]));
        }
    }

    groups.push(current_group);
    groups
}
