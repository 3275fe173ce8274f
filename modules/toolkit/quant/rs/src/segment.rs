use intrex_core_rs::loc::{Interval, IntervalOp};
use intrex_core_rs::num::PrimInt;

use crate::collapse::CollapsedRepeat;

/// Decompose `bound` into the sub-intervals not covered by any collapsed
/// repeat. `repeats` must be the output of [`crate::collapse`] for the same
/// bound: sorted, pairwise non-overlapping and clipped.
///
/// Zero-length pieces are never emitted: a repeat starting right at the
/// cursor produces no segment before it, and a repeat reaching `bound.end`
/// leaves no trailing segment. Consequently the segment lengths and the
/// repeat lengths always add up to the length of `bound`.
pub fn segment<Idx: PrimInt>(
    bound: &Interval<Idx>,
    repeats: &[CollapsedRepeat<Idx>],
) -> Vec<Interval<Idx>> {
    let mut segments = Vec::with_capacity(repeats.len() + 1);

    let mut cursor = bound.start();
    for repeat in repeats {
        let covered = repeat.interval();
        if covered.start() > cursor {
            segments.push(Interval::new(cursor, covered.start() - Idx::one()).unwrap());
        }
        cursor = covered.end() + Idx::one();
    }
    if cursor <= bound.end() {
        segments.push(Interval::new(cursor, bound.end()).unwrap());
    }

    segments
}
