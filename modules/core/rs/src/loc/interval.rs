use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

use derive_getters::Dissolve;
use impl_tools::autoimpl;
use num::One;

use crate::error::InvariantViolation;
use crate::num::PrimInt;

/// Interval is a 1-based genomic region with both ends included: [start, end].
/// A dedicated type rather than a Rust-native range because:
/// - Closed coordinates make a single-base interval (start == end) a valid value
///   and start > end unrepresentable after construction.
/// - Custom methods (contains, intersects, adjacency) follow closed-coordinate
///   arithmetic, where the length is end - start + 1 and two intervals separated
///   by a gap of zero bases are adjacent, not overlapping.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Dissolve)]
pub struct Interval<Idx: PrimInt> {
    start: Idx,
    end: Idx,
}

/// Trait for types that can be viewed as closed genomic intervals [start, end].
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>, Arc<T>)]
#[allow(clippy::len_without_is_empty)]
pub trait IntervalOp {
    type Idx: PrimInt;

    /// First position covered by the interval-like object.
    fn start(&self) -> Self::Idx;

    /// Last position covered by the interval-like object.
    fn end(&self) -> Self::Idx;

    /// Number of bases covered, end - start + 1. Never zero.
    fn len(&self) -> Self::Idx {
        self.end() - self.start() + Self::Idx::one()
    }

    /// Check if the interval-like object covers a given position.
    fn contains(&self, pos: Self::Idx) -> bool {
        self.start() <= pos && pos <= self.end()
    }

    /// Check if the interval-like object shares at least one base with another one.
    fn intersects(&self, other: &Self) -> bool {
        self.start() <= other.end() && other.start() <= self.end()
    }

    /// Check if the interval-like object ends exactly one base before another
    /// starts (or vice versa). Overlapping intervals are not adjacent.
    fn adjacent(&self, other: &Self) -> bool {
        self.end() + Self::Idx::one() == other.start()
            || other.end() + Self::Idx::one() == self.start()
    }

    /// Check if another interval-like object lies fully within this one.
    fn encloses(&self, other: &Self) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// Turn the interval-like object into a basic closed genomic interval.
    fn as_interval(&self) -> Interval<Self::Idx> {
        Interval {
            start: self.start(),
            end: self.end(),
        }
    }
}

impl<T: PrimInt> IntervalOp for Interval<T> {
    type Idx = T;

    #[inline(always)]
    fn start(&self) -> Self::Idx {
        self.start
    }
    #[inline(always)]
    fn end(&self) -> Self::Idx {
        self.end
    }
}

impl<Idx: PrimInt> Interval<Idx> {
    pub fn new(start: Idx, end: Idx) -> Result<Self, InvariantViolation> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(InvariantViolation::new(format!(
                "malformed interval: start {:?} > end {:?}",
                start, end
            )))
        }
    }

    /// Bases shared with another interval, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Number of bases shared with another interval.
    pub fn intersection_length(&self, other: &Self) -> Idx {
        match self.intersection(other) {
            Some(common) => common.len(),
            None => Idx::zero(),
        }
    }

    /// The part of the interval that lies inside `inside`, if any.
    pub fn clamped(&self, inside: &Self) -> Option<Self> {
        self.intersection(inside)
    }

    /// Smallest interval covering both operands. Defined only for intervals
    /// that overlap or sit next to each other without a gap.
    pub fn union(&self, other: &Self) -> Option<Self> {
        if self.intersects(other) || self.adjacent(other) {
            Some(Self {
                start: self.start.min(other.start),
                end: self.end.max(other.end),
            })
        } else {
            None
        }
    }

    pub fn cast<T: PrimInt>(&self) -> Option<Interval<T>> {
        match (T::from(self.start), T::from(self.end)) {
            (Some(start), Some(end)) => Some(Interval { start, end }),
            _ => None,
        }
    }
}

impl<Idx: PrimInt> Default for Interval<Idx> {
    fn default() -> Self {
        Self {
            start: Idx::one(),
            end: Idx::one(),
        }
    }
}

impl<Idx: PrimInt + Display> Display for Interval<Idx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl<Idx: PrimInt> TryFrom<(Idx, Idx)> for Interval<Idx> {
    type Error = InvariantViolation;

    fn try_from(value: (Idx, Idx)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

impl<Idx: PrimInt> From<Interval<Idx>> for (Idx, Idx) {
    fn from(interval: Interval<Idx>) -> Self {
        (interval.start, interval.end)
    }
}

impl<Idx: PrimInt> PartialEq<(Idx, Idx)> for Interval<Idx> {
    fn eq(&self, other: &(Idx, Idx)) -> bool {
        self.start == other.0 && self.end == other.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct() {
        assert_eq!(
            Interval::new(1, 10).unwrap(),
            Interval { start: 1, end: 10 }
        );
        // A single base is a valid closed interval
        assert_eq!(Interval::new(5, 5).unwrap(), Interval { start: 5, end: 5 });
        assert!(Interval::new(10, 1).is_err());
    }

    #[test]
    fn test_len() {
        assert_eq!(Interval::new(1, 10).unwrap().len(), 10);
        assert_eq!(Interval::new(100, 200).unwrap().len(), 101);
        assert_eq!(Interval::new(7, 7).unwrap().len(), 1);
    }

    #[test]
    fn test_contains() {
        let interval = Interval::new(1, 10).unwrap();
        assert_eq!(interval.contains(0), false);
        assert_eq!(interval.contains(1), true);
        assert_eq!(interval.contains(5), true);
        assert_eq!(interval.contains(10), true);
        assert_eq!(interval.contains(11), false);
    }

    #[test]
    fn test_intersects() {
        let interval = Interval::new(5, 10).unwrap();
        assert_eq!(interval.intersects(&Interval::new(1, 4).unwrap()), false);
        assert_eq!(interval.intersects(&Interval::new(1, 5).unwrap()), true);
        assert_eq!(interval.intersects(&Interval::new(10, 12).unwrap()), true);
        assert_eq!(interval.intersects(&Interval::new(11, 12).unwrap()), false);
    }

    #[test]
    fn test_adjacent() {
        let interval = Interval::new(5, 10).unwrap();
        assert_eq!(interval.adjacent(&Interval::new(1, 4).unwrap()), true);
        assert_eq!(interval.adjacent(&Interval::new(11, 20).unwrap()), true);
        assert_eq!(interval.adjacent(&Interval::new(1, 5).unwrap()), false);
        assert_eq!(interval.adjacent(&Interval::new(1, 3).unwrap()), false);
        assert_eq!(interval.adjacent(&Interval::new(12, 20).unwrap()), false);
    }

    #[test]
    fn test_encloses() {
        let interval = Interval::new(100, 200).unwrap();
        assert_eq!(interval.encloses(&Interval::new(100, 200).unwrap()), true);
        assert_eq!(interval.encloses(&Interval::new(150, 175).unwrap()), true);
        assert_eq!(interval.encloses(&Interval::new(99, 150).unwrap()), false);
        assert_eq!(interval.encloses(&Interval::new(150, 201).unwrap()), false);
    }

    #[test]
    fn test_intersection() {
        let interval = Interval::new(5, 10).unwrap();
        assert_eq!(interval.intersection(&Interval::new(1, 4).unwrap()), None);
        assert_eq!(
            interval.intersection(&Interval::new(1, 5).unwrap()),
            Some(Interval { start: 5, end: 5 })
        );
        assert_eq!(
            interval.intersection(&Interval::new(7, 20).unwrap()),
            Some(Interval { start: 7, end: 10 })
        );
        assert_eq!(interval.intersection_length(&Interval::new(7, 20).unwrap()), 4);
        assert_eq!(interval.intersection_length(&Interval::new(11, 20).unwrap()), 0);
    }

    #[test]
    fn test_union() {
        let interval = Interval::new(5, 10).unwrap();
        assert_eq!(
            interval.union(&Interval::new(8, 15).unwrap()),
            Some(Interval { start: 5, end: 15 })
        );
        // Zero-gap neighbors merge
        assert_eq!(
            interval.union(&Interval::new(11, 15).unwrap()),
            Some(Interval { start: 5, end: 15 })
        );
        assert_eq!(interval.union(&Interval::new(12, 15).unwrap()), None);
    }

    #[test]
    fn test_cast() {
        let interval = Interval::<i64>::new(1, 10).unwrap();
        assert_eq!(interval.cast::<u32>(), Some(Interval::new(1u32, 10).unwrap()));
        let negative = Interval::<i64>::new(-5, 10).unwrap();
        assert_eq!(negative.cast::<u32>(), None);
    }
}
