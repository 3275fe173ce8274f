use std::fmt::Display;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use crate::num::PrimInt;

use super::contig::Contig;
use super::interval::{Interval, IntervalOp};
use super::strand::Strand;

/// A stranded genomic region: a contig, a closed interval on it, and a strand.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Dissolve, Constructor, Getters)]
pub struct Region<Ctg: Contig, Idx: PrimInt> {
    contig: Ctg,
    interval: Interval<Idx>,
    strand: Strand,
}

impl<Ctg: Contig, Idx: PrimInt> Region<Ctg, Idx> {
    /// Number of bases covered by the region.
    pub fn len(&self) -> Idx {
        self.interval.len()
    }

    /// A region on the same contig and strand with a different interval.
    pub fn with_interval(&self, interval: Interval<Idx>) -> Self {
        Self {
            contig: self.contig.clone(),
            interval,
            strand: self.strand,
        }
    }
}

impl<Ctg: Contig + Display, Idx: PrimInt + Display> Display for Region<Ctg, Idx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}[{}]",
            self.contig,
            self.interval.start(),
            self.interval.end(),
            self.strand
        )
    }
}

impl<Ctg: Contig, Idx: PrimInt> From<(Ctg, Interval<Idx>, Strand)> for Region<Ctg, Idx> {
    fn from((contig, interval, strand): (Ctg, Interval<Idx>, Strand)) -> Self {
        Self {
            contig,
            interval,
            strand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len() {
        let region = Region::new(
            "chr1".to_string(),
            Interval::new(100u64, 200).unwrap(),
            Strand::Forward,
        );
        assert_eq!(region.len(), 101);
    }

    #[test]
    fn test_display() {
        let region = Region::new(
            "chrX".to_string(),
            Interval::new(5u64, 10).unwrap(),
            Strand::Reverse,
        );
        assert_eq!(format!("{}", region), "chrX:5-10[-]");
    }

    #[test]
    fn test_with_interval() {
        let region = Region::new(
            "chr2".to_string(),
            Interval::new(1u64, 50).unwrap(),
            Strand::Forward,
        );
        let clipped = region.with_interval(Interval::new(10, 20).unwrap());
        assert_eq!(clipped.contig(), "chr2");
        assert_eq!(*clipped.interval(), (10, 20));
        assert_eq!(*clipped.strand(), Strand::Forward);
    }
}
