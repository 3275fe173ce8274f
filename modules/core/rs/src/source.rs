use std::io;

use crate::loc::{Contig, Interval, Strand};
use crate::num::PrimInt;

/// Read-only view of a single aligned sequencing read, the way the counting
/// pipeline sees it. Coordinates are 1-based with both ends included.
pub trait AlignedRead {
    type Idx: PrimInt;

    /// Leftmost reference position covered by the alignment.
    fn start(&self) -> Self::Idx;

    /// Rightmost reference position covered by the alignment.
    fn end(&self) -> Self::Idx;

    /// Strand of the sequenced fragment, after library-protocol deduction.
    fn strand(&self) -> Strand;

    /// Mapping quality, 255 when missing.
    fn mapq(&self) -> u8;

    /// PCR/optical duplicate flag.
    fn is_duplicate(&self) -> bool;

    /// True when the mate of a paired read is mapped. Single-end reads and
    /// reads with unmapped mates report false.
    fn is_mate_mapped(&self) -> bool;

    /// Query (fragment) name shared by both mates of a pair.
    fn name(&self) -> &[u8];

    /// Number of operations in the CIGAR string.
    fn cigar_ops(&self) -> usize;
}

/// Random-access store of alignments, queryable by genomic window.
///
/// `fetch` must return every alignment whose span shares at least one base
/// with the window. Queries are independent: fetching the same window twice
/// yields the same records, and no state leaks between calls. Counting
/// workers clone the source when running in parallel, hence the `Clone` bound
/// lives on the engine rather than here.
pub trait AlignmentSource {
    type Ctg: Contig;
    type Idx: PrimInt;
    type Read: AlignedRead<Idx = Self::Idx>;
    type Iter<'borrow>: Iterator<Item = io::Result<Self::Read>> + 'borrow
    where
        Self: 'borrow;

    fn fetch(
        &mut self,
        contig: &Self::Ctg,
        interval: &Interval<Self::Idx>,
    ) -> io::Result<Self::Iter<'_>>;
}

impl<T: AlignedRead> AlignedRead for &T {
    type Idx = T::Idx;

    fn start(&self) -> Self::Idx {
        (**self).start()
    }
    fn end(&self) -> Self::Idx {
        (**self).end()
    }
    fn strand(&self) -> Strand {
        (**self).strand()
    }
    fn mapq(&self) -> u8 {
        (**self).mapq()
    }
    fn is_duplicate(&self) -> bool {
        (**self).is_duplicate()
    }
    fn is_mate_mapped(&self) -> bool {
        (**self).is_mate_mapped()
    }
    fn name(&self) -> &[u8] {
        (**self).name()
    }
    fn cigar_ops(&self) -> usize {
        (**self).cigar_ops()
    }
}
