use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use intrex_core_rs::loc::{Interval, IntervalOp, Strand};
use intrex_core_rs::source::AlignedRead;

/// An owned, coordinate-resolved alignment record. Produced by the BAM query
/// layer once per passing record; downstream code never touches the raw BAM
/// encoding.
#[derive(Clone, PartialEq, Eq, Debug, Constructor, Dissolve, Getters)]
pub struct Alignment {
    /// Reference span of the alignment, 1-based, both ends included.
    interval: Interval<u64>,
    /// Fragment strand after library-strandedness deduction.
    strand: Strand,
    mapq: u8,
    duplicate: bool,
    mate_mapped: bool,
    name: Vec<u8>,
    cigar_ops: usize,
}

impl AlignedRead for Alignment {
    type Idx = u64;

    fn start(&self) -> u64 {
        self.interval.start()
    }
    fn end(&self) -> u64 {
        self.interval.end()
    }
    fn strand(&self) -> Strand {
        self.strand
    }
    fn mapq(&self) -> u8 {
        self.mapq
    }
    fn is_duplicate(&self) -> bool {
        self.duplicate
    }
    fn is_mate_mapped(&self) -> bool {
        self.mate_mapped
    }
    fn name(&self) -> &[u8] {
        &self.name
    }
    fn cigar_ops(&self) -> usize {
        self.cigar_ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_read_view() {
        let aln = Alignment::new(
            Interval::new(100, 150).unwrap(),
            Strand::Reverse,
            30,
            false,
            true,
            b"frag-1".to_vec(),
            1,
        );
        assert_eq!(AlignedRead::start(&aln), 100);
        assert_eq!(AlignedRead::end(&aln), 150);
        assert_eq!(AlignedRead::strand(&aln), Strand::Reverse);
        assert_eq!(aln.is_duplicate(), false);
        assert_eq!(aln.is_mate_mapped(), true);
        assert_eq!(AlignedRead::name(&aln), b"frag-1");
        assert_eq!(AlignedRead::cigar_ops(&aln), 1);
    }
}
