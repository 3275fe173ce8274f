use derive_getters::Getters;

use intrex_core_rs::loc::Strand;
use intrex_core_rs::source::AlignedRead;

/// Predicate pipeline applied to every candidate alignment before counting:
/// duplicates, sub-threshold mapping quality, strand mismatches and (when
/// requested) gapped or clipped alignments are rejected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Getters)]
pub struct FragmentFilter {
    /// Strand a read must be on to be counted.
    strand: Strand,
    /// Minimum mapping quality, inclusive.
    min_mapq: u8,
    /// When set, only alignments encoded as a single CIGAR operation pass.
    perfect_only: bool,
}

impl FragmentFilter {
    pub const DEFAULT_MIN_MAPQ: u8 = 10;

    pub fn new(strand: Strand) -> Self {
        Self {
            strand,
            min_mapq: Self::DEFAULT_MIN_MAPQ,
            perfect_only: false,
        }
    }

    pub fn with_min_mapq(mut self, min_mapq: u8) -> Self {
        self.min_mapq = min_mapq;
        self
    }

    pub fn with_perfect_only(mut self, perfect_only: bool) -> Self {
        self.perfect_only = perfect_only;
        self
    }

    pub fn admits<R: AlignedRead>(&self, read: &R) -> bool {
        // Flag and quality checks are the cheapest, run them first
        if read.is_duplicate() || read.mapq() < self.min_mapq {
            return false;
        }
        if read.strand() != self.strand {
            return false;
        }
        !(self.perfect_only && read.cigar_ops() > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRead {
        strand: Strand,
        mapq: u8,
        duplicate: bool,
        cigar_ops: usize,
    }

    impl Default for TestRead {
        fn default() -> Self {
            Self {
                strand: Strand::Forward,
                mapq: 60,
                duplicate: false,
                cigar_ops: 1,
            }
        }
    }

    impl AlignedRead for TestRead {
        type Idx = u64;

        fn start(&self) -> u64 {
            1
        }
        fn end(&self) -> u64 {
            100
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
            true
        }
        fn name(&self) -> &[u8] {
            b"read"
        }
        fn cigar_ops(&self) -> usize {
            self.cigar_ops
        }
    }

    #[test]
    fn test_defaults_admit_clean_read() {
        let filter = FragmentFilter::new(Strand::Forward);
        assert!(filter.admits(&TestRead::default()));
    }

    #[test]
    fn test_duplicate_rejected() {
        let filter = FragmentFilter::new(Strand::Forward);
        assert!(!filter.admits(&TestRead {
            duplicate: true,
            ..TestRead::default()
        }));
    }

    #[test]
    fn test_mapq_threshold() {
        let filter = FragmentFilter::new(Strand::Forward);
        assert!(!filter.admits(&TestRead {
            mapq: 9,
            ..TestRead::default()
        }));
        // The threshold is inclusive
        assert!(filter.admits(&TestRead {
            mapq: 10,
            ..TestRead::default()
        }));

        let strict = filter.with_min_mapq(30);
        assert!(!strict.admits(&TestRead {
            mapq: 29,
            ..TestRead::default()
        }));
    }

    #[test]
    fn test_strand_mismatch_rejected() {
        let filter = FragmentFilter::new(Strand::Reverse);
        assert!(!filter.admits(&TestRead::default()));
        assert!(filter.admits(&TestRead {
            strand: Strand::Reverse,
            ..TestRead::default()
        }));
    }

    #[test]
    fn test_perfect_only() {
        let relaxed = FragmentFilter::new(Strand::Forward);
        let strict = relaxed.with_perfect_only(true);

        let gapped = TestRead {
            cigar_ops: 3,
            ..TestRead::default()
        };
        assert!(relaxed.admits(&gapped));
        assert!(!strict.admits(&gapped));
        assert!(strict.admits(&TestRead::default()));
    }
}
