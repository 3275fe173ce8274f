use noodles::bam::Record;

use intrex_core_rs::loc::Strand;

/// Deduce the strand of the sequenced fragment from a single BAM record.
/// Which function applies depends on the library protocol; the reader is
/// configured with one of them at construction time.
pub type StrDeductor = fn(&Record) -> Strand;

pub mod deduce {
    use super::*;

    pub mod se {
        use super::*;

        #[inline(always)]
        pub fn forward(record: &Record) -> Strand {
            if record.flags().is_reverse_complemented() {
                Strand::Reverse
            } else {
                Strand::Forward
            }
        }

        #[inline(always)]
        pub fn reverse(record: &Record) -> Strand {
            forward(record).flipped()
        }
    }

    pub mod pe {
        use super::*;

        #[inline(always)]
        pub fn forward(record: &Record) -> Strand {
            let flags = record.flags();
            match (flags.is_first_segment(), flags.is_reverse_complemented()) {
                (true, false) | (false, true) => Strand::Forward,
                (true, true) | (false, false) => Strand::Reverse,
            }
        }

        #[inline(always)]
        pub fn reverse(record: &Record) -> Strand {
            forward(record).flipped()
        }
    }
}
