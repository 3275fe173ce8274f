use derive_getters::{Dissolve, Getters};
use eyre::Result;

use intrex_core_rs::loc::{Contig, Interval, IntervalOp, Region, Strand};
use intrex_core_rs::num::PrimInt;
use intrex_core_rs::InvariantViolation;

/// A gene with the transcripts selected for quantification. Identifiers and
/// biotypes are carried through to the output rows and never interpreted.
#[derive(Clone, PartialEq, Eq, Debug, Dissolve, Getters)]
pub struct Gene<Ctg: Contig, Idx: PrimInt> {
    id: String,
    biotype: String,
    region: Region<Ctg, Idx>,
    transcripts: Vec<Transcript<Ctg, Idx>>,
}

impl<Ctg: Contig, Idx: PrimInt> Gene<Ctg, Idx> {
    pub fn new(
        id: String,
        biotype: String,
        region: Region<Ctg, Idx>,
        transcripts: Vec<Transcript<Ctg, Idx>>,
    ) -> Result<Self> {
        if id.is_empty() {
            return Err(InvariantViolation::new("gene without an identifier").into());
        }
        for transcript in &transcripts {
            if transcript.region().contig() != region.contig()
                || transcript.region().strand() != region.strand()
            {
                return Err(InvariantViolation::new(format!(
                    "transcript {} does not match the contig/strand of gene {}",
                    transcript.id(),
                    id
                ))
                .into());
            }
        }
        Ok(Self {
            id,
            biotype,
            region,
            transcripts,
        })
    }
}

/// A transcript with its exons in genomic order. Exons must not overlap;
/// bookended exons are allowed and simply produce no intron between them.
#[derive(Clone, PartialEq, Eq, Debug, Dissolve, Getters)]
pub struct Transcript<Ctg: Contig, Idx: PrimInt> {
    id: String,
    biotype: String,
    region: Region<Ctg, Idx>,
    exons: Vec<Interval<Idx>>,
}

impl<Ctg: Contig, Idx: PrimInt> Transcript<Ctg, Idx> {
    pub fn new(
        id: String,
        biotype: String,
        region: Region<Ctg, Idx>,
        mut exons: Vec<Interval<Idx>>,
    ) -> Result<Self> {
        if id.is_empty() {
            return Err(InvariantViolation::new("transcript without an identifier").into());
        }

        exons.sort();
        for exon in &exons {
            if !region.interval().encloses(exon) {
                return Err(InvariantViolation::new(format!(
                    "exon {:?} of transcript {} escapes the transcript span",
                    exon, id
                ))
                .into());
            }
        }
        for pair in exons.windows(2) {
            if pair[1].start() <= pair[0].end() {
                return Err(InvariantViolation::new(format!(
                    "overlapping exons {:?} and {:?} in transcript {}",
                    pair[0], pair[1], id
                ))
                .into());
            }
        }

        Ok(Self {
            id,
            biotype,
            region,
            exons,
        })
    }

    /// Introns of the transcript in genomic order: the gaps between
    /// consecutive exons, each paired with the exons flanking it.
    pub fn introns(&self) -> Vec<Intron<Idx>> {
        self.exons
            .windows(2)
            .filter_map(|pair| {
                let (left, right) = (pair[0], pair[1]);
                if left.adjacent(&right) {
                    // Bookended exons leave no intronic base between them
                    return None;
                }
                let interval =
                    Interval::new(left.end() + Idx::one(), right.start() - Idx::one()).unwrap();
                Some(Intron {
                    interval,
                    left_exon: left,
                    right_exon: right,
                })
            })
            .collect()
    }
}

/// One intron with its flanking exons, in genomic (not transcriptional)
/// order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Dissolve, Getters)]
pub struct Intron<Idx: PrimInt> {
    interval: Interval<Idx>,
    left_exon: Interval<Idx>,
    right_exon: Interval<Idx>,
}

impl<Idx: PrimInt> Intron<Idx> {
    /// Flanking exons as (upstream, downstream) in transcription order.
    pub fn flanks(&self, strand: Strand) -> (Interval<Idx>, Interval<Idx>) {
        match strand {
            Strand::Forward => (self.left_exon, self.right_exon),
            Strand::Reverse => (self.right_exon, self.left_exon),
        }
    }
}
