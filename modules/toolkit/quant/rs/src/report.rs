use std::io;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::Result;
use itertools::Itertools;

use intrex_core_rs::loc::{Interval, IntervalOp, Region};

/// Raw fragment count of one feature plus its normalized rate. The rate is
/// absent when the library total was zero.
#[derive(Clone, Copy, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct FeatureQuant {
    count: u64,
    rate: Option<f64>,
}

/// Quantification of one collapsed repeat run inside an intron.
#[derive(Clone, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct MaskedQuant {
    label: String,
    interval: Interval<u64>,
    quant: FeatureQuant,
}

/// Everything measured for a single intron.
#[derive(Clone, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct IntronQuant {
    region: Region<String, u64>,
    /// Fragments enclosed by the intron.
    fragments: FeatureQuant,
    upstream_exon: FeatureQuant,
    downstream_exon: FeatureQuant,
    repeats: Vec<MaskedQuant>,
    /// Aggregate over all repeat runs, None when the intron has none.
    repeats_total: Option<FeatureQuant>,
    segments: Vec<(Interval<u64>, FeatureQuant)>,
    /// Aggregate over all repeat-free segments, None when there are none.
    segments_total: Option<FeatureQuant>,
}

/// One output row. `intron` is None for transcripts without introns, which
/// are still reported explicitly rather than skipped.
#[derive(Clone, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct IntronRow {
    gene_id: String,
    gene_biotype: String,
    gene_fragments: u64,
    transcript_id: String,
    transcript_biotype: String,
    transcript_fragments: u64,
    intron: Option<IntronQuant>,
}

/// Column order is a compatibility contract: downstream tooling indexes
/// columns by position, so new columns go at the end and nothing is ever
/// reordered.
pub const COLUMNS: [&str; 27] = [
    "gene_id",
    "gene_biotype",
    "gene_fragments",
    "transcript_id",
    "transcript_biotype",
    "transcript_fragments",
    "intron_contig",
    "intron_start",
    "intron_end",
    "intron_strand",
    "intron_fragments",
    "intron_fpkm",
    "upstream_exon_fragments",
    "upstream_exon_fpkm",
    "downstream_exon_fragments",
    "downstream_exon_fpkm",
    "repeat_labels",
    "repeat_coords",
    "repeat_fragments",
    "repeat_fpkms",
    "repeats_total_fragments",
    "repeats_total_fpkm",
    "segment_coords",
    "segment_fragments",
    "segment_fpkms",
    "segments_total_fragments",
    "segments_total_fpkm",
];

/// Placeholder for undefined or empty values. Always emitted literally,
/// never an empty string.
pub const NOT_AVAILABLE: &str = "-";

fn fmt_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.6}", rate),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn fmt_total(total: &Option<FeatureQuant>) -> (String, String) {
    match total {
        Some(quant) => (quant.count.to_string(), fmt_rate(quant.rate)),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    }
}

fn join_or_dash(mut items: impl Iterator<Item = String>) -> String {
    let joined = items.join(",");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

/// Tab-delimited report writer.
pub struct Writer<W> {
    inner: W,
}

impl<W: io::Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_header(&mut self) -> Result<()> {
        writeln!(self.inner, "{}", COLUMNS.join("\t"))?;
        Ok(())
    }

    pub fn write_record(&mut self, row: &IntronRow) -> Result<()> {
        let mut fields: Vec<String> = Vec::with_capacity(COLUMNS.len());
        fields.extend([
            row.gene_id.clone(),
            row.gene_biotype.clone(),
            row.gene_fragments.to_string(),
            row.transcript_id.clone(),
            row.transcript_biotype.clone(),
            row.transcript_fragments.to_string(),
        ]);

        match &row.intron {
            None => {
                fields.resize(COLUMNS.len(), NOT_AVAILABLE.to_string());
            }
            Some(intron) => {
                let interval = intron.region.interval();
                fields.extend([
                    intron.region.contig().clone(),
                    interval.start().to_string(),
                    interval.end().to_string(),
                    intron.region.strand().to_string(),
                    intron.fragments.count.to_string(),
                    fmt_rate(intron.fragments.rate),
                    intron.upstream_exon.count.to_string(),
                    fmt_rate(intron.upstream_exon.rate),
                    intron.downstream_exon.count.to_string(),
                    fmt_rate(intron.downstream_exon.rate),
                ]);

                fields.push(join_or_dash(
                    intron.repeats.iter().map(|x| x.label.clone()),
                ));
                fields.push(join_or_dash(
                    intron.repeats.iter().map(|x| x.interval.to_string()),
                ));
                fields.push(join_or_dash(
                    intron.repeats.iter().map(|x| x.quant.count.to_string()),
                ));
                fields.push(join_or_dash(
                    intron.repeats.iter().map(|x| fmt_rate(x.quant.rate)),
                ));
                let (count, rate) = fmt_total(&intron.repeats_total);
                fields.extend([count, rate]);

                fields.push(join_or_dash(
                    intron.segments.iter().map(|(interval, _)| interval.to_string()),
                ));
                fields.push(join_or_dash(
                    intron.segments.iter().map(|(_, quant)| quant.count.to_string()),
                ));
                fields.push(join_or_dash(
                    intron.segments.iter().map(|(_, quant)| fmt_rate(quant.rate)),
                ));
                let (count, rate) = fmt_total(&intron.segments_total);
                fields.extend([count, rate]);
            }
        }

        debug_assert_eq!(fields.len(), COLUMNS.len());
        writeln!(self.inner, "{}", fields.join("\t"))?;
        Ok(())
    }

    pub fn write_records(&mut self, rows: &[IntronRow]) -> Result<()> {
        for row in rows {
            self.write_record(row)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
