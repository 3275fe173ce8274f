use std::io;

use noodles::sam::alignment::record::Cigar as _;
use noodles::sam::alignment::Record as _;
use noodles::{
    bam, bam::io::Reader, bgzf, csi, csi::binning_index::index::reference_sequence::bin::Chunk,
};

use intrex_core_rs::loc::{Interval, IntervalOp};

use super::record::Alignment;
use super::strdeductor::StrDeductor;

/// Iterator over alignments intersecting a single genomic window. Raw records
/// are decoded from the index-selected chunks, filtered by SAM flags and
/// mapping quality, and resolved into owned [`Alignment`] values.
pub struct Query<'a, R> {
    reader: Reader<csi::io::Query<'a, R>>,
    reference_sequence_id: usize,
    interval: Interval<u64>,
    deduce: StrDeductor,
    inflags: u16,
    exflags: u16,
    minmapq: u8,
    buffer: bam::Record,
}

impl<'a, R> Query<'a, R>
where
    R: bgzf::io::BufRead + bgzf::io::Seek,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reader: &'a mut R,
        chunks: Vec<Chunk>,
        reference_sequence_id: usize,
        interval: Interval<u64>,
        deduce: StrDeductor,
        inflags: u16,
        exflags: u16,
        minmapq: u8,
    ) -> Self {
        Self {
            reader: Reader::from(csi::io::Query::new(reader, chunks)),
            reference_sequence_id,
            interval,
            deduce,
            inflags,
            exflags,
            minmapq,
            buffer: bam::Record::default(),
        }
    }

    fn resolve(&self) -> io::Result<Option<Alignment>> {
        let record = &self.buffer;

        let flags: u16 = record.flags().into();
        let mapq = record.mapping_quality().map(|x| x.get()).unwrap_or(255);
        if flags & self.inflags != self.inflags || flags & self.exflags != 0 || mapq < self.minmapq
        {
            return Ok(None);
        }

        let (id, start, end) = match (
            record.reference_sequence_id().transpose()?,
            record.alignment_start().transpose()?,
            record.alignment_end().transpose()?,
        ) {
            (Some(id), Some(start), Some(end)) => (id, start, end),
            _ => return Ok(None),
        };
        if id != self.reference_sequence_id {
            return Ok(None);
        }

        let span = Interval::new(start.get() as u64, end.get() as u64)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if !span.intersects(&self.interval) {
            return Ok(None);
        }

        let flags = record.flags();
        Ok(Some(Alignment::new(
            span,
            (self.deduce)(record),
            mapq,
            flags.is_duplicate(),
            !flags.is_mate_unmapped(),
            record.name().map(|x| x.to_vec()).unwrap_or_default(),
            record.cigar().len(),
        )))
    }
}

impl<R> Iterator for Query<'_, R>
where
    R: bgzf::io::BufRead + bgzf::io::Seek,
{
    type Item = io::Result<Alignment>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => match self.resolve() {
                    Ok(Some(alignment)) => return Some(Ok(alignment)),
                    Ok(None) => continue,
                    Err(e) => return Some(Err(e)),
                },
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
