use std::fs::File;
use std::io;
use std::path::PathBuf;

use derive_getters::Getters;
use noodles::core::position::Position;
use noodles::core::region::Region;
use noodles::{bgzf, sam};

use intrex_core_rs::loc::{Interval, IntervalOp};
use intrex_core_rs::source::AlignmentSource;

use super::indexed_reader::IndexedReader;
use super::query::Query;
use super::strdeductor::{deduce, StrDeductor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderBuilder {
    filename: PathBuf,
    inflags: Option<u16>,
    exflags: Option<u16>,
    minmapq: Option<u8>,
    strdeductor: Option<StrDeductor>,
}

impl ReaderBuilder {
    // Unmapped, secondary and supplementary records never represent a
    // countable fragment and are dropped before any downstream filtering
    const DEFAULT_EXFLAGS: u16 = 0x4 | 0x100 | 0x800;

    pub fn new<T: Into<PathBuf>>(filename: T) -> Self {
        Self {
            filename: filename.into(),
            inflags: None,
            exflags: None,
            minmapq: None,
            strdeductor: None,
        }
    }

    pub fn with_inflags(mut self, inflags: u16) -> Self {
        self.inflags = Some(inflags);
        self
    }

    pub fn with_exflags(mut self, exflags: u16) -> Self {
        self.exflags = Some(exflags);
        self
    }

    pub fn with_minmapq(mut self, minmapq: u8) -> Self {
        self.minmapq = Some(minmapq);
        self
    }

    pub fn with_strdeductor(mut self, strdeductor: StrDeductor) -> Self {
        self.strdeductor = Some(strdeductor);
        self
    }

    pub fn build(self) -> io::Result<Reader> {
        let mut reader = IndexedReader::new(&self.filename)?;
        let header = reader.inner.read_header()?;

        Ok(Reader {
            filename: self.filename,
            inner: reader,
            header,
            inflags: self.inflags.unwrap_or(0),
            exflags: self.exflags.unwrap_or(Self::DEFAULT_EXFLAGS),
            minmapq: self.minmapq.unwrap_or(0),
            strdeductor: self.strdeductor.unwrap_or(deduce::se::forward),
        })
    }
}

/// Indexed BAM alignment source. Every `fetch` is an independent index-driven
/// query; the reader can therefore be queried repeatedly and cloned for
/// parallel workers (a clone reopens the same file).
#[derive(Getters)]
pub struct Reader {
    filename: PathBuf,
    #[getter(skip)]
    inner: IndexedReader<bgzf::Reader<File>>,
    header: sam::header::Header,
    inflags: u16,
    exflags: u16,
    minmapq: u8,
    #[getter(skip)]
    strdeductor: StrDeductor,
}

impl AlignmentSource for Reader {
    type Ctg = String;
    type Idx = u64;
    type Read = super::record::Alignment;
    type Iter<'borrow> = Query<'borrow, bgzf::Reader<File>>;

    fn fetch(
        &mut self,
        contig: &Self::Ctg,
        interval: &Interval<u64>,
    ) -> io::Result<Self::Iter<'_>> {
        let (start, end) = (interval.start() as usize, interval.end() as usize);
        let (start, end) = match (Position::try_from(start), Position::try_from(end)) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("query window {} is not 1-based", interval),
                ))
            }
        };
        let region = Region::new(contig.clone(), noodles::core::region::Interval::from(start..=end));

        let reference_sequence_id = self
            .header
            .reference_sequences()
            .get_index_of(region.name())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("unknown reference sequence: {}", contig),
                )
            })?;
        let chunks = self
            .inner
            .index
            .query(reference_sequence_id, region.interval())?;

        Ok(Query::new(
            self.inner.inner.get_mut(),
            chunks,
            reference_sequence_id,
            *interval,
            self.strdeductor,
            self.inflags,
            self.exflags,
            self.minmapq,
        ))
    }
}

impl Clone for Reader {
    fn clone(&self) -> Self {
        ReaderBuilder {
            filename: self.filename.clone(),
            inflags: Some(self.inflags),
            exflags: Some(self.exflags),
            minmapq: Some(self.minmapq),
            strdeductor: Some(self.strdeductor),
        }
        .build()
        .expect("Failed to reopen the BAM file")
    }
}
