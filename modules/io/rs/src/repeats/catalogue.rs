use std::path::Path;

use ahash::AHashMap;
use eyre::Result;

use intrex_core_rs::loc::{Interval, PerStrand, Strand};

use super::reader::Reader;
use super::record::RepeatRecord;

/// In-memory repeat catalogue: per contig, per strand, the (interval, name)
/// pairs of every annotated repeat occurrence, sorted by coordinate. Contigs
/// without annotation are valid queries and simply yield nothing.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Catalogue {
    repeats: AHashMap<String, PerStrand<Vec<(Interval<u64>, String)>>>,
}

impl Catalogue {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut records = Vec::new();
        Reader::from_path(path.as_ref())?.read_to_end(&mut records)?;
        log::debug!(
            "Loaded {} repeat records from {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: impl IntoIterator<Item = RepeatRecord>) -> Self {
        let mut repeats: AHashMap<String, PerStrand<Vec<_>>> = AHashMap::new();
        for record in records {
            let (seqid, interval, strand, name) = record.dissolve();
            repeats
                .entry(seqid)
                .or_default()
                .get_mut(strand)
                .push((interval, name));
        }
        for cache in repeats.values_mut() {
            cache.forward.sort();
            cache.reverse.sort();
        }
        Self { repeats }
    }

    /// All repeat occurrences on the given contig and strand, sorted by
    /// (start, end). Unknown contigs yield an empty slice, not an error.
    pub fn fetch(&self, contig: &str, strand: Strand) -> &[(Interval<u64>, String)] {
        self.repeats
            .get(contig)
            .map(|cache| cache.get(strand).as_slice())
            .unwrap_or(&[])
    }

    pub fn contigs(&self) -> impl Iterator<Item = &str> {
        self.repeats.keys().map(|x| x.as_str())
    }

    pub fn records(&self) -> usize {
        self.repeats
            .values()
            .map(|cache| cache.forward.len() + cache.reverse.len())
            .sum()
    }
}
