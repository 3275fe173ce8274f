use ahash::AHashSet;
use eyre::Result;

use intrex_core_rs::loc::{Interval, IntervalOp, Region};
use intrex_core_rs::source::{AlignedRead, AlignmentSource};

use crate::filter::FragmentFilter;

/// How a read must sit relative to the queried region to be counted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Containment {
    /// Any read sharing at least one base with the region. This is exactly
    /// what the alignment-source range query returns, so no extra check is
    /// performed.
    Overlap,
    /// Only reads lying fully within the region. Reads returned by the range
    /// query but hanging over either edge are rejected.
    Enclosed,
}

impl Containment {
    fn admits<R: AlignedRead>(&self, read: &R, region: &Interval<R::Idx>) -> bool {
        match self {
            Containment::Overlap => true,
            Containment::Enclosed => {
                read.start() >= region.start() && read.end() <= region.end()
            }
        }
    }
}

/// Names of the fragments already counted within a single counting call.
/// Both mates of a pair carry the same name, so remembering it makes a pair
/// contribute one unit no matter how many of its mates show up. A scope must
/// never outlive the call it was created for.
#[derive(Debug, Default)]
pub struct DedupScope {
    counted: AHashSet<Vec<u8>>,
}

impl DedupScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the fragment with this name should be counted. Names are
    /// remembered only when the mate is mapped: a lone mate cannot be seen a
    /// second time, so there is nothing to deduplicate.
    pub fn observe(&mut self, name: &[u8], mate_mapped: bool) -> bool {
        if self.counted.contains(name) {
            return false;
        }
        if mate_mapped {
            self.counted.insert(name.to_vec());
        }
        true
    }

    pub fn len(&self) -> usize {
        self.counted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counted.is_empty()
    }
}

/// Count deduplicated fragments in a single region. The alignment source is
/// queried for reads intersecting the region; each read then passes the
/// containment test and the fragment filter before being checked against the
/// dedup scope. Returns the raw count, normalization happens elsewhere.
pub fn count_in_region<Src: AlignmentSource>(
    source: &mut Src,
    region: &Region<Src::Ctg, Src::Idx>,
    containment: Containment,
    filter: &FragmentFilter,
    dedup: &mut DedupScope,
) -> Result<u64> {
    debug_assert_eq!(filter.strand(), region.strand());

    let mut count = 0;
    for read in source.fetch(region.contig(), region.interval())? {
        let read = read?;
        if !containment.admits(&read, region.interval()) || !filter.admits(&read) {
            continue;
        }
        if dedup.observe(read.name(), read.is_mate_mapped()) {
            count += 1;
        }
    }
    Ok(count)
}

/// Count deduplicated fragments across several sub-regions sharing one dedup
/// scope: a fragment spanning two of the listed sub-regions contributes one
/// unit to the aggregate, not one per sub-region.
pub fn count_in_regions<Src: AlignmentSource>(
    source: &mut Src,
    regions: &[Region<Src::Ctg, Src::Idx>],
    containment: Containment,
    filter: &FragmentFilter,
    dedup: &mut DedupScope,
) -> Result<u64> {
    let mut total = 0;
    for region in regions {
        total += count_in_region(source, region, containment, filter, dedup)?;
    }
    Ok(total)
}
