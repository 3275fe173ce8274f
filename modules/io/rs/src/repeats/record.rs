use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use intrex_core_rs::loc::{Interval, Strand};

/// One row of the repeat-annotation dump: a named repeat occurrence on a
/// specific contig and strand. Coordinates are 1-based with both ends
/// included, matching the rest of the workspace.
#[derive(Clone, PartialEq, Eq, Debug, Dissolve, Getters)]
pub struct RepeatRecord {
    seqid: String,
    interval: Interval<u64>,
    strand: Strand,
    name: String,
}

impl RepeatRecord {
    pub fn new(seqid: String, interval: Interval<u64>, strand: Strand, name: String) -> Result<Self> {
        ensure!(!seqid.is_empty(), "Repeat record without a seqid");
        ensure!(!name.is_empty(), "Repeat record without a name");
        Ok(Self {
            seqid,
            interval,
            strand,
            name,
        })
    }
}

impl Default for RepeatRecord {
    fn default() -> Self {
        Self {
            seqid: "_".to_string(),
            interval: Interval::default(),
            strand: Strand::Forward,
            name: "_".to_string(),
        }
    }
}
