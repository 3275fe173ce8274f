use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::Path;

use derive_getters::Dissolve;
use noodles::{bam, bgzf, csi::BinningIndex};

#[derive(Dissolve)]
pub struct IndexedReader<R> {
    pub inner: bam::io::Reader<R>,
    pub index: Box<dyn BinningIndex + Send + Sync>,
}

impl IndexedReader<bgzf::Reader<File>> {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        // The index is expected next to the BAM file, either as file.bam.bai
        // or as file.bai
        let mut sibling = OsString::from(path);
        sibling.push(".bai");
        let index = match bam::bai::read(&sibling) {
            Ok(index) => index,
            Err(_) => bam::bai::read(path.with_extension("bai"))?,
        };

        let file = File::open(path)?;
        Ok(Self {
            inner: bam::io::Reader::new(file),
            index: Box::new(index),
        })
    }
}
