use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use eyre::{bail, ensure, Context, OptionExt, Result};
use flate2::read::MultiGzDecoder;

use intrex_core_rs::loc::{Interval, Strand};

use super::record::RepeatRecord;

pub mod parse {
    use super::*;

    pub fn seqid<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<String> {
        let seqid = parts.next().ok_or_eyre("Missing repeat seqid")?;
        Ok(seqid.to_owned())
    }

    pub fn interval<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<Interval<u64>> {
        let start = parts.next().ok_or_eyre("Missing repeat start")?;
        let end = parts.next().ok_or_eyre("Missing repeat end")?;

        let (start, end) = match (start.parse::<u64>(), end.parse::<u64>()) {
            (Ok(start), Ok(end)) => (start, end),
            _ => bail!("Invalid repeat coordinates"),
        };
        ensure!(start >= 1, "Repeat coordinates must be 1-based");
        let interval = Interval::new(start, end).wrap_err("Invalid repeat interval")?;
        Ok(interval)
    }

    pub fn strand<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<Strand> {
        let strand = parts.next().ok_or_eyre("Missing repeat strand")?;
        let strand = match strand {
            "+" => Strand::Forward,
            "-" => Strand::Reverse,
            _ => bail!("Invalid repeat strand: {}", strand),
        };
        Ok(strand)
    }

    pub fn name<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<String> {
        let name = parts.next().ok_or_eyre("Missing repeat name")?;
        Ok(name.to_owned())
    }

    pub fn record<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<RepeatRecord> {
        RepeatRecord::new(seqid(parts)?, interval(parts)?, strand(parts)?, name(parts)?)
    }
}

/// Line reader for the tab-delimited repeat-annotation dump:
/// `seqid  start  end  strand  name`. Lines starting with `#` and blank
/// lines are skipped.
pub struct Reader<R> {
    reader: R,
    buffer: String,
}

impl Reader<BufReader<Box<dyn std::io::Read + Send>>> {
    /// Open a repeat dump, transparently decompressing `.gz` files.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).wrap_err_with(|| format!("Failed to open {}", path.display()))?;

        let read: Box<dyn std::io::Read + Send> =
            if path.extension().is_some_and(|x| x == "gz") {
                Box::new(MultiGzDecoder::new(file))
            } else {
                Box::new(file)
            };
        Ok(Self::new(BufReader::new(read)))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }

    /// Parse the next repeat record. Returns None once the input is
    /// exhausted.
    pub fn read_record(&mut self) -> Result<Option<RepeatRecord>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }

            let line = self.buffer.trim_end_matches(['\n', '\r']);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('\t');
            let record = parse::record(&mut parts)
                .wrap_err_with(|| format!("Failed to parse repeat record: {}", line))?;
            ensure!(
                parts.next().is_none(),
                "Repeat record has too many fields: {}",
                line
            );
            return Ok(Some(record));
        }
    }

    /// Read the remaining records into the given vector. Returns the number
    /// of records read.
    pub fn read_to_end(&mut self, into: &mut Vec<RepeatRecord>) -> Result<usize> {
        let mut total = 0;
        while let Some(record) = self.read_record()? {
            into.push(record);
            total += 1;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_input() -> Result<()> {
        let mut reader = Reader::new(Cursor::new(""));
        assert_eq!(reader.read_record()?, None);

        let mut reader = Reader::new(Cursor::new("# header only\n\n"));
        assert_eq!(reader.read_record()?, None);
        Ok(())
    }

    #[test]
    fn test_valid_records() -> Result<()> {
        let content = "# seqid\tstart\tend\tstrand\tname\n\
                       chr1\t100\t200\t+\tAluY\n\
                       chr1\t150\t250\t-\tL1PA3\n";
        let mut reader = Reader::new(Cursor::new(content));

        let mut records = Vec::new();
        assert_eq!(reader.read_to_end(&mut records)?, 2);
        assert_eq!(
            records,
            vec![
                RepeatRecord::new(
                    "chr1".into(),
                    Interval::new(100, 200).unwrap(),
                    Strand::Forward,
                    "AluY".into()
                )?,
                RepeatRecord::new(
                    "chr1".into(),
                    Interval::new(150, 250).unwrap(),
                    Strand::Reverse,
                    "L1PA3".into()
                )?,
            ]
        );
        assert_eq!(reader.read_to_end(&mut records)?, 0);
        Ok(())
    }

    #[test]
    fn test_malformed_records() {
        for line in [
            "chr1\t100\t200\t+",                  // missing name
            "chr1\t200\t100\t+\tAluY",            // start > end
            "chr1\t0\t100\t+\tAluY",              // not 1-based
            "chr1\t100\t200\t.\tAluY",            // unstranded
            "chr1\t100\t200\t+\tAluY\tleftover",  // trailing field
        ] {
            let mut reader = Reader::new(Cursor::new(line));
            assert!(reader.read_record().is_err(), "accepted: {}", line);
        }
    }
}
