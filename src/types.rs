//src/types.rs

use std::fmt;
use std::io::{self, Write};

use crate::fastq::get_id;

/// One sequencing read: the four lines of a FASTQ record as raw bytes,
/// terminators stripped. Contents are never decoded or checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub header: Vec<u8>,
    pub seq: Vec<u8>,
    pub comment: Vec<u8>,
    pub qual: Vec<u8>,
}

impl Record {
    /// The join key (header bytes before the first space).
    pub fn id(&self) -> &[u8] {
        get_id(&self.header)
    }

    /// Writes the record verbatim, each of the four lines followed by `\n`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in [&self.header, &self.seq, &self.comment, &self.qual] {
            out.write_all(line)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Counters collected over one run. They only ever go up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairCounts {
    pub forward_reads: u64,
    pub reverse_reads: u64,
    pub surviving_pairs: u64,
    pub broken_forward: u64,
    pub broken_reverse: u64,
    /// Forward records whose identifier was already in the buffer when parsed.
    pub duplicate_forward: u64,
}

impl PairCounts {
    pub fn total_reads(&self) -> u64 {
        self.forward_reads + self.reverse_reads
    }

    /// `broken_forward + broken_reverse + 2 * surviving_pairs`
    pub fn accounted_for(&self) -> u64 {
        self.broken_forward + self.broken_reverse + 2 * self.surviving_pairs
    }
}

impl fmt::Display for PairCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n\n----Results-------------------------------------------------")?;
        writeln!(f, "Num input forward reads:   {}", self.forward_reads)?;
        writeln!(f, "Num input reverse reads:   {}", self.reverse_reads)?;
        writeln!(f, "Total input reads:         {}", self.total_reads())?;
        writeln!(f)?;
        writeln!(f, "Num surviving read pairs:  {}", self.surviving_pairs)?;
        writeln!(f, "Num broken forward reads:  {}", self.broken_forward)?;
        writeln!(f, "Num broken reverse reads:  {}", self.broken_reverse)?;
        writeln!(f, "Total reads accounted for: {}", self.accounted_for())?;
        if self.duplicate_forward > 0 {
            writeln!(f, "Num duplicate forward ids: {}", self.duplicate_forward)?;
        }
        write!(f, "------------------------------------------------------------\n\n\n")
    }
}
