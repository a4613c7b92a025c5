//src/pairing.rs

use std::io::{self, Write};

use ahash::AHashMap;

use crate::errors::{FixPairsError, Result};
use crate::output::PairWriters;
use crate::progress::{ProgressTracker, DEFAULT_INTERVAL};
use crate::types::{PairCounts, Record};

/// What to do when the forward stream repeats an identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later record replaces the buffered one.
    #[default]
    KeepLast,
    /// The first record stays buffered; later ones are dropped.
    KeepFirst,
    /// Abort the run.
    Error,
}

/// Streaming join of a forward and a reverse record stream on read identifier.
///
/// Usage is strictly `ingest`, then `join`, then `drain`. The forward stream
/// is held in memory in full; the reverse stream is never buffered.
pub struct PairingEngine {
    buffer: AHashMap<Vec<u8>, Record>,
    counts: PairCounts,
    policy: DuplicatePolicy,
    progress_interval: u64,
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

impl PairingEngine {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            buffer: AHashMap::new(),
            counts: PairCounts::default(),
            policy,
            progress_interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Forward records still waiting for a mate.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Buffers every forward record by identifier. Nothing is written.
    pub fn ingest<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<Record>>,
    {
        let mut progress = ProgressTracker::new("forward").with_interval(self.progress_interval);
        for rec in records {
            let rec = rec.map_err(FixPairsError::ForwardRead)?;
            progress.record();
            self.counts.forward_reads += 1;

            let id = rec.id().to_vec();
            if let Some(slot) = self.buffer.get_mut(&id) {
                self.counts.duplicate_forward += 1;
                let shown = String::from_utf8_lossy(&id).into_owned();
                match self.policy {
                    DuplicatePolicy::KeepLast => *slot = rec,
                    DuplicatePolicy::KeepFirst => {}
                    DuplicatePolicy::Error => {
                        return Err(FixPairsError::DuplicateIdentifier { id: shown });
                    }
                }
                log::debug!("Duplicate forward identifier {shown}");
            } else {
                self.buffer.insert(id, rec);
            }
        }
        progress.finish();
        Ok(())
    }

    /// Probes the buffer with each reverse record. Hits go out as a pair to the
    /// forward and reverse sinks, in reverse-stream order; misses go to unpaired.
    pub fn join<I, W>(&mut self, records: I, out: &mut PairWriters<W>) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<Record>>,
        W: Write,
    {
        let mut progress = ProgressTracker::new("reverse").with_interval(self.progress_interval);
        for rec in records {
            let rec = rec.map_err(FixPairsError::ReverseRead)?;
            progress.record();
            self.counts.reverse_reads += 1;

            match self.buffer.remove(rec.id()) {
                Some(mate) => {
                    mate.write_to(&mut out.forward).map_err(FixPairsError::Write)?;
                    rec.write_to(&mut out.reverse).map_err(FixPairsError::Write)?;
                    self.counts.surviving_pairs += 1;
                }
                None => {
                    rec.write_to(&mut out.unpaired).map_err(FixPairsError::Write)?;
                    self.counts.broken_reverse += 1;
                }
            }
        }
        progress.finish();
        Ok(())
    }

    /// Writes every unmatched forward record to the unpaired sink, emptying the
    /// buffer. Order follows the map and is not stable across runs.
    pub fn drain<W: Write>(&mut self, out: &mut PairWriters<W>) -> Result<()> {
        let mut progress = ProgressTracker::new("forward unpaired")
            .with_action("Writing")
            .with_interval(self.progress_interval);
        for (_, rec) in self.buffer.drain() {
            rec.write_to(&mut out.unpaired).map_err(FixPairsError::Write)?;
            progress.record();
            self.counts.broken_forward += 1;
        }
        progress.finish();
        Ok(())
    }

    pub fn report(&self) -> PairCounts {
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fastq::RecordReader;
    use std::collections::HashSet;
    use std::io::Cursor;

    fn fastq(recs: &[(&str, &str)]) -> String {
        recs.iter()
            .map(|(header, seq)| format!("{header}\n{seq}\n+\n{}\n", "I".repeat(seq.len())))
            .collect()
    }

    fn reader(text: &str) -> RecordReader<Cursor<Vec<u8>>> {
        RecordReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    fn run(forward: &str, reverse: &str, policy: DuplicatePolicy) -> (PairCounts, String, String, String) {
        let mut engine = PairingEngine::new(policy).with_progress_interval(1);
        let mut out = PairWriters::new(Vec::new(), Vec::new(), Vec::new());
        engine.ingest(reader(forward)).unwrap();
        engine.join(reader(reverse), &mut out).unwrap();
        engine.drain(&mut out).unwrap();
        assert_eq!(engine.buffered(), 0);
        let (f, r, u) = out.into_inner();
        (
            engine.report(),
            String::from_utf8(f).unwrap(),
            String::from_utf8(r).unwrap(),
            String::from_utf8(u).unwrap(),
        )
    }

    #[test]
    fn test_partial_overlap() {
        let forward = fastq(&[("@A 1:N", "AAAA"), ("@B 1:N", "CCCC"), ("@C 1:N", "GGGG")]);
        let reverse = fastq(&[("@B 2:N", "TTTT"), ("@C 2:N", "TTGG"), ("@D 2:N", "ACAC")]);
        let (counts, f, r, u) = run(&forward, &reverse, DuplicatePolicy::KeepLast);

        assert_eq!(f, fastq(&[("@B 1:N", "CCCC"), ("@C 1:N", "GGGG")]));
        assert_eq!(r, fastq(&[("@B 2:N", "TTTT"), ("@C 2:N", "TTGG")]));
        // reverse misses are written during join, forward leftovers after
        assert_eq!(u, fastq(&[("@D 2:N", "ACAC"), ("@A 1:N", "AAAA")]));

        assert_eq!(counts.forward_reads, 3);
        assert_eq!(counts.reverse_reads, 3);
        assert_eq!(counts.surviving_pairs, 2);
        assert_eq!(counts.broken_forward, 1);
        assert_eq!(counts.broken_reverse, 1);
        assert_eq!(counts.accounted_for(), counts.total_reads());
    }

    #[test]
    fn test_empty_forward() {
        let reverse = fastq(&[("@X", "ACGT")]);
        let (counts, f, r, u) = run("", &reverse, DuplicatePolicy::KeepLast);
        assert!(f.is_empty());
        assert!(r.is_empty());
        assert_eq!(u, reverse);
        assert_eq!(counts.broken_reverse, 1);
        assert_eq!(counts.surviving_pairs, 0);
    }

    #[test]
    fn test_drain_membership() {
        let forward = fastq(&[("@A", "A"), ("@B", "C"), ("@C", "G"), ("@D", "T")]);
        let (counts, _, _, u) = run(&forward, "", DuplicatePolicy::KeepLast);
        assert_eq!(counts.broken_forward, 4);

        let headers: HashSet<&str> = u.lines().step_by(4).collect();
        let expected: HashSet<&str> = ["@A", "@B", "@C", "@D"].into_iter().collect();
        assert_eq!(headers, expected);
    }

    #[test]
    fn test_duplicate_keep_last() {
        let forward = fastq(&[("@A first", "AAAA"), ("@A second", "CCCC")]);
        let reverse = fastq(&[("@A", "GGGG")]);
        let (counts, f, _, u) = run(&forward, &reverse, DuplicatePolicy::KeepLast);
        assert_eq!(f, fastq(&[("@A second", "CCCC")]));
        assert!(u.is_empty());
        assert_eq!(counts.forward_reads, 2);
        assert_eq!(counts.duplicate_forward, 1);
    }

    #[test]
    fn test_duplicate_keep_first() {
        let forward = fastq(&[("@A first", "AAAA"), ("@A second", "CCCC")]);
        let reverse = fastq(&[("@A", "GGGG")]);
        let (_, f, _, _) = run(&forward, &reverse, DuplicatePolicy::KeepFirst);
        assert_eq!(f, fastq(&[("@A first", "AAAA")]));
    }

    #[test]
    fn test_duplicate_strict() {
        let forward = fastq(&[("@A first", "AAAA"), ("@A second", "CCCC")]);
        let mut engine = PairingEngine::new(DuplicatePolicy::Error);
        let err = engine.ingest(reader(&forward)).unwrap_err();
        assert!(matches!(err, FixPairsError::DuplicateIdentifier { ref id } if id == "@A"));
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn test_trailing_line_ignored() {
        let forward = format!("{}@extra\n", fastq(&[("@A", "ACGT")]));
        let (counts, ..) = run(&forward, "", DuplicatePolicy::KeepLast);
        assert_eq!(counts.forward_reads, 1);
        assert_eq!(counts.broken_forward, 1);
    }

    #[test]
    fn test_id_ignores_sequence_content() {
        // only the text before the first space matters
        let forward = fastq(&[("@A x", "AAAA")]);
        let reverse = fastq(&[("@A y", "TTTTTTTT")]);
        let (counts, ..) = run(&forward, &reverse, DuplicatePolicy::KeepLast);
        assert_eq!(counts.surviving_pairs, 1);
    }

    #[test]
    fn test_non_utf8_records_pair_verbatim() {
        let forward: &[u8] = b"@A caf\xe9\nACGT\n+\nII\xe9I\n@B\nGG\n+\nII\n";
        let reverse: &[u8] = b"@A x\nTTTT\n+\nIIII\n";
        let mut engine = PairingEngine::default();
        let mut out = PairWriters::new(Vec::new(), Vec::new(), Vec::new());
        engine.ingest(RecordReader::new(Cursor::new(forward))).unwrap();
        engine.join(RecordReader::new(Cursor::new(reverse)), &mut out).unwrap();
        engine.drain(&mut out).unwrap();

        let (f, r, u) = out.into_inner();
        assert_eq!(f, b"@A caf\xe9\nACGT\n+\nII\xe9I\n");
        assert_eq!(r, reverse);
        assert_eq!(u, b"@B\nGG\n+\nII\n");
        assert_eq!(engine.report().surviving_pairs, 1);
    }

    #[test]
    fn test_read_error_maps_to_stream() {
        let bad: Vec<io::Result<Record>> =
            vec![Err(io::Error::new(io::ErrorKind::InvalidData, "not utf-8"))];
        let mut engine = PairingEngine::default();
        assert_eq!(engine.ingest(bad).unwrap_err().exit_code(), 4);

        let bad: Vec<io::Result<Record>> =
            vec![Err(io::Error::new(io::ErrorKind::InvalidData, "not utf-8"))];
        let mut out = PairWriters::new(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(engine.join(bad, &mut out).unwrap_err().exit_code(), 5);
    }
}
