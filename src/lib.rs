// src/lib.rs
pub mod errors;
pub mod fastq;
pub mod output;
pub mod pairing;
pub mod progress;
pub mod types;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub use crate::errors::{FixPairsError, Result};
pub use crate::output::{OutputPaths, PairWriters};
pub use crate::pairing::{DuplicatePolicy, PairingEngine};
pub use crate::types::{PairCounts, Record};

use crate::fastq::RecordReader;
use crate::progress::DEFAULT_INTERVAL;

/// Knobs for one run of [`fix_pairs`].
#[derive(Debug, Clone, Copy)]
pub struct FixPairsOptions {
    pub duplicates: DuplicatePolicy,
    /// Records between progress messages; 0 disables them.
    pub progress_interval: u64,
}

impl Default for FixPairsOptions {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::default(),
            progress_interval: DEFAULT_INTERVAL,
        }
    }
}

/// Re-pairs `forward` and `reverse` FASTQ files into `<basename>.1.fq`,
/// `<basename>.2.fq` and `<basename>.U.fq`, returning the run's counters.
///
/// Outputs are opened first, then both inputs, so every open failure is
/// reported before any work is done. All handles are closed on return.
pub fn fix_pairs<P, Q>(
    forward: P,
    reverse: Q,
    basename: &str,
    options: FixPairsOptions,
) -> Result<(PairCounts, OutputPaths)>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let paths = OutputPaths::from_basename(basename)?;
    let mut writers = PairWriters::create(&paths)?;

    let forward = forward.as_ref();
    let forward_file = File::open(forward).map_err(|source| FixPairsError::ForwardOpen {
        path: forward.to_path_buf(),
        source,
    })?;
    let reverse = reverse.as_ref();
    let reverse_file = File::open(reverse).map_err(|source| FixPairsError::ReverseOpen {
        path: reverse.to_path_buf(),
        source,
    })?;

    let mut engine = PairingEngine::new(options.duplicates)
        .with_progress_interval(options.progress_interval);

    log::info!("Buffering forward reads from {}", forward.display());
    let mut forward_reads = RecordReader::new(BufReader::new(forward_file));
    engine.ingest(&mut forward_reads)?;
    log::info!("{} forward read(s) buffered", engine.buffered());

    log::info!("Pairing reverse reads from {}", reverse.display());
    let mut reverse_reads = RecordReader::new(BufReader::new(reverse_file));
    engine.join(&mut reverse_reads, &mut writers)?;

    log::info!("Writing {} unpaired forward read(s)", engine.buffered());
    engine.drain(&mut writers)?;
    writers.flush().map_err(FixPairsError::Write)?;

    let counts = engine.report();
    if counts.duplicate_forward > 0 {
        log::warn!(
            "{} forward read(s) shared an identifier with an earlier read and were not all kept",
            counts.duplicate_forward
        );
    }
    let discarded = forward_reads.discarded_lines() + reverse_reads.discarded_lines();
    if discarded > 0 {
        log::warn!("{discarded} trailing line(s) were not part of a full record and were skipped");
    }

    Ok((counts, paths))
}

/// The three output paths in forward, reverse, unpaired order.
pub fn output_files(paths: &OutputPaths) -> [&PathBuf; 3] {
    [&paths.forward, &paths.reverse, &paths.unpaired]
}
