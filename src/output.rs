//src/output.rs

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::{FixPairsError, Result};

pub const FORWARD_SUFFIX: &str = ".1.fq";
pub const REVERSE_SUFFIX: &str = ".2.fq";
pub const UNPAIRED_SUFFIX: &str = ".U.fq";

/// The three output files derived from one basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub forward: PathBuf,
    pub reverse: PathBuf,
    pub unpaired: PathBuf,
}

impl OutputPaths {
    /// `out/sample` gives `out/sample.1.fq`, `out/sample.2.fq` and `out/sample.U.fq`.
    ///
    /// Fails when the basename is empty or ends in a path separator, since the
    /// suffixes would then name hidden files inside a directory.
    pub fn from_basename(basename: &str) -> Result<Self> {
        if basename.is_empty() || basename.ends_with(std::path::is_separator) {
            return Err(FixPairsError::OutputName { basename: basename.to_string() });
        }
        Ok(Self {
            forward: PathBuf::from(format!("{basename}{FORWARD_SUFFIX}")),
            reverse: PathBuf::from(format!("{basename}{REVERSE_SUFFIX}")),
            unpaired: PathBuf::from(format!("{basename}{UNPAIRED_SUFFIX}")),
        })
    }
}

/// Sinks for matched forward, matched reverse and unpaired records.
pub struct PairWriters<W: Write> {
    pub forward: W,
    pub reverse: W,
    pub unpaired: W,
}

impl<W: Write> PairWriters<W> {
    pub fn new(forward: W, reverse: W, unpaired: W) -> Self {
        Self { forward, reverse, unpaired }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.forward.flush()?;
        self.reverse.flush()?;
        self.unpaired.flush()
    }

    pub fn into_inner(self) -> (W, W, W) {
        (self.forward, self.reverse, self.unpaired)
    }
}

impl PairWriters<BufWriter<File>> {
    /// Creates (truncating) the three output files, in forward, reverse,
    /// unpaired order. The first one that cannot be opened is reported.
    pub fn create(paths: &OutputPaths) -> Result<Self> {
        Ok(Self::new(
            open_output(&paths.forward)?,
            open_output(&paths.reverse)?,
            open_output(&paths.unpaired)?,
        ))
    }
}

fn open_output(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| FixPairsError::OutputOpen { path: path.to_path_buf(), source })
}
