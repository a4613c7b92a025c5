//src/errors.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run. Each variant maps to a fixed process exit
/// status so scripts can tell the failure sites apart.
#[derive(Debug, Error)]
pub enum FixPairsError {
    #[error("USAGE: {0}")]
    Usage(String),

    #[error("cannot build output file names from basename '{basename}'")]
    OutputName { basename: String },

    #[error("Couldn't open {} for writing: {source}", path.display())]
    OutputOpen { path: PathBuf, source: io::Error },

    #[error("cannot read {}: {source}", path.display())]
    ForwardOpen { path: PathBuf, source: io::Error },

    #[error("cannot read {}: {source}", path.display())]
    ReverseOpen { path: PathBuf, source: io::Error },

    #[error("failed reading forward reads: {0}")]
    ForwardRead(#[source] io::Error),

    #[error("failed reading reverse reads: {0}")]
    ReverseRead(#[source] io::Error),

    #[error("failed writing output: {0}")]
    Write(#[source] io::Error),

    #[error("duplicate identifier '{id}' in forward reads")]
    DuplicateIdentifier { id: String },
}

impl FixPairsError {
    pub fn exit_code(&self) -> i32 {
        match self {
            FixPairsError::Usage(_) => 1,
            FixPairsError::OutputName { .. } => 2,
            FixPairsError::OutputOpen { .. } | FixPairsError::Write(_) => 3,
            FixPairsError::ForwardOpen { .. } | FixPairsError::ForwardRead(_) => 4,
            FixPairsError::ReverseOpen { .. } | FixPairsError::ReverseRead(_) => 5,
            FixPairsError::DuplicateIdentifier { .. } => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, FixPairsError>;
