use super::Format;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("no such file or directory: '{}'", path.display())]
    FileNotFound { path: PathBuf },

    #[error("malformed custom header: {details} (at line {line})")]
    MalformedHeader { line: usize, details: String },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("snapshot {snapshot} ended after {found} of {expected} atom lines")]
    ShortSnapshot {
        snapshot: usize,
        expected: usize,
        found: usize,
    },

    #[error("no snapshots found in {format} input")]
    EmptyTrajectory { format: Format },

    #[error("inconsistent shape: {0}")]
    InconsistentShape(String),

    #[error("malformed input for writing: {0}")]
    MalformedInput(String),

    #[error("unreadable cache file '{}': {details}", path.display())]
    CacheCorrupt { path: PathBuf, details: String },

    #[error("field projection failed: {0}")]
    Projection(#[from] crate::project::Error),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn header(line: usize, details: impl Into<String>) -> Self {
        Self::MalformedHeader {
            line,
            details: details.into(),
        }
    }

    pub fn cache_corrupt(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::CacheCorrupt {
            path: path.into(),
            details: details.into(),
        }
    }
}
