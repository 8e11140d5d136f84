//! Error types for the srcsift-ingest crate.
//!
//! All reading, writing and fingerprinting operations return
//! [`IngestError`] via [`IngestResult`].

use std::path::PathBuf;

use thiserror::Error;

/// Alias for `Result<T, IngestError>`.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur while reading, writing or fingerprinting files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Every encoding in the fallback chain failed to decode the file.
    #[error("could not decode {path} (tried {attempted:?})")]
    DecodeFailure {
        path: PathBuf,
        attempted: Vec<&'static str>,
    },

    /// Writing a file failed.
    #[error("failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A hash algorithm name could not be parsed.
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A non-decoding I/O error (permissions, hardware, ...).
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl IngestError {
    /// Map an `io::Error` for `path`, distinguishing a missing file from
    /// every other I/O failure.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}
