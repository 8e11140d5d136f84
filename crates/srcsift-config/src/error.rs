//! Error types for the srcsift-config crate.

use std::path::PathBuf;

use thiserror::Error;

/// Alias for `Result<T, ConfigError>`.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source does not exist. Absence is a hard failure
    /// for `load`, not a soft default.
    #[error("configuration source not found: {0}")]
    SourceMissing(PathBuf),

    /// The source exists but is not valid TOML.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Converting the parsed document to a JSON value failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the source failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
