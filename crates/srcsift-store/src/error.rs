//! Error types for the srcsift-store crate.
//!
//! All store operations return [`StoreError`] via [`StoreResult`].
//! Uses `thiserror` for ergonomic, zero-cost error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the metadata store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed SQL or a constraint violation surfaced from SQLite.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Opening the database file failed.
    #[error("failed to open database {path}: {message}")]
    Connection { path: PathBuf, message: String },

    /// A CRUD call arrived with no data or no WHERE condition.
    #[error("{operation} on {table} refused: {reason}")]
    EmptyInput {
        operation: &'static str,
        table: String,
        reason: &'static str,
    },

    /// A table or column name failed the identifier allow-list. Identifiers
    /// are interpolated into SQL, so anything outside `[A-Za-z_][A-Za-z0-9_]*`
    /// is rejected before it reaches the engine.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// The schema script does not exist.
    #[error("schema script not found: {0}")]
    SchemaMissing(PathBuf),

    /// Reading the schema script failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The connection mutex was poisoned by a panicking thread.
    #[error("store mutex poisoned")]
    Poisoned,
}
