//! # srcsift-store
//!
//! SQLite-backed metadata store for the srcsift pipeline.
//!
//! One [`MetaStore`] owns one lazily-opened connection per database file,
//! tuned with WAL mode, foreign-key enforcement and a bounded page cache.
//! On top of the connection it offers parameterized query execution,
//! generic single-table CRUD generation and schema bootstrap from a SQL
//! script.
//!
//! Transaction discipline is deliberately simple: every mutating call
//! commits its own statement(s) immediately (autocommit), with the single
//! exception of [`MetaStore::bootstrap_schema`], which runs the whole
//! script as one transaction. This suits a single-writer ingestion tool;
//! it is not a general concurrent-writer store.
//!
//! ## Quick start
//!
//! ```ignore
//! use srcsift_store::{MetaStore, Row};
//!
//! let store = MetaStore::new("projects/sample/db/metadata.db");
//! store.bootstrap_schema(schema_path)?;
//! store.insert(
//!     "files",
//!     &Row::new()
//!         .set_text("file_path", "src/Main.java")
//!         .set_text("content_hash", hash),
//! )?;
//! ```

pub mod crud;
pub mod error;
pub mod meta;
pub mod row;
pub mod schema;

// ── re-exports ───────────────────────────────────────────────────────

pub use crud::{build_delete, build_insert, build_update, valid_identifier};
pub use error::{StoreError, StoreResult};
pub use meta::MetaStore;
pub use row::Row;
pub use rusqlite::types::Value;
