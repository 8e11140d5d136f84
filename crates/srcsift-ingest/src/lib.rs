//! # srcsift-ingest
//!
//! File ingestion substrate for the srcsift pipeline: encoding-resilient
//! reading, content fingerprinting for change detection, file-type
//! classification and directory listing.
//!
//! Every file the pipeline touches is read once, fingerprinted, and the
//! fingerprint compared against the one persisted in the metadata store to
//! decide whether re-analysis is needed. All functions here are pure over
//! filesystem state; there is no shared mutable state, so distinct files
//! may be processed in parallel freely.
//!
//! ## Quick start
//!
//! ```ignore
//! use srcsift_ingest::{classify, digest_file, read_text, HashAlgorithm};
//!
//! let text = read_text(path)?;
//! let fp = digest_file(path, HashAlgorithm::Md5)?;
//! if srcsift_ingest::is_changed(path, &stored_hex, HashAlgorithm::Md5) {
//!     // re-analyze
//! }
//! ```

pub mod error;
pub mod filetype;
pub mod fingerprint;
pub mod listing;
pub mod reader;

// ── re-exports ───────────────────────────────────────────────────────

pub use error::{IngestError, IngestResult};
pub use filetype::{FileType, classify};
pub use fingerprint::{
    Fingerprint, HashAlgorithm, digest_bytes, digest_file, digest_text, is_changed,
};
pub use listing::{FileInfo, file_info, list_files};
pub use reader::{FALLBACK_ENCODINGS, FileContent, read_file, read_text, write_text};
