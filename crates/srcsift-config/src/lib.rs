//! # srcsift-config
//!
//! Cached configuration loading for the srcsift pipeline.
//!
//! Configuration lives in TOML files located by caller-supplied paths. A
//! [`ConfigCache`] memoizes parsed documents by canonical location;
//! [`lookup`] and the typed `get_*` helpers read values by dotted key path
//! ("database.file") with caller-supplied defaults.

pub mod cache;
pub mod error;
pub mod lookup;

// ── re-exports ───────────────────────────────────────────────────────

pub use cache::{ConfigCache, canonicalize_lexically};
pub use error::{ConfigError, ConfigResult};
pub use lookup::{get_bool, get_i64, get_str, lookup, validate};
