//! Configuration document cache.
//!
//! Documents are memoized by canonical (absolute, lexically normalized)
//! location for the lifetime of the cache. There is no TTL or staleness
//! check; callers that need to pick up live edits call [`ConfigCache::reload`]
//! or [`ConfigCache::invalidate`] themselves.
//!
//! The cache is an explicit context object: construct one at startup and
//! pass it to whatever needs configuration. There is no process-wide global.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Process-lifetime cache of parsed configuration documents, keyed by
/// canonical source location.
#[derive(Debug, Default)]
pub struct ConfigCache {
    documents: HashMap<PathBuf, Arc<Value>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or fetch from cache) the document at `location`.
    ///
    /// A cache hit returns the previously parsed document without touching
    /// storage. On a miss, a missing source fails with
    /// [`ConfigError::SourceMissing`]; an empty source parses to an empty
    /// document, never null.
    pub fn load(&mut self, location: impl AsRef<Path>) -> ConfigResult<Arc<Value>> {
        let canonical = canonicalize_lexically(location.as_ref());

        if let Some(doc) = self.documents.get(&canonical) {
            debug!(path = %canonical.display(), "config served from cache");
            return Ok(Arc::clone(doc));
        }

        if !canonical.exists() {
            return Err(ConfigError::SourceMissing(canonical));
        }

        let text = fs::read_to_string(&canonical).map_err(|e| ConfigError::Io {
            path: canonical.clone(),
            source: e,
        })?;

        let table: toml::Table = toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: canonical.clone(),
            source: e,
        })?;
        let doc = Arc::new(serde_json::to_value(table)?);

        self.documents.insert(canonical.clone(), Arc::clone(&doc));
        debug!(path = %canonical.display(), "config loaded");
        Ok(doc)
    }

    /// Drop the cached document for exactly this location. Returns whether
    /// an entry was present.
    pub fn invalidate(&mut self, location: impl AsRef<Path>) -> bool {
        let canonical = canonicalize_lexically(location.as_ref());
        self.documents.remove(&canonical).is_some()
    }

    /// Empty the cache entirely.
    pub fn clear(&mut self) {
        self.documents.clear();
        debug!("config cache cleared");
    }

    /// Re-read a document from storage, bypassing any cached copy.
    pub fn reload(&mut self, location: impl AsRef<Path>) -> ConfigResult<Arc<Value>> {
        self.invalidate(location.as_ref());
        self.load(location)
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Absolute, lexically normalized form of `path`, used as the cache key.
///
/// `.` and `..` components are collapsed without touching the filesystem,
/// so paths to not-yet-existing files normalize the same way as existing
/// ones and symlinks are left alone.
pub fn canonicalize_lexically(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn load_parses_nested_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "app.toml", "[database]\nhost = \"localhost\"\n");

        let mut cache = ConfigCache::new();
        let doc = cache.load(&path).unwrap();
        assert_eq!(doc["database"]["host"], "localhost");
    }

    #[test]
    fn second_load_hits_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "app.toml", "answer = 42\n");

        let mut cache = ConfigCache::new();
        let first = cache.load(&path).unwrap();

        // Change the file on disk; the cached document must win.
        fs::write(&path, "answer = 7\n").unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second["answer"], 42);
    }

    #[test]
    fn reload_bypasses_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "app.toml", "answer = 42\n");

        let mut cache = ConfigCache::new();
        cache.load(&path).unwrap();

        fs::write(&path, "answer = 7\n").unwrap();
        let doc = cache.reload(&path).unwrap();
        assert_eq!(doc["answer"], 7);
    }

    #[test]
    fn missing_source_is_a_hard_failure() {
        let mut cache = ConfigCache::new();
        let err = cache.load("/no/such/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::SourceMissing(_)));
    }

    #[test]
    fn empty_source_is_an_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "empty.toml", "");

        let mut cache = ConfigCache::new();
        let doc = cache.load(&path).unwrap();
        assert!(doc.as_object().unwrap().is_empty());
    }

    #[test]
    fn invalidate_removes_exactly_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_config(dir.path(), "a.toml", "x = 1\n");
        let b = write_config(dir.path(), "b.toml", "y = 2\n");

        let mut cache = ConfigCache::new();
        cache.load(&a).unwrap();
        cache.load(&b).unwrap();
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate(&a));
        assert!(!cache.invalidate(&a));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn dotted_relative_paths_share_a_cache_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "app.toml", "x = 1\n");

        let mut cache = ConfigCache::new();
        cache.load(&path).unwrap();

        // Same file addressed through a redundant ".." hop.
        let indirect = dir.path().join("sub/../app.toml");
        let doc = cache.load(&indirect).unwrap();
        assert_eq!(doc["x"], 1);
        assert_eq!(cache.len(), 1);
    }
}
