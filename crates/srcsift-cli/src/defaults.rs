//! Default project configuration and metadata schema, written out by
//! `srcsift init` when a project does not yet have its own copies.

/// Default per-project configuration.
pub const PROJECT_CONFIG: &str = r#"# srcsift project configuration

[scan]
# Directory holding the sources to analyze, relative to the project dir.
source_dir = "src"
recursive = true
hash_algorithm = "md5"

[database]
file = "db/metadata.db"
schema = "config/schema.sql"
"#;

/// Default metadata schema: file fingerprints plus scan bookkeeping.
pub const METADATA_SCHEMA: &str = r#"-- srcsift metadata schema

CREATE TABLE IF NOT EXISTS files (
    file_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    file_path      TEXT NOT NULL UNIQUE,
    file_type      TEXT NOT NULL,
    hash_algorithm TEXT NOT NULL,
    content_hash   TEXT NOT NULL,
    file_size      INTEGER NOT NULL,
    scanned_at     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_files_type ON files(file_type);

CREATE TABLE IF NOT EXISTS scan_runs (
    run_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at  TEXT NOT NULL,
    total_files INTEGER NOT NULL,
    new_files   INTEGER NOT NULL,
    changed     INTEGER NOT NULL,
    unchanged   INTEGER NOT NULL
);
"#;

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use srcsift_store::MetaStore;

    #[test]
    fn default_config_parses_with_expected_keys() {
        let mut cache = srcsift_config::ConfigCache::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("srcsift.toml");
        std::fs::write(&path, PROJECT_CONFIG).unwrap();

        let doc = cache.load(&path).unwrap();
        let missing = srcsift_config::validate(
            &doc,
            &[
                "scan.source_dir",
                "scan.hash_algorithm",
                "database.file",
                "database.schema",
            ],
        );
        assert!(missing.is_empty(), "missing keys: {missing:?}");
    }

    #[test]
    fn default_schema_bootstraps() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("schema.sql");
        std::fs::write(&script, METADATA_SCHEMA).unwrap();

        let store = MetaStore::in_memory();
        store.bootstrap_schema(&script).unwrap();
        assert!(store.table_exists("files").unwrap());
        assert!(store.table_exists("scan_runs").unwrap());
    }
}
