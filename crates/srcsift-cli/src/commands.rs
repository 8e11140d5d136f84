//! Subcommand implementations: init, scan, status.

use std::fs;
use std::path::Path;

use anyhow::{Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use srcsift_config::{ConfigCache, get_bool, get_str};
use srcsift_ingest::{self as ingest, HashAlgorithm};
use srcsift_store::{MetaStore, Row, Value};

use crate::defaults;
use crate::layout::ProjectLayout;

/// Create project scaffolding, write default config and schema where
/// absent, and bootstrap the metadata database.
pub fn cmd_init(root: &Path, project: &str) -> Result<()> {
    let layout = ProjectLayout::new(root, project);

    let config_file = layout.config_file();
    if !config_file.exists() {
        ingest::write_text(&config_file, defaults::PROJECT_CONFIG)?;
        info!(path = %config_file.display(), "default config written");
    }
    let schema_file = layout.schema_file();
    if !schema_file.exists() {
        ingest::write_text(&schema_file, defaults::METADATA_SCHEMA)?;
        info!(path = %schema_file.display(), "default schema written");
    }

    let mut cache = ConfigCache::new();
    let config = cache.load(&config_file)?;

    let store = open_store(&layout, &config);
    let script = layout.resolve(get_str(&config, "database.schema", "config/schema.sql"));
    store.bootstrap_schema(&script)?;
    store.disconnect()?;

    println!(
        "initialized project '{project}' at {}",
        layout.project_dir().display()
    );
    Ok(())
}

/// Walk the source tree, fingerprint supported files and persist metadata
/// for new or changed ones.
pub fn cmd_scan(
    root: &Path,
    project: &str,
    source_dir: Option<&Path>,
    algorithm: Option<&str>,
) -> Result<()> {
    let layout = ProjectLayout::new(root, project);
    let mut cache = ConfigCache::new();
    let config = cache.load(layout.config_file())?;

    let algorithm: HashAlgorithm = match algorithm {
        Some(name) => name.parse()?,
        None => get_str(&config, "scan.hash_algorithm", "md5").parse()?,
    };
    let recursive = get_bool(&config, "scan.recursive", true);
    let source_dir = match source_dir {
        Some(dir) => dir.to_path_buf(),
        None => layout.resolve(get_str(&config, "scan.source_dir", "src")),
    };

    let store = open_store(&layout, &config);
    if !store.table_exists("files")? {
        bail!("metadata store not initialized; run `srcsift init --project {project}` first");
    }

    info!(source_dir = %source_dir.display(), %algorithm, "scan started");
    let started_at = Utc::now().to_rfc3339();
    let mut new_files = 0_i64;
    let mut changed = 0_i64;
    let mut unchanged = 0_i64;
    let mut skipped = 0_i64;

    for path in ingest::list_files(&source_dir, recursive) {
        let file_type = ingest::classify(&path);
        if !file_type.is_supported() {
            skipped += 1;
            continue;
        }

        let fingerprint = match ingest::digest_file(&path, algorithm) {
            Ok(fp) => fp,
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping unreadable file");
                skipped += 1;
                continue;
            }
        };
        let size = fs::metadata(&path).map(|m| m.len() as i64).unwrap_or(0);
        let rel = path
            .strip_prefix(&source_dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();

        let stored = store.query(
            "SELECT content_hash FROM files WHERE file_path = ?1",
            &[Value::Text(rel.clone())],
        )?;

        match stored.first().and_then(|row| row.get_str("content_hash")) {
            None => {
                store.insert(
                    "files",
                    &Row::new()
                        .set_text("file_path", rel)
                        .set_text("file_type", file_type.as_str())
                        .set_text("hash_algorithm", algorithm.as_str())
                        .set_text("content_hash", fingerprint.hex())
                        .set("file_size", size)
                        .set_text("scanned_at", started_at.clone()),
                )?;
                new_files += 1;
            }
            Some(previous) if previous != fingerprint.hex() => {
                store.update(
                    "files",
                    &Row::new()
                        .set_text("hash_algorithm", algorithm.as_str())
                        .set_text("content_hash", fingerprint.hex())
                        .set("file_size", size)
                        .set_text("scanned_at", started_at.clone()),
                    &Row::new().set_text("file_path", rel),
                )?;
                changed += 1;
            }
            Some(_) => unchanged += 1,
        }
    }

    store.insert(
        "scan_runs",
        &Row::new()
            .set_text("started_at", started_at)
            .set("total_files", new_files + changed + unchanged)
            .set("new_files", new_files)
            .set("changed", changed)
            .set("unchanged", unchanged),
    )?;
    store.disconnect()?;

    println!("scan complete: {new_files} new, {changed} changed, {unchanged} unchanged, {skipped} skipped");
    Ok(())
}

/// Print store status: per-type file counts and the last scan run.
pub fn cmd_status(root: &Path, project: &str) -> Result<()> {
    let layout = ProjectLayout::new(root, project);
    let mut cache = ConfigCache::new();
    let config = cache.load(layout.config_file())?;

    let store = open_store(&layout, &config);
    if !store.table_exists("files")? {
        println!("project '{project}': metadata store not initialized");
        return Ok(());
    }

    let counts = store.query(
        "SELECT file_type, COUNT(*) AS n FROM files GROUP BY file_type ORDER BY n DESC",
        &[],
    )?;
    println!("project '{project}'");
    for row in &counts {
        println!(
            "  {:<12} {}",
            row.get_str("file_type").unwrap_or("?"),
            row.get_i64("n").unwrap_or(0),
        );
    }

    let last = store.query(
        "SELECT started_at, total_files, new_files, changed, unchanged \
         FROM scan_runs ORDER BY run_id DESC LIMIT 1",
        &[],
    )?;
    match last.first() {
        Some(run) => println!(
            "last scan: {} ({} files, {} new, {} changed)",
            run.get_str("started_at").unwrap_or("?"),
            run.get_i64("total_files").unwrap_or(0),
            run.get_i64("new_files").unwrap_or(0),
            run.get_i64("changed").unwrap_or(0),
        ),
        None => println!("last scan: never"),
    }

    store.disconnect()?;
    Ok(())
}

fn open_store(layout: &ProjectLayout, config: &serde_json::Value) -> MetaStore {
    MetaStore::new(layout.resolve(get_str(config, "database.file", "db/metadata.db")))
}
