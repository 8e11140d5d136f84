//! Directory listing and per-file metadata.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{IngestError, IngestResult};
use crate::filetype::{self, FileType};
use crate::fingerprint::{self, HashAlgorithm};

/// List the files under `directory`, optionally recursing.
///
/// A missing directory is not an error; it logs a warning and yields an
/// empty list so callers can treat "nothing there yet" uniformly.
pub fn list_files(directory: &Path, recursive: bool) -> Vec<PathBuf> {
    if !directory.exists() {
        warn!(directory = %directory.display(), "directory does not exist");
        return Vec::new();
    }

    let mut walker = WalkDir::new(directory);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_file() => Some(e.into_path()),
            Ok(_) => None,
            Err(err) => {
                warn!(%err, "skipping unreadable directory entry");
                None
            }
        })
        .collect();

    debug!(directory = %directory.display(), count = files.len(), "listed files");
    files
}

/// Everything the pipeline records about a file in one pass: size,
/// modification time, classification and both fingerprints.
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    pub extension: Option<String>,
    pub file_type: FileType,
    pub md5: String,
    pub sha256: String,
}

/// Stat and fingerprint a single file.
pub fn file_info(path: &Path) -> IngestResult<FileInfo> {
    let metadata = fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;

    let md5 = fingerprint::digest_file(path, HashAlgorithm::Md5)?;
    let sha256 = fingerprint::digest_file(path, HashAlgorithm::Sha256)?;

    Ok(FileInfo {
        path: path.to_path_buf(),
        size: metadata.len(),
        modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_owned),
        file_type: filetype::classify(path),
        md5: md5.hex().to_owned(),
        sha256: sha256.hex().to_owned(),
    })
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_yields_empty_list() {
        assert!(list_files(Path::new("/no/such/dir"), true).is_empty());
    }

    #[test]
    fn recursive_listing_finds_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.java"), "class A {}").unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/deeper/b.xml"), "<b/>").unwrap();

        let files = list_files(dir.path(), true);
        assert_eq!(files.len(), 2);

        let flat = list_files(dir.path(), false);
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn file_info_collects_both_fingerprints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Svc.java");
        fs::write(&path, "public class Svc {}").unwrap();

        let info = file_info(&path).unwrap();
        assert_eq!(info.size, 19);
        assert_eq!(info.file_type, FileType::Java);
        assert_eq!(info.extension.as_deref(), Some("java"));
        assert_eq!(info.md5.len(), 32);
        assert_eq!(info.sha256.len(), 64);
        assert!(info.modified.is_some());
    }

    #[test]
    fn file_info_on_missing_file_errors() {
        let err = file_info(Path::new("/no/such/file.java")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound(_)));
    }
}
