//! Encoding-resilient text file reading and writing.
//!
//! Source trees in the wild mix UTF-8 with legacy Korean encodings, so
//! reads walk a fixed fallback chain: strict UTF-8, UTF-8 with a BOM,
//! then CP949 and EUC-KR. Only when every encoding fails is the file
//! reported as undecodable; non-decoding I/O errors surface immediately
//! without entering the chain.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::EUC_KR;
use tracing::{debug, info};

use crate::error::{IngestError, IngestResult};

/// Encodings attempted, in order. CP949 and EUC-KR both resolve to
/// encoding_rs's `EUC_KR` decoder (the windows-949 superset table).
pub const FALLBACK_ENCODINGS: [&str; 4] = ["utf-8", "utf-8-sig", "cp949", "euc-kr"];

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// The result of reading one file: raw bytes plus the decoded text when
/// decoding succeeded. Constructed per read call, never persisted.
#[derive(Debug, Clone)]
pub struct FileContent {
    path: PathBuf,
    bytes: Vec<u8>,
    text: Option<String>,
    encoding: Option<&'static str>,
}

impl FileContent {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The decoded text, if any encoding in the chain succeeded.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The encoding that successfully decoded the content.
    pub fn encoding(&self) -> Option<&'static str> {
        self.encoding
    }
}

/// Read a file's bytes and attempt to decode them.
///
/// A decode failure is not an error here: the bytes are kept and
/// [`FileContent::text`] is `None`. A missing file or any other I/O error
/// is an error.
pub fn read_file(path: &Path) -> IngestResult<FileContent> {
    let bytes = fs::read(path).map_err(|e| IngestError::from_io(path, e))?;

    let (text, encoding) = match decode(&bytes) {
        Some((text, encoding)) => {
            if encoding != "utf-8" {
                info!(path = %path.display(), encoding, "decoded with fallback encoding");
            }
            (Some(text), Some(encoding))
        }
        None => (None, None),
    };

    Ok(FileContent {
        path: path.to_path_buf(),
        bytes,
        text,
        encoding,
    })
}

/// Read a file as text, or fail with [`IngestError::DecodeFailure`] if the
/// whole fallback chain is exhausted.
pub fn read_text(path: &Path) -> IngestResult<String> {
    let content = read_file(path)?;
    match content.text {
        Some(text) => {
            debug!(path = %path.display(), "file read");
            Ok(text)
        }
        None => Err(IngestError::DecodeFailure {
            path: path.to_path_buf(),
            attempted: FALLBACK_ENCODINGS.to_vec(),
        }),
    }
}

/// Write text to a file as UTF-8, creating missing parent directories and
/// overwriting any existing content.
pub fn write_text(path: &Path, content: &str) -> IngestResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| IngestError::WriteFailure {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(path, content).map_err(|e| IngestError::WriteFailure {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), "file written");
    Ok(())
}

/// Walk the fallback chain over raw bytes, returning the decoded text and
/// the label of the encoding that accepted it.
fn decode(bytes: &[u8]) -> Option<(String, &'static str)> {
    for &label in &FALLBACK_ENCODINGS {
        let decoded = match label {
            "utf-8" => std::str::from_utf8(bytes).ok().map(str::to_owned),
            "utf-8-sig" => bytes
                .strip_prefix(&UTF8_BOM)
                .and_then(|rest| std::str::from_utf8(rest).ok())
                .map(str::to_owned),
            // Both labels share the windows-949 table; see FALLBACK_ENCODINGS.
            "cp949" | "euc-kr" => {
                let (text, had_errors) = EUC_KR.decode_without_bom_handling(bytes);
                (!had_errors).then(|| text.into_owned())
            }
            _ => None,
        };
        if let Some(text) = decoded {
            return Some((text, label));
        }
    }
    None
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/nested/dir/out.txt");

        write_text(&path, "hello").unwrap();
        assert_eq!(read_text(&path).unwrap(), "hello");
    }

    #[test]
    fn write_overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");

        write_text(&path, "first").unwrap();
        write_text(&path, "second").unwrap();
        assert_eq!(read_text(&path).unwrap(), "second");
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = read_text(Path::new("/no/such/file.txt")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound(_)));
    }

    #[test]
    fn plain_utf8_decodes_with_first_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utf8.txt");
        fs::write(&path, "plain ascii and 한글").unwrap();

        let content = read_file(&path).unwrap();
        assert_eq!(content.encoding(), Some("utf-8"));
        assert_eq!(content.text(), Some("plain ascii and 한글"));
    }

    #[test]
    fn euc_kr_file_falls_through_the_chain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.txt");
        // "한글" in EUC-KR; invalid as UTF-8.
        fs::write(&path, [0xC7, 0xD1, 0xB1, 0xDB]).unwrap();

        let content = read_file(&path).unwrap();
        assert_eq!(content.text(), Some("한글"));
        assert_eq!(content.encoding(), Some("cp949"));

        assert_eq!(read_text(&path).unwrap(), "한글");
    }

    #[test]
    fn undecodable_bytes_fail_with_attempted_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.bin");
        // 0xFF is an invalid byte in UTF-8 and in EUC-KR.
        fs::write(&path, [0xFF, 0xFF, 0xFE]).unwrap();

        let err = read_text(&path).unwrap_err();
        match err {
            IngestError::DecodeFailure { attempted, .. } => {
                assert_eq!(attempted, FALLBACK_ENCODINGS.to_vec());
            }
            other => panic!("expected DecodeFailure, got {other:?}"),
        }

        // read_file keeps the bytes even when decoding fails.
        let content = read_file(&path).unwrap();
        assert!(content.text().is_none());
        assert_eq!(content.bytes(), [0xFF, 0xFF, 0xFE]);
    }

    #[test]
    fn utf8_bom_content_still_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("with bom".as_bytes());
        fs::write(&path, &bytes).unwrap();

        let text = read_text(&path).unwrap();
        assert!(text.ends_with("with bom"));
    }
}
