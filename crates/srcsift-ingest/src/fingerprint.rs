//! Content fingerprinting for change detection.
//!
//! A fingerprint is a lowercase hexadecimal digest (md5 or sha256) of byte
//! content. The pipeline stores the digest of every file it has analyzed and
//! compares it against the current digest on the next run to decide whether
//! re-analysis is needed. Files are digested in fixed-size chunks so memory
//! use stays constant regardless of file size.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use md5::Md5;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{IngestError, IngestResult};

/// Chunk size for streaming file digests.
const CHUNK_SIZE: usize = 4096;

/// Supported digest algorithms.
///
/// The algorithm is an enum rather than a string, so an unsupported
/// algorithm cannot reach the digest functions at all; parsing an unknown
/// name fails with [`IngestError::UnsupportedAlgorithm`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl HashAlgorithm {
    /// Canonical lowercase name, as stored alongside digests in the metadata
    /// database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }

    /// Length of the hexadecimal digest this algorithm produces.
    pub fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha256 => 64,
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("md5") {
            Ok(Self::Md5)
        } else if s.eq_ignore_ascii_case("sha256") {
            Ok(Self::Sha256)
        } else {
            Err(IngestError::UnsupportedAlgorithm(s.to_string()))
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content digest tagged with the algorithm that produced it.
///
/// Digests from different algorithms are never comparable; equality checks
/// include the algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    algorithm: HashAlgorithm,
    hex: String,
}

impl Fingerprint {
    /// The algorithm that produced this digest.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Lowercase hexadecimal digest (32 chars for md5, 64 for sha256).
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Compare against a previously stored digest string.
    pub fn matches(&self, stored: &str) -> bool {
        self.hex == stored
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Digest a byte sequence.
pub fn digest_bytes(content: &[u8], algorithm: HashAlgorithm) -> Fingerprint {
    let hex = match algorithm {
        HashAlgorithm::Md5 => to_hex(&Md5::digest(content)),
        HashAlgorithm::Sha256 => to_hex(&Sha256::digest(content)),
    };
    Fingerprint { algorithm, hex }
}

/// Digest a text string (its UTF-8 bytes).
pub fn digest_text(content: &str, algorithm: HashAlgorithm) -> Fingerprint {
    digest_bytes(content.as_bytes(), algorithm)
}

/// Digest a file's content, streaming in [`CHUNK_SIZE`] chunks.
pub fn digest_file(path: &Path, algorithm: HashAlgorithm) -> IngestResult<Fingerprint> {
    let file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;

    let hex = match algorithm {
        HashAlgorithm::Md5 => digest_reader::<Md5>(file),
        HashAlgorithm::Sha256 => digest_reader::<Sha256>(file),
    }
    .map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), %algorithm, "file fingerprinted");
    Ok(Fingerprint { algorithm, hex })
}

/// Has the file changed since `previous_hex` was recorded?
///
/// Fail-open: if the current digest cannot be computed (file deleted,
/// unreadable), the file is reported as changed so the pipeline re-analyzes
/// it rather than silently skipping it.
pub fn is_changed(path: &Path, previous_hex: &str, algorithm: HashAlgorithm) -> bool {
    match digest_file(path, algorithm) {
        Ok(current) => {
            let changed = !current.matches(previous_hex);
            debug!(path = %path.display(), changed, "change check");
            changed
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "could not fingerprint file, treating as changed");
            true
        }
    }
}

fn digest_reader<D: Digest>(mut reader: impl Read) -> std::io::Result<String> {
    let mut hasher = D::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(to_hex(&hasher.finalize()))
}

fn to_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn md5_is_32_lowercase_hex() {
        let fp = digest_text("hello", HashAlgorithm::Md5);
        assert_eq!(fp.hex(), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(fp.hex().len(), HashAlgorithm::Md5.hex_len());
    }

    #[test]
    fn sha256_is_64_hex() {
        let fp = digest_text("hello", HashAlgorithm::Sha256);
        assert_eq!(fp.hex().len(), 64);
        assert!(fp.hex().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!fp.hex().chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn digests_are_deterministic() {
        let a = digest_bytes(b"same content", HashAlgorithm::Md5);
        let b = digest_bytes(b"same content", HashAlgorithm::Md5);
        assert_eq!(a, b);
    }

    #[test]
    fn different_algorithms_never_compare_equal() {
        let md5 = digest_bytes(b"x", HashAlgorithm::Md5);
        let sha = digest_bytes(b"x", HashAlgorithm::Sha256);
        assert_ne!(md5, sha);
    }

    #[test]
    fn file_digest_matches_byte_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        fs::write(&path, b"chunked content").unwrap();

        let from_file = digest_file(&path, HashAlgorithm::Sha256).unwrap();
        let from_bytes = digest_bytes(b"chunked content", HashAlgorithm::Sha256);
        assert_eq!(from_file, from_bytes);
    }

    #[test]
    fn file_larger_than_one_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        let content = vec![0xAB_u8; CHUNK_SIZE * 3 + 17];
        fs::write(&path, &content).unwrap();

        let from_file = digest_file(&path, HashAlgorithm::Md5).unwrap();
        assert_eq!(from_file, digest_bytes(&content, HashAlgorithm::Md5));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = digest_file(Path::new("/no/such/file"), HashAlgorithm::Md5).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound(_)));
    }

    #[test]
    fn is_changed_detects_content_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "v1").unwrap();
        let original = digest_file(&path, HashAlgorithm::Md5).unwrap();

        assert!(!is_changed(&path, original.hex(), HashAlgorithm::Md5));

        fs::write(&path, "v2").unwrap();
        assert!(is_changed(&path, original.hex(), HashAlgorithm::Md5));
    }

    #[test]
    fn is_changed_fails_open_on_missing_file() {
        assert!(is_changed(
            Path::new("/no/such/file"),
            "0123456789abcdef0123456789abcdef",
            HashAlgorithm::Md5,
        ));
    }

    #[test]
    fn algorithm_parses_case_insensitively() {
        assert_eq!("MD5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!(
            "sha256".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha256
        );
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = "sha1".parse::<HashAlgorithm>().unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedAlgorithm(_)));
    }
}
