//! Core value types used throughout the metascan library.
//!
//! This module defines the scan target, the content hash used as the remote
//! cache key, and the tracking identifier handed out by the upload endpoint.

use crate::core::error::{Result, ScanError};

use std::fmt;
use std::path::{Path, PathBuf};

/// A file on disk that is about to be scanned.
///
/// The target is validated once with [`ScanTarget::resolve`] and never
/// mutated afterwards.
///
/// # Examples
///
/// ```rust
/// use metascan::core::ScanTarget;
///
/// let target = ScanTarget::new("/tmp/sample.exe");
/// assert_eq!(target.filename(), Some("sample.exe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    path: PathBuf,
}

impl ScanTarget {
    /// Creates a target for the given path without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Canonicalizes the path and checks that it points to an existing file.
    ///
    /// Returns `ScanError::FileNotFound` when nothing exists at the path.
    pub fn resolve(&self) -> Result<Self> {
        match std::fs::canonicalize(&self.path) {
            Ok(path) => Ok(Self { path }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ScanError::FileNotFound {
                path: self.path.display().to_string(),
            }),
            Err(e) => Err(ScanError::Io(e)),
        }
    }

    /// Returns the path of the target.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the final path component, used as the upload filename.
    pub fn filename(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Lowercase hexadecimal SHA-1 digest of a file's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Length of a SHA-1 digest rendered as hex.
    pub const HEX_LEN: usize = 40;

    /// Wraps an already computed hex digest.
    ///
    /// Uppercase input is normalized to lowercase.
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into().to_ascii_lowercase())
    }

    /// Returns the digest as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha1:{}", self.0)
    }
}

/// Opaque identifier returned by the upload endpoint (`data_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingId(String);

impl TrackingId {
    /// Wraps an identifier returned by the service.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_filename() {
        let target = ScanTarget::new("/samples/invoice.pdf");
        assert_eq!(target.filename(), Some("invoice.pdf"));
        assert_eq!(target.path(), Path::new("/samples/invoice.pdf"));
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = ScanTarget::new(dir.path().join("absent.bin"));

        match target.resolve() {
            Err(ScanError::FileNotFound { path }) => assert!(path.ends_with("absent.bin")),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("present.bin");
        std::fs::write(&path, b"data").unwrap();

        let resolved = ScanTarget::new(&path).resolve().unwrap();
        assert!(resolved.path().is_absolute());
        assert_eq!(resolved.filename(), Some("present.bin"));
    }

    #[test]
    fn test_content_hash_normalized() {
        let hash = ContentHash::new("ABCDEF");
        assert_eq!(hash.as_str(), "abcdef");
        assert_eq!(hash.to_string(), "sha1:abcdef");
    }

    #[test]
    fn test_tracking_id_display() {
        let id = TrackingId::new("bzIwMzExOEJ4");
        assert_eq!(id.to_string(), "bzIwMzExOEJ4");
        assert_eq!(id.as_str(), "bzIwMzExOEJ4");
    }
}
