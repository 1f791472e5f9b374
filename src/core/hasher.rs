//! SHA-1 content hashing.
//!
//! MetaDefender indexes previous scans by SHA-1, so that is the digest used
//! as the cache key. Files are streamed in fixed-size blocks rather than
//! loaded whole.

use crate::core::error::{Result, ScanError};
use crate::core::types::ContentHash;

use sha1::{Digest, Sha1};
use std::io::Read;
use std::path::Path;

/// Default read block size in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Computes SHA-1 digests of files and readers.
///
/// # Examples
///
/// ```rust
/// use metascan::core::FileHasher;
///
/// let hasher = FileHasher::new();
/// let hash = hasher.hash_bytes(b"abc");
/// assert_eq!(hash.as_str(), "a9993e364706816aba3e25717850c26c9cd0d89d");
/// ```
#[derive(Debug, Clone)]
pub struct FileHasher {
    block_size: usize,
}

impl Default for FileHasher {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl FileHasher {
    /// Creates a hasher reading in 512-byte blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the read block size. Zero is bumped to one.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Returns the configured block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Hashes an in-memory buffer.
    pub fn hash_bytes(&self, data: &[u8]) -> ContentHash {
        let mut hasher = Sha1::new();
        hasher.update(data);
        ContentHash::new(format!("{:x}", hasher.finalize()))
    }

    /// Hashes the file at `path`.
    ///
    /// A missing file maps to `ScanError::FileNotFound`; any other read
    /// failure is returned as `ScanError::Io`.
    pub fn hash_file(&self, path: &Path) -> Result<ContentHash> {
        let mut file = std::fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScanError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ScanError::Io(e)
            }
        })?;

        self.hash_reader(&mut file)
    }

    /// Hashes everything a reader yields, one block at a time.
    pub fn hash_reader<R: Read>(&self, reader: &mut R) -> Result<ContentHash> {
        let mut hasher = Sha1::new();
        let mut buffer = vec![0u8; self.block_size];

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ScanError::Io(e)),
            };
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(ContentHash::new(format!("{:x}", hasher.finalize())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_known_digests() {
        let hasher = FileHasher::new();
        assert_eq!(
            hasher.hash_bytes(b"").as_str(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            hasher.hash_bytes(b"abc").as_str(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_hash_file_matches_bytes() {
        // Spans several blocks and ends on a partial one.
        let data: Vec<u8> = (0..2000u32).map(|i| (i % 251) as u8).collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();

        let hasher = FileHasher::new();
        let from_file = hasher.hash_file(file.path()).unwrap();
        assert_eq!(from_file, hasher.hash_bytes(&data));
        assert_eq!(from_file.as_str().len(), ContentHash::HEX_LEN);
    }

    #[test]
    fn test_hash_deterministic() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"test data for hashing").unwrap();

        let hasher = FileHasher::new();
        let first = hasher.hash_file(file.path()).unwrap();
        let second = hasher.hash_file(file.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_block_size_does_not_change_digest() {
        let data = vec![7u8; 4096 + 13];
        let small = FileHasher::new().with_block_size(1);
        let large = FileHasher::new().with_block_size(64 * 1024);

        let a = small.hash_reader(&mut data.as_slice()).unwrap();
        let b = large.hash_reader(&mut data.as_slice()).unwrap();
        assert_eq!(a, b);
        assert_eq!(small.block_size(), 1);
    }

    #[test]
    fn test_hash_different_data() {
        let hasher = FileHasher::new();
        assert_ne!(hasher.hash_bytes(b"data1"), hasher.hash_bytes(b"data2"));
    }

    #[test]
    fn test_hash_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileHasher::new().hash_file(&dir.path().join("nope"));
        assert!(matches!(result, Err(ScanError::FileNotFound { .. })));
    }
}
