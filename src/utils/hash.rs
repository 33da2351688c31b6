//! Content digests and stable identifiers using blake3.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let digest = hash::file_digest(path)?; // -> 64-char hex
//! let id = hash::stable_id("Templated", "pages/index.md"); // -> 32-char hex
//! ```

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Compute the blake3 digest of a file's contents as lowercase hex.
///
/// The file is streamed and the handle is closed before returning,
/// on success and on error alike.
pub fn file_digest(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize().as_bytes()))
}

/// Derive a deterministic identifier from a namespace and a key.
///
/// The same `(namespace, key)` pair always yields the same id, independent
/// of creation order or process.
pub fn stable_id(namespace: &str, key: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(namespace.as_bytes());
    hasher.update(&[0]);
    hasher.update(key.as_bytes());
    hex::encode(&hasher.finalize().as_bytes()[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_id_deterministic() {
        let a = stable_id("Templated", "pages/index.md");
        let b = stable_id("Templated", "pages/index.md");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_stable_id_distinct() {
        assert_ne!(
            stable_id("Templated", "pages/a.md"),
            stable_id("Templated", "pages/b.md")
        );
        // The separator keeps namespace/key boundaries unambiguous.
        assert_ne!(stable_id("ab", "c"), stable_id("a", "bc"));
    }

    #[test]
    fn test_file_digest() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("a.md");
        std::fs::write(&path, "The contents of INDEX").unwrap();

        let digest = file_digest(&path).unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(
            digest,
            hex::encode(blake3::hash(b"The contents of INDEX").as_bytes())
        );
    }

    #[test]
    fn test_file_digest_missing() {
        let err = file_digest(Path::new("/nonexistent/file.md")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
