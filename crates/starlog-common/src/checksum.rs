//! Journal file identity via SHA-256
//!
//! Commanders re-copy and re-play journal directories; file content hashes
//! let the host recognize a file it has already ingested regardless of its
//! name or location.

use crate::error::{JournalError, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Compute the SHA-256 checksum of a file, hex-encoded
pub fn file_checksum(path: impl AsRef<Path>) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    reader_checksum(&mut file)
}

/// Compute the SHA-256 checksum of any readable source, hex-encoded
pub fn reader_checksum<R: Read>(reader: &mut R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Verify that a file matches an expected checksum
pub fn verify_file_checksum(path: impl AsRef<Path>, expected: &str) -> Result<()> {
    let actual = file_checksum(path)?;
    if actual == expected {
        Ok(())
    } else {
        Err(JournalError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}
