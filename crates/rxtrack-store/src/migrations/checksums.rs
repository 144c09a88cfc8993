//! SHA256 checksums over embedded migration SQL
//!
//! The runner records one checksum per applied migration so a later run can
//! detect edits to SQL that already shaped the database.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA256 digest of the given SQL text
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
