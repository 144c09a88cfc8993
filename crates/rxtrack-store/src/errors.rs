//! Error handling for rxtrack-store
//!
//! Wraps rxtrack-core RxError with store-specific helpers

use rusqlite::ffi::{SQLITE_CONSTRAINT_FOREIGNKEY, SQLITE_CONSTRAINT_UNIQUE};
use rxtrack_core::RxError;

/// Result type alias using RxError
pub type Result<T> = std::result::Result<T, RxError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> RxError {
    RxError::Persistence {
        message: err.to_string(),
    }
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> RxError {
    RxError::Migration {
        migration_id: migration_id.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> RxError {
    RxError::ChecksumMismatch {
        migration_id: migration_id.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

/// Check whether a rusqlite error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Check whether a rusqlite error is a FOREIGN KEY constraint violation
pub fn is_fk_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == SQLITE_CONSTRAINT_FOREIGNKEY
    )
}
