use thiserror::Error;

/// Result type alias using RxError
pub type Result<T> = std::result::Result<T, RxError>;

/// Canonical error taxonomy for RxTrack operations
///
/// Each variant maps to a stable error code via [`RxError::code`] so callers
/// (and the HTTP layer) can branch on errors without parsing messages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RxError {
    // ===== Validation Errors =====
    /// Input field failed validation (empty name, oversized NDC, ...)
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Drug NDC identifier already exists
    #[error("Duplicate NDC identifier: {ndc_id}")]
    DuplicateNdc { ndc_id: String },

    // ===== Reference Errors =====
    /// Entity not found in the store
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A prescription foreign key points at a row that does not exist
    #[error("{field} references missing {entity}: {id}")]
    MissingReference {
        entity: &'static str,
        field: &'static str,
        id: i64,
    },

    /// Entity cannot be deleted while prescriptions still reference it
    #[error("Cannot delete {entity} {id}: prescriptions still reference it")]
    StillReferenced { entity: &'static str, id: i64 },

    // ===== Migration Errors =====
    /// Migration SQL failed to execute
    #[error("Migration {migration_id} failed: {reason}")]
    Migration {
        migration_id: String,
        reason: String,
    },

    /// Applied migration SQL no longer matches its recorded checksum
    #[error("Checksum mismatch for migration {migration_id}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        migration_id: String,
        expected: String,
        actual: String,
    },

    // ===== Generic Errors =====
    /// Underlying database error
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl RxError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            RxError::Validation { .. } => "ERR_VALIDATION",
            RxError::DuplicateNdc { .. } => "ERR_DUPLICATE_NDC",
            RxError::NotFound { .. } => "ERR_NOT_FOUND",
            RxError::MissingReference { .. } => "ERR_MISSING_REFERENCE",
            RxError::StillReferenced { .. } => "ERR_STILL_REFERENCED",
            RxError::Migration { .. } => "ERR_MIGRATION",
            RxError::ChecksumMismatch { .. } => "ERR_MIGRATION_CHECKSUM",
            RxError::Persistence { .. } => "ERR_PERSISTENCE",
            RxError::Serialization { .. } => "ERR_SERIALIZATION",
        }
    }

    /// Build a validation error for a named field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RxError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Conversion from serde_json::Error to RxError
impl From<serde_json::Error> for RxError {
    fn from(err: serde_json::Error) -> Self {
        RxError::Serialization {
            message: err.to_string(),
        }
    }
}
