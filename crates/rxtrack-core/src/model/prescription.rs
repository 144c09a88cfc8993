use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{drug::Drug, patient::Patient, pharmacist::Pharmacist};

/// Status assigned to a prescription when none is provided
pub const DEFAULT_STATUS: &str = "pending";

/// Prescription - links a drug, a patient, and a pharmacist
///
/// All three foreign keys are nullable; a prescription can be recorded before
/// every party is known. `created_at` is assigned once at creation and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// Foreign key to Drug
    pub drug_id: Option<i64>,

    /// Foreign key to Patient
    pub patient_id: Option<i64>,

    /// Foreign key to Pharmacist
    pub pharmacist_id: Option<i64>,

    /// Timestamp of prescription (UTC, immutable after creation)
    pub created_at: DateTime<Utc>,

    /// Instructions for use
    pub instructions: Option<String>,

    /// Status of prescription (free-form, defaults to "pending")
    pub status: String,
}

impl Prescription {
    /// Check if this prescription still has the default status
    pub fn is_pending(&self) -> bool {
        self.status == DEFAULT_STATUS
    }

    /// Check if a drug is linked
    pub fn has_drug(&self) -> bool {
        self.drug_id.is_some()
    }
}

/// Current UTC time truncated to whole milliseconds
///
/// The store persists timestamps as epoch milliseconds, so the value handed
/// out at creation must already carry no finer precision: a created entity
/// compares equal to the same entity read back.
pub fn created_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Create payload for a Prescription
///
/// Every field is optional: the foreign keys may be filled in later, and a
/// missing status falls back to [`DEFAULT_STATUS`]. Referenced ids are
/// checked against existing rows by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NewPrescription {
    pub drug_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub pharmacist_id: Option<i64>,
    pub instructions: Option<String>,
    pub status: Option<String>,
}

/// Partial update payload for a Prescription
///
/// `created_at` is deliberately absent: the creation timestamp cannot be
/// rewritten through any update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PrescriptionUpdate {
    pub drug_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub pharmacist_id: Option<i64>,
    pub instructions: Option<String>,
    pub status: Option<String>,
}

/// The loaded relations of one prescription
///
/// `None` means the foreign key is unset or points at a row that no longer
/// exists; serialization treats both the same way (a `null` projection).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrescriptionLinks {
    pub drug: Option<Drug>,
    pub patient: Option<Patient>,
    pub pharmacist: Option<Pharmacist>,
}
