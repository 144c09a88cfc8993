use serde::{Deserialize, Serialize};

use crate::errors::{Result, RxError};

/// Patient - a person prescriptions are written for
///
/// A Patient owns zero or more Prescriptions through `prescription.patient_id`.
/// That listing is never embedded when a Patient is serialized; it is fetched
/// explicitly through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// Patient name
    pub name: String,

    /// Patient address
    pub address: Option<String>,

    /// Insurance type or company
    pub insurance: Option<String>,
}

impl Patient {
    /// Create a new Patient with the given ID and name
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            address: None,
            insurance: None,
        }
    }

    /// Check if this Patient has insurance on record
    pub fn has_insurance(&self) -> bool {
        self.insurance.is_some()
    }
}

/// Create payload for a Patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub address: Option<String>,
    pub insurance: Option<String>,
}

impl NewPatient {
    /// Validate the payload
    ///
    /// # Errors
    /// * `Validation` - If name is empty or whitespace-only
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RxError::validation(
                "name",
                "cannot be empty or whitespace-only",
            ));
        }
        Ok(())
    }
}

/// Partial update payload for a Patient
///
/// `None` fields are left unchanged. The id is never updatable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub insurance: Option<String>,
}

impl PatientUpdate {
    /// Validate the provided fields
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(RxError::validation(
                    "name",
                    "cannot be empty or whitespace-only",
                ));
            }
        }
        Ok(())
    }
}
