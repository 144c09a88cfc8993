use serde::{Deserialize, Serialize};

use crate::errors::{Result, RxError};

/// Pharmacist - the dispensing professional on a prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pharmacist {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// Pharmacist name
    pub name: String,

    /// Pharmacy name or affiliation
    pub pharmacy: Option<String>,
}

impl Pharmacist {
    /// Create a new Pharmacist with the given ID and name
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            pharmacy: None,
        }
    }
}

/// Create payload for a Pharmacist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPharmacist {
    pub name: String,
    pub pharmacy: Option<String>,
}

impl NewPharmacist {
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

/// Partial update payload for a Pharmacist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PharmacistUpdate {
    pub name: Option<String>,
    pub pharmacy: Option<String>,
}

impl PharmacistUpdate {
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
