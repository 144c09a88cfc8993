use serde::{Deserialize, Serialize};

use crate::errors::{Result, RxError};

/// Maximum length of an NDC identifier
pub const NDC_MAX_LEN: usize = 10;

/// Drug - a medication identified by its NDC code
///
/// The `ndc_id` is globally unique; the store rejects duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drug {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// National Drug Code identifier (unique, at most 10 characters)
    pub ndc_id: String,

    /// Drug name
    pub name: String,

    /// Description
    pub description: Option<String>,

    /// Form (tablet, capsule, etc.)
    pub dosage_form: Option<String>,

    /// Drug strength
    pub strength: Option<String>,
}

impl Drug {
    /// Create a new Drug with the given ID, NDC identifier, and name
    pub fn new(id: i64, ndc_id: String, name: String) -> Self {
        Self {
            id,
            ndc_id,
            name,
            description: None,
            dosage_form: None,
            strength: None,
        }
    }
}

/// Validate an NDC identifier: non-blank and at most [`NDC_MAX_LEN`] characters
fn validate_ndc(ndc_id: &str) -> Result<()> {
    if ndc_id.trim().is_empty() {
        return Err(RxError::validation("ndc_id", "cannot be empty"));
    }
    if ndc_id.chars().count() > NDC_MAX_LEN {
        return Err(RxError::validation(
            "ndc_id",
            format!("cannot exceed {} characters", NDC_MAX_LEN),
        ));
    }
    Ok(())
}

/// Create payload for a Drug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDrug {
    pub ndc_id: String,
    pub name: String,
    pub description: Option<String>,
    pub dosage_form: Option<String>,
    pub strength: Option<String>,
}

impl NewDrug {
    /// Validate the payload
    ///
    /// # Errors
    /// * `Validation` - If name is blank, or the NDC is blank or too long
    pub fn validate(&self) -> Result<()> {
        validate_ndc(&self.ndc_id)?;
        if self.name.trim().is_empty() {
            return Err(RxError::validation(
                "name",
                "cannot be empty or whitespace-only",
            ));
        }
        Ok(())
    }
}

/// Partial update payload for a Drug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DrugUpdate {
    pub ndc_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub dosage_form: Option<String>,
    pub strength: Option<String>,
}

impl DrugUpdate {
    /// Validate the provided fields
    pub fn validate(&self) -> Result<()> {
        if let Some(ndc_id) = &self.ndc_id {
            validate_ndc(ndc_id)?;
        }
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
