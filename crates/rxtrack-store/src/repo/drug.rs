//! Drug repository
//!
//! Maps the UNIQUE constraint on ndc_id to the duplicate-NDC error

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, is_fk_violation, is_unique_violation, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rxtrack_core::{Drug, DrugUpdate, NewDrug, Prescription, RxError};
use tracing::debug;

use super::prescription::PrescriptionRepo;

/// SQLite repository for Drugs
pub struct DrugRepo;

impl DrugRepo {
    /// Create a Drug and return it with its assigned id
    ///
    /// # Errors
    /// * `Validation` - If the name is blank, or the NDC is blank or too long
    /// * `DuplicateNdc` - If another drug already carries this NDC
    pub fn create(conn: &Connection, input: NewDrug) -> Result<Drug> {
        input.validate()?;

        conn.execute(
            "INSERT INTO drugs (ndc_id, name, description, dosage_form, strength)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                input.ndc_id,
                input.name,
                input.description,
                input.dosage_form,
                input.strength,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                RxError::DuplicateNdc {
                    ndc_id: input.ndc_id.clone(),
                }
            } else {
                from_rusqlite(e)
            }
        })?;

        let id = conn.last_insert_rowid();
        debug!(drug_id = id, ndc_id = %input.ndc_id, "created drug");

        Ok(Drug {
            id,
            ndc_id: input.ndc_id,
            name: input.name,
            description: input.description,
            dosage_form: input.dosage_form,
            strength: input.strength,
        })
    }

    /// Get a Drug by id
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Drug>> {
        conn.query_row(
            "SELECT id, ndc_id, name, description, dosage_form, strength FROM drugs WHERE id = ?1",
            [id],
            Self::from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List all Drugs ordered by id
    pub fn list(conn: &Connection) -> Result<Vec<Drug>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, ndc_id, name, description, dosage_form, strength
                 FROM drugs ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let drugs = stmt
            .query_map([], Self::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(drugs)
    }

    /// Apply a partial update and return the updated Drug
    ///
    /// # Errors
    /// * `NotFound` - If no drug has this id
    /// * `Validation` - If a provided field fails validation
    /// * `DuplicateNdc` - If a provided NDC collides with another drug
    pub fn update(conn: &Connection, id: i64, changes: DrugUpdate) -> Result<Drug> {
        changes.validate()?;

        let mut drug = Self::get(conn, id)?.ok_or(RxError::NotFound { entity: "drug", id })?;
        if let Some(ndc_id) = changes.ndc_id {
            drug.ndc_id = ndc_id;
        }
        if let Some(name) = changes.name {
            drug.name = name;
        }
        if let Some(description) = changes.description {
            drug.description = Some(description);
        }
        if let Some(dosage_form) = changes.dosage_form {
            drug.dosage_form = Some(dosage_form);
        }
        if let Some(strength) = changes.strength {
            drug.strength = Some(strength);
        }

        conn.execute(
            "UPDATE drugs SET ndc_id = ?1, name = ?2, description = ?3, dosage_form = ?4, strength = ?5
             WHERE id = ?6",
            params![
                drug.ndc_id,
                drug.name,
                drug.description,
                drug.dosage_form,
                drug.strength,
                id,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                RxError::DuplicateNdc {
                    ndc_id: drug.ndc_id.clone(),
                }
            } else {
                from_rusqlite(e)
            }
        })?;

        Ok(drug)
    }

    /// Delete a Drug
    ///
    /// # Errors
    /// * `NotFound` - If no drug has this id
    /// * `StillReferenced` - If prescriptions still reference the drug
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM drugs WHERE id = ?1", [id])
            .map_err(|e| {
                if is_fk_violation(&e) {
                    RxError::StillReferenced { entity: "drug", id }
                } else {
                    from_rusqlite(e)
                }
            })?;

        if deleted == 0 {
            return Err(RxError::NotFound { entity: "drug", id });
        }
        debug!(drug_id = id, "deleted drug");
        Ok(())
    }

    /// Fetch the prescriptions that dispense a Drug
    ///
    /// Never loaded implicitly; callers ask for this listing on demand.
    ///
    /// # Errors
    /// * `NotFound` - If no drug has this id
    pub fn prescriptions(conn: &Connection, id: i64) -> Result<Vec<Prescription>> {
        if Self::get(conn, id)?.is_none() {
            return Err(RxError::NotFound { entity: "drug", id });
        }

        let mut stmt = conn
            .prepare(
                "SELECT id, drug_id, patient_id, pharmacist_id, created_at, instructions, status
                 FROM prescriptions WHERE drug_id = ?1 ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let prescriptions = stmt
            .query_map([id], PrescriptionRepo::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(prescriptions)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Drug> {
        Ok(Drug {
            id: row.get(0)?,
            ndc_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            dosage_form: row.get(4)?,
            strength: row.get(5)?,
        })
    }
}
