//! Prescription repository
//!
//! Owns the only rows with foreign keys: create/update translate FK failures
//! into missing-reference errors, and `links` resolves the parent records a
//! serialized prescription embeds.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, is_fk_violation, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rxtrack_core::model::prescription::{created_timestamp, DEFAULT_STATUS};
use rxtrack_core::{
    NewPrescription, Prescription, PrescriptionLinks, PrescriptionUpdate, RxError,
};
use tracing::debug;

use super::{drug::DrugRepo, patient::PatientRepo, pharmacist::PharmacistRepo};

/// SQLite repository for Prescriptions
pub struct PrescriptionRepo;

impl PrescriptionRepo {
    /// Create a Prescription and return it with its assigned id
    ///
    /// `created_at` is assigned here, once; a missing status falls back to
    /// the default.
    ///
    /// # Errors
    /// * `MissingReference` - If a provided foreign key has no matching row
    pub fn create(conn: &Connection, input: NewPrescription) -> Result<Prescription> {
        let created_at = created_timestamp();
        let status = input
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());

        conn.execute(
            "INSERT INTO prescriptions (drug_id, patient_id, pharmacist_id, created_at, instructions, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.drug_id,
                input.patient_id,
                input.pharmacist_id,
                created_at.timestamp_millis(),
                input.instructions,
                status,
            ],
        )
        .map_err(|e| {
            if is_fk_violation(&e) {
                missing_reference(conn, input.drug_id, input.patient_id, input.pharmacist_id)
            } else {
                from_rusqlite(e)
            }
        })?;

        let id = conn.last_insert_rowid();
        debug!(prescription_id = id, "created prescription");

        Ok(Prescription {
            id,
            drug_id: input.drug_id,
            patient_id: input.patient_id,
            pharmacist_id: input.pharmacist_id,
            created_at,
            instructions: input.instructions,
            status,
        })
    }

    /// Get a Prescription by id
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Prescription>> {
        conn.query_row(
            "SELECT id, drug_id, patient_id, pharmacist_id, created_at, instructions, status
             FROM prescriptions WHERE id = ?1",
            [id],
            Self::from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List all Prescriptions ordered by id
    pub fn list(conn: &Connection) -> Result<Vec<Prescription>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, drug_id, patient_id, pharmacist_id, created_at, instructions, status
                 FROM prescriptions ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let prescriptions = stmt
            .query_map([], Self::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(prescriptions)
    }

    /// Apply a partial update and return the updated Prescription
    ///
    /// `created_at` never appears in the SET list; the creation timestamp
    /// survives every update.
    ///
    /// # Errors
    /// * `NotFound` - If no prescription has this id
    /// * `MissingReference` - If a provided foreign key has no matching row
    pub fn update(conn: &Connection, id: i64, changes: PrescriptionUpdate) -> Result<Prescription> {
        let mut prescription = Self::get(conn, id)?.ok_or(RxError::NotFound {
            entity: "prescription",
            id,
        })?;
        if let Some(drug_id) = changes.drug_id {
            prescription.drug_id = Some(drug_id);
        }
        if let Some(patient_id) = changes.patient_id {
            prescription.patient_id = Some(patient_id);
        }
        if let Some(pharmacist_id) = changes.pharmacist_id {
            prescription.pharmacist_id = Some(pharmacist_id);
        }
        if let Some(instructions) = changes.instructions {
            prescription.instructions = Some(instructions);
        }
        if let Some(status) = changes.status {
            prescription.status = status;
        }

        conn.execute(
            "UPDATE prescriptions
             SET drug_id = ?1, patient_id = ?2, pharmacist_id = ?3, instructions = ?4, status = ?5
             WHERE id = ?6",
            params![
                prescription.drug_id,
                prescription.patient_id,
                prescription.pharmacist_id,
                prescription.instructions,
                prescription.status,
                id,
            ],
        )
        .map_err(|e| {
            if is_fk_violation(&e) {
                missing_reference(
                    conn,
                    prescription.drug_id,
                    prescription.patient_id,
                    prescription.pharmacist_id,
                )
            } else {
                from_rusqlite(e)
            }
        })?;

        Ok(prescription)
    }

    /// Delete a Prescription
    ///
    /// # Errors
    /// * `NotFound` - If no prescription has this id
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM prescriptions WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;

        if deleted == 0 {
            return Err(RxError::NotFound {
                entity: "prescription",
                id,
            });
        }
        debug!(prescription_id = id, "deleted prescription");
        Ok(())
    }

    /// Resolve the parent records a Prescription links to
    ///
    /// Each lookup that finds no row yields `None`; an unset key and a
    /// dangling key both degrade the same way.
    pub fn links(conn: &Connection, prescription: &Prescription) -> Result<PrescriptionLinks> {
        let drug = match prescription.drug_id {
            Some(id) => DrugRepo::get(conn, id)?,
            None => None,
        };
        let patient = match prescription.patient_id {
            Some(id) => PatientRepo::get(conn, id)?,
            None => None,
        };
        let pharmacist = match prescription.pharmacist_id {
            Some(id) => PharmacistRepo::get(conn, id)?,
            None => None,
        };

        Ok(PrescriptionLinks {
            drug,
            patient,
            pharmacist,
        })
    }

    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Prescription> {
        let created_at_ms: i64 = row.get(4)?;
        Ok(Prescription {
            id: row.get(0)?,
            drug_id: row.get(1)?,
            patient_id: row.get(2)?,
            pharmacist_id: row.get(3)?,
            created_at: chrono::DateTime::from_timestamp_millis(created_at_ms)
                .unwrap_or_else(chrono::Utc::now),
            instructions: row.get(5)?,
            status: row.get(6)?,
        })
    }
}

/// Work out which foreign key a constraint failure was about
///
/// SQLite reports an FK violation without naming the key, so each provided
/// parent is looked up to find the one that is gone.
fn missing_reference(
    conn: &Connection,
    drug_id: Option<i64>,
    patient_id: Option<i64>,
    pharmacist_id: Option<i64>,
) -> RxError {
    if let Some(id) = drug_id {
        if parent_missing(conn, "SELECT 1 FROM drugs WHERE id = ?1", id) {
            return RxError::MissingReference {
                entity: "drug",
                field: "drug_id",
                id,
            };
        }
    }
    if let Some(id) = patient_id {
        if parent_missing(conn, "SELECT 1 FROM patients WHERE id = ?1", id) {
            return RxError::MissingReference {
                entity: "patient",
                field: "patient_id",
                id,
            };
        }
    }
    if let Some(id) = pharmacist_id {
        if parent_missing(conn, "SELECT 1 FROM pharmacists WHERE id = ?1", id) {
            return RxError::MissingReference {
                entity: "pharmacist",
                field: "pharmacist_id",
                id,
            };
        }
    }

    RxError::Persistence {
        message: "foreign key constraint failed".to_string(),
    }
}

fn parent_missing(conn: &Connection, sql: &str, id: i64) -> bool {
    conn.query_row(sql, [id], |_| Ok(()))
        .optional()
        .ok()
        .flatten()
        .is_none()
}
