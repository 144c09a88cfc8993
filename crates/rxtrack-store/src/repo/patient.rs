//! Patient repository

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, is_fk_violation, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rxtrack_core::{NewPatient, Patient, PatientUpdate, Prescription, RxError};
use tracing::debug;

use super::prescription::PrescriptionRepo;

/// SQLite repository for Patients
pub struct PatientRepo;

impl PatientRepo {
    /// Create a Patient and return it with its assigned id
    ///
    /// # Errors
    /// * `Validation` - If the name is blank
    pub fn create(conn: &Connection, input: NewPatient) -> Result<Patient> {
        input.validate()?;

        conn.execute(
            "INSERT INTO patients (name, address, insurance) VALUES (?1, ?2, ?3)",
            params![input.name, input.address, input.insurance],
        )
        .map_err(from_rusqlite)?;

        let id = conn.last_insert_rowid();
        debug!(patient_id = id, "created patient");

        Ok(Patient {
            id,
            name: input.name,
            address: input.address,
            insurance: input.insurance,
        })
    }

    /// Get a Patient by id
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Patient>> {
        conn.query_row(
            "SELECT id, name, address, insurance FROM patients WHERE id = ?1",
            [id],
            Self::from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List all Patients ordered by id
    pub fn list(conn: &Connection) -> Result<Vec<Patient>> {
        let mut stmt = conn
            .prepare("SELECT id, name, address, insurance FROM patients ORDER BY id")
            .map_err(from_rusqlite)?;

        let patients = stmt
            .query_map([], Self::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(patients)
    }

    /// Apply a partial update and return the updated Patient
    ///
    /// # Errors
    /// * `NotFound` - If no patient has this id
    /// * `Validation` - If a provided name is blank
    pub fn update(conn: &Connection, id: i64, changes: PatientUpdate) -> Result<Patient> {
        changes.validate()?;

        let mut patient = Self::get(conn, id)?.ok_or(RxError::NotFound {
            entity: "patient",
            id,
        })?;
        if let Some(name) = changes.name {
            patient.name = name;
        }
        if let Some(address) = changes.address {
            patient.address = Some(address);
        }
        if let Some(insurance) = changes.insurance {
            patient.insurance = Some(insurance);
        }

        conn.execute(
            "UPDATE patients SET name = ?1, address = ?2, insurance = ?3 WHERE id = ?4",
            params![patient.name, patient.address, patient.insurance, id],
        )
        .map_err(from_rusqlite)?;

        Ok(patient)
    }

    /// Delete a Patient
    ///
    /// # Errors
    /// * `NotFound` - If no patient has this id
    /// * `StillReferenced` - If prescriptions still reference the patient
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM patients WHERE id = ?1", [id])
            .map_err(|e| {
                if is_fk_violation(&e) {
                    RxError::StillReferenced {
                        entity: "patient",
                        id,
                    }
                } else {
                    from_rusqlite(e)
                }
            })?;

        if deleted == 0 {
            return Err(RxError::NotFound {
                entity: "patient",
                id,
            });
        }
        debug!(patient_id = id, "deleted patient");
        Ok(())
    }

    /// Fetch the prescriptions written for a Patient
    ///
    /// # Errors
    /// * `NotFound` - If no patient has this id
    pub fn prescriptions(conn: &Connection, id: i64) -> Result<Vec<Prescription>> {
        if Self::get(conn, id)?.is_none() {
            return Err(RxError::NotFound {
                entity: "patient",
                id,
            });
        }

        let mut stmt = conn
            .prepare(
                "SELECT id, drug_id, patient_id, pharmacist_id, created_at, instructions, status
                 FROM prescriptions WHERE patient_id = ?1 ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let prescriptions = stmt
            .query_map([id], PrescriptionRepo::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(prescriptions)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Patient> {
        Ok(Patient {
            id: row.get(0)?,
            name: row.get(1)?,
            address: row.get(2)?,
            insurance: row.get(3)?,
        })
    }
}
