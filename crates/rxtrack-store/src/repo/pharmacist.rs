//! Pharmacist repository

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, is_fk_violation, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rxtrack_core::{NewPharmacist, Pharmacist, PharmacistUpdate, Prescription, RxError};
use tracing::debug;

use super::prescription::PrescriptionRepo;

/// SQLite repository for Pharmacists
pub struct PharmacistRepo;

impl PharmacistRepo {
    /// Create a Pharmacist and return it with its assigned id
    ///
    /// # Errors
    /// * `Validation` - If the name is blank
    pub fn create(conn: &Connection, input: NewPharmacist) -> Result<Pharmacist> {
        input.validate()?;

        conn.execute(
            "INSERT INTO pharmacists (name, pharmacy) VALUES (?1, ?2)",
            params![input.name, input.pharmacy],
        )
        .map_err(from_rusqlite)?;

        let id = conn.last_insert_rowid();
        debug!(pharmacist_id = id, "created pharmacist");

        Ok(Pharmacist {
            id,
            name: input.name,
            pharmacy: input.pharmacy,
        })
    }

    /// Get a Pharmacist by id
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Pharmacist>> {
        conn.query_row(
            "SELECT id, name, pharmacy FROM pharmacists WHERE id = ?1",
            [id],
            Self::from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List all Pharmacists ordered by id
    pub fn list(conn: &Connection) -> Result<Vec<Pharmacist>> {
        let mut stmt = conn
            .prepare("SELECT id, name, pharmacy FROM pharmacists ORDER BY id")
            .map_err(from_rusqlite)?;

        let pharmacists = stmt
            .query_map([], Self::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(pharmacists)
    }

    /// Apply a partial update and return the updated Pharmacist
    ///
    /// # Errors
    /// * `NotFound` - If no pharmacist has this id
    /// * `Validation` - If a provided name is blank
    pub fn update(conn: &Connection, id: i64, changes: PharmacistUpdate) -> Result<Pharmacist> {
        changes.validate()?;

        let mut pharmacist = Self::get(conn, id)?.ok_or(RxError::NotFound {
            entity: "pharmacist",
            id,
        })?;
        if let Some(name) = changes.name {
            pharmacist.name = name;
        }
        if let Some(pharmacy) = changes.pharmacy {
            pharmacist.pharmacy = Some(pharmacy);
        }

        conn.execute(
            "UPDATE pharmacists SET name = ?1, pharmacy = ?2 WHERE id = ?3",
            params![pharmacist.name, pharmacist.pharmacy, id],
        )
        .map_err(from_rusqlite)?;

        Ok(pharmacist)
    }

    /// Delete a Pharmacist
    ///
    /// # Errors
    /// * `NotFound` - If no pharmacist has this id
    /// * `StillReferenced` - If prescriptions still reference the pharmacist
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM pharmacists WHERE id = ?1", [id])
            .map_err(|e| {
                if is_fk_violation(&e) {
                    RxError::StillReferenced {
                        entity: "pharmacist",
                        id,
                    }
                } else {
                    from_rusqlite(e)
                }
            })?;

        if deleted == 0 {
            return Err(RxError::NotFound {
                entity: "pharmacist",
                id,
            });
        }
        debug!(pharmacist_id = id, "deleted pharmacist");
        Ok(())
    }

    /// Fetch the prescriptions dispensed by a Pharmacist
    ///
    /// # Errors
    /// * `NotFound` - If no pharmacist has this id
    pub fn prescriptions(conn: &Connection, id: i64) -> Result<Vec<Prescription>> {
        if Self::get(conn, id)?.is_none() {
            return Err(RxError::NotFound {
                entity: "pharmacist",
                id,
            });
        }

        let mut stmt = conn
            .prepare(
                "SELECT id, drug_id, patient_id, pharmacist_id, created_at, instructions, status
                 FROM prescriptions WHERE pharmacist_id = ?1 ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let prescriptions = stmt
            .query_map([id], PrescriptionRepo::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(prescriptions)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Pharmacist> {
        Ok(Pharmacist {
            id: row.get(0)?,
            name: row.get(1)?,
            pharmacy: row.get(2)?,
        })
    }
}
