//! RxTrack Store - SQLite persistence layer
//!
//! Provides:
//! - Connection management with foreign key enforcement
//! - Embedded, checksummed migrations framework
//! - One repository per entity with explicit relationship fetches
//!
//! No global connection exists: every repository function takes the
//! `&Connection` it operates on.

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{DrugRepo, PatientRepo, PharmacistRepo, PrescriptionRepo};
