//! RxTrack Core - pharmacy records domain model
//!
//! This crate provides the foundational data structures and rules for RxTrack,
//! including:
//! - Patient, Pharmacist, Drug, and Prescription models with input validation
//! - Per-edge relation policies that break cyclic serialization
//! - Wire conversion of entities to JSON mappings
//! - Canonical error taxonomy with stable codes
//! - Logging facility with environment profiles
//!
//! Persistence lives in rxtrack-store; this crate has no database dependency.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod wire;

// Re-export commonly used types
pub use errors::{Result, RxError};
pub use model::{
    Drug, DrugUpdate, NewDrug, NewPatient, NewPharmacist, NewPrescription, Patient, PatientUpdate,
    Pharmacist, PharmacistUpdate, Prescription, PrescriptionLinks, PrescriptionUpdate,
};
pub use wire::{
    drug_to_wire, patient_to_wire, pharmacist_to_wire, prescription_to_wire, RelationPolicy,
};
