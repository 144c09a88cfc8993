//! Repository layer
//!
//! One stateless repository per entity. Every function takes the
//! `&Connection` it operates on; nothing holds connection state.
//! Relationship navigation is explicit: the parent repos expose
//! `prescriptions(...)` fetches and `PrescriptionRepo::links(...)` resolves
//! a prescription's parents.

pub mod drug;
pub mod patient;
pub mod pharmacist;
pub mod prescription;

pub use drug::DrugRepo;
pub use patient::PatientRepo;
pub use pharmacist::PharmacistRepo;
pub use prescription::PrescriptionRepo;
