pub mod drug;
pub mod patient;
pub mod pharmacist;
pub mod prescription;

pub use drug::{Drug, DrugUpdate, NewDrug};
pub use patient::{NewPatient, Patient, PatientUpdate};
pub use pharmacist::{NewPharmacist, Pharmacist, PharmacistUpdate};
pub use prescription::{NewPrescription, Prescription, PrescriptionLinks, PrescriptionUpdate};
