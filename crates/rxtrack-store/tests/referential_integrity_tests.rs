// Integration tests for referential integrity
// Covers: foreign-key rejection on create/update, delete protection for
// referenced parents, NDC uniqueness, and graceful handling of legacy rows
// whose references no longer resolve

use rusqlite::Connection;
use rxtrack_store::repo::{DrugRepo, PatientRepo, PharmacistRepo, PrescriptionRepo};
use rxtrack_core::{wire, NewDrug, NewPatient, NewPharmacist, NewPrescription, RxError};
use serde_json::json;

fn setup_test_db() -> Connection {
    let mut conn =
        rxtrack_store::db::open_in_memory().expect("Failed to create in-memory database");
    rxtrack_store::db::configure(&conn).expect("Failed to configure connection");
    rxtrack_store::migrations::apply_migrations(&mut conn).expect("Failed to apply migrations");
    conn
}

fn seed_drug(conn: &Connection, ndc_id: &str, name: &str) -> i64 {
    DrugRepo::create(
        conn,
        NewDrug {
            ndc_id: ndc_id.to_string(),
            name: name.to_string(),
            description: None,
            dosage_form: None,
            strength: None,
        },
    )
    .unwrap()
    .id
}

#[test]
fn test_prescription_with_unknown_parents_rejected() {
    // Given: An empty database
    let conn = setup_test_db();

    // When: A prescription referencing a nonexistent pharmacist is created
    let result = PrescriptionRepo::create(
        &conn,
        NewPrescription {
            pharmacist_id: Some(77),
            ..Default::default()
        },
    );

    // Then: The missing reference is reported by name
    assert!(matches!(
        result,
        Err(RxError::MissingReference {
            entity: "pharmacist",
            field: "pharmacist_id",
            id: 77,
        })
    ));

    // And: Nothing was inserted
    assert!(PrescriptionRepo::list(&conn).unwrap().is_empty());
}

#[test]
fn test_delete_referenced_parent_rejected() {
    // Given: A patient and a drug, both referenced by a prescription
    let conn = setup_test_db();
    let drug_id = seed_drug(&conn, "0002-8215", "Aspirin");
    let patient = PatientRepo::create(
        &conn,
        NewPatient {
            name: "Jane Doe".to_string(),
            address: None,
            insurance: None,
        },
    )
    .unwrap();
    PrescriptionRepo::create(
        &conn,
        NewPrescription {
            drug_id: Some(drug_id),
            patient_id: Some(patient.id),
            ..Default::default()
        },
    )
    .unwrap();

    // When: Either parent is deleted
    let patient_result = PatientRepo::delete(&conn, patient.id);
    let drug_result = DrugRepo::delete(&conn, drug_id);

    // Then: Both deletions are refused while the reference stands
    assert!(matches!(
        patient_result,
        Err(RxError::StillReferenced {
            entity: "patient",
            ..
        })
    ));
    assert!(matches!(
        drug_result,
        Err(RxError::StillReferenced { entity: "drug", .. })
    ));
}

#[test]
fn test_parent_deletable_once_prescription_removed() {
    // Given: A pharmacist referenced by one prescription
    let conn = setup_test_db();
    let pharmacist = PharmacistRepo::create(
        &conn,
        NewPharmacist {
            name: "Sam Lee".to_string(),
            pharmacy: None,
        },
    )
    .unwrap();
    let prescription = PrescriptionRepo::create(
        &conn,
        NewPrescription {
            pharmacist_id: Some(pharmacist.id),
            ..Default::default()
        },
    )
    .unwrap();

    // When: The prescription is removed first
    PrescriptionRepo::delete(&conn, prescription.id).unwrap();

    // Then: The pharmacist can now be deleted
    assert!(PharmacistRepo::delete(&conn, pharmacist.id).is_ok());
    assert!(PharmacistRepo::get(&conn, pharmacist.id).unwrap().is_none());
}

#[test]
fn test_duplicate_ndc_rejected_across_inserts() {
    // Given: A drug registered under an NDC
    let conn = setup_test_db();
    seed_drug(&conn, "0002-8215", "Aspirin");

    // When: A second drug claims the same NDC
    let result = DrugRepo::create(
        &conn,
        NewDrug {
            ndc_id: "0002-8215".to_string(),
            name: "Generic aspirin".to_string(),
            description: None,
            dosage_form: None,
            strength: None,
        },
    );

    // Then: The insert fails with the duplicate NDC called out
    assert!(matches!(
        result,
        Err(RxError::DuplicateNdc { ref ndc_id }) if ndc_id == "0002-8215"
    ));

    // And: Only the original row remains
    assert_eq!(DrugRepo::list(&conn).unwrap().len(), 1);
}

#[test]
fn test_legacy_dangling_reference_serializes_as_null() {
    // Given: A database written before foreign keys were enforced, holding a
    // prescription whose drug row no longer exists
    let conn = setup_test_db();
    conn.pragma_update(None, "foreign_keys", "OFF").unwrap();
    conn.execute(
        "INSERT INTO prescriptions (drug_id, patient_id, pharmacist_id, created_at, instructions, status)
         VALUES (404, NULL, NULL, 1700000000000, NULL, 'pending')",
        [],
    )
    .unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();

    // When: The prescription is loaded and serialized
    let prescription = PrescriptionRepo::get(&conn, 1).unwrap().unwrap();
    let links = PrescriptionRepo::links(&conn, &prescription).unwrap();
    let value = wire::prescription_to_wire(&prescription, &links).unwrap();

    // Then: The raw key survives but the projection degrades to null
    assert_eq!(value.get("drug_id"), Some(&json!(404)));
    assert_eq!(value.get("drug"), Some(&json!(null)));
}
