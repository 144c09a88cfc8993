// Integration tests for record round trips
// Covers: create-read stability, default status, the full linked-prescription
// serialization scenario, and update behavior across the repo layer

use rusqlite::Connection;
use rxtrack_store::repo::{DrugRepo, PatientRepo, PharmacistRepo, PrescriptionRepo};
use rxtrack_core::{
    wire, NewDrug, NewPatient, NewPharmacist, NewPrescription, PrescriptionUpdate,
};
use serde_json::json;

fn setup_test_db() -> Connection {
    let mut conn =
        rxtrack_store::db::open_in_memory().expect("Failed to create in-memory database");
    rxtrack_store::db::configure(&conn).expect("Failed to configure connection");
    rxtrack_store::migrations::apply_migrations(&mut conn).expect("Failed to apply migrations");
    conn
}

#[test]
fn test_create_then_read_preserves_instructions_and_default_status() {
    // Given: A prescription created with instructions and no status
    let conn = setup_test_db();
    let created = PrescriptionRepo::create(
        &conn,
        NewPrescription {
            instructions: Some("Take twice daily".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    // When: It is read back
    let fetched = PrescriptionRepo::get(&conn, created.id).unwrap().unwrap();

    // Then: The instructions string survives byte-for-byte
    assert_eq!(fetched.instructions.as_deref(), Some("Take twice daily"));

    // And: The status defaulted
    assert_eq!(fetched.status, "pending");
}

#[test]
fn test_full_scenario_serializes_to_documented_shape() {
    // Given: One patient, one pharmacist, one drug
    let conn = setup_test_db();
    let patient = PatientRepo::create(
        &conn,
        NewPatient {
            name: "A".to_string(),
            address: None,
            insurance: None,
        },
    )
    .unwrap();
    let pharmacist = PharmacistRepo::create(
        &conn,
        NewPharmacist {
            name: "B".to_string(),
            pharmacy: None,
        },
    )
    .unwrap();
    let drug = DrugRepo::create(
        &conn,
        NewDrug {
            ndc_id: "12345".to_string(),
            name: "C".to_string(),
            description: None,
            dosage_form: None,
            strength: None,
        },
    )
    .unwrap();

    // When: A prescription links all three and is serialized with its relations
    let prescription = PrescriptionRepo::create(
        &conn,
        NewPrescription {
            drug_id: Some(drug.id),
            patient_id: Some(patient.id),
            pharmacist_id: Some(pharmacist.id),
            instructions: Some("X".to_string()),
            status: None,
        },
    )
    .unwrap();
    let links = PrescriptionRepo::links(&conn, &prescription).unwrap();
    let value = wire::prescription_to_wire(&prescription, &links).unwrap();

    // Then: The drug edge collapses to its name, the patient and pharmacist
    // edges to {id, name}, and the scalars come through untouched
    let expected = json!({
        "id": 1,
        "drug_id": 1,
        "patient_id": 1,
        "pharmacist_id": 1,
        "created_at": serde_json::to_value(prescription.created_at).unwrap(),
        "instructions": "X",
        "status": "pending",
        "drug": "C",
        "patient": {"id": 1, "name": "A"},
        "pharmacist": {"id": 1, "name": "B"},
    });
    assert_eq!(value, expected);
}

#[test]
fn test_patient_wire_omits_prescriptions_even_when_some_exist() {
    // Given: A patient with two prescriptions on file
    let conn = setup_test_db();
    let patient = PatientRepo::create(
        &conn,
        NewPatient {
            name: "Jane Doe".to_string(),
            address: Some("12 Elm St".to_string()),
            insurance: None,
        },
    )
    .unwrap();
    for _ in 0..2 {
        PrescriptionRepo::create(
            &conn,
            NewPrescription {
                patient_id: Some(patient.id),
                ..Default::default()
            },
        )
        .unwrap();
    }
    assert_eq!(PatientRepo::prescriptions(&conn, patient.id).unwrap().len(), 2);

    // When: The patient is serialized
    let value = wire::patient_to_wire(&patient).unwrap();

    // Then: No prescriptions key appears
    let obj = value.as_object().unwrap();
    assert!(!obj.contains_key("prescriptions"));
    assert_eq!(obj.get("name"), Some(&json!("Jane Doe")));
}

#[test]
fn test_update_keeps_created_at_and_reserializes() {
    // Given: A prescription with a linked drug
    let conn = setup_test_db();
    let drug = DrugRepo::create(
        &conn,
        NewDrug {
            ndc_id: "0002-8215".to_string(),
            name: "Aspirin".to_string(),
            description: None,
            dosage_form: None,
            strength: None,
        },
    )
    .unwrap();
    let created = PrescriptionRepo::create(
        &conn,
        NewPrescription {
            drug_id: Some(drug.id),
            ..Default::default()
        },
    )
    .unwrap();

    // When: Its status changes
    let updated = PrescriptionRepo::update(
        &conn,
        created.id,
        PrescriptionUpdate {
            status: Some("filled".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    // Then: The creation timestamp is untouched
    assert_eq!(updated.created_at, created.created_at);

    // And: Serialization reflects the new status and the same drug projection
    let links = PrescriptionRepo::links(&conn, &updated).unwrap();
    let value = wire::prescription_to_wire(&updated, &links).unwrap();
    assert_eq!(value.get("status"), Some(&json!("filled")));
    assert_eq!(value.get("drug"), Some(&json!("Aspirin")));
}

#[test]
fn test_list_returns_records_in_id_order() {
    // Given: Three patients created in sequence
    let conn = setup_test_db();
    for name in ["first", "second", "third"] {
        PatientRepo::create(
            &conn,
            NewPatient {
                name: name.to_string(),
                address: None,
                insurance: None,
            },
        )
        .unwrap();
    }

    // When: They are listed
    let patients = PatientRepo::list(&conn).unwrap();

    // Then: Ids ascend with insertion order
    let ids: Vec<i64> = patients.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(patients[0].name, "first");
}
