//! Wire conversion - entities to JSON mappings
//!
//! Every relationship edge carries exactly one [`RelationPolicy`] declared in
//! this module. All converters route through the same projection routine, so
//! changing an edge's policy changes its wire behavior everywhere at once.
//!
//! The policies break the Patient <-> Prescription (and Pharmacist/Drug <->
//! Prescription) cycles: the list side of each edge is excluded outright, and
//! a prescription embeds its parents only as reduced projections.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{Result, RxError};
use crate::model::{Drug, Patient, Pharmacist, Prescription, PrescriptionLinks};

/// How a relationship edge serializes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationPolicy {
    /// Embed the whole related record
    Full,
    /// The relation key never appears in the output
    Excluded,
    /// Reduced projection: an object containing only the named fields
    Fields(&'static [&'static str]),
    /// Reduced projection: the bare value of a single field
    Field(&'static str),
}

// ===== Edge policy table =====

/// Patient -> prescriptions
pub const PATIENT_PRESCRIPTIONS: RelationPolicy = RelationPolicy::Excluded;
/// Pharmacist -> prescriptions
pub const PHARMACIST_PRESCRIPTIONS: RelationPolicy = RelationPolicy::Excluded;
/// Drug -> prescriptions
pub const DRUG_PRESCRIPTIONS: RelationPolicy = RelationPolicy::Excluded;
/// Prescription -> drug: serialize as the bare drug name
pub const PRESCRIPTION_DRUG: RelationPolicy = RelationPolicy::Field("name");
/// Prescription -> patient: serialize as `{id, name}`
pub const PRESCRIPTION_PATIENT: RelationPolicy = RelationPolicy::Fields(&["id", "name"]);
/// Prescription -> pharmacist: serialize as `{id, name}`
pub const PRESCRIPTION_PHARMACIST: RelationPolicy = RelationPolicy::Fields(&["id", "name"]);

// ===== Projection routine =====

/// Serialize an entity's scalar fields into a JSON object
fn scalar_map<T: Serialize>(entity: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(RxError::Serialization {
            message: format!("entity did not serialize to an object: {}", other),
        }),
    }
}

/// Apply a policy to an already-serialized related value
///
/// Arrays are projected element-wise so the same policy works for to-many
/// edges. `Excluded` never reaches this point.
fn project(value: Value, policy: &RelationPolicy) -> Value {
    match policy {
        RelationPolicy::Full | RelationPolicy::Excluded => value,
        RelationPolicy::Fields(fields) => match value {
            Value::Object(map) => {
                let mut out = Map::new();
                for field in *fields {
                    out.insert(
                        (*field).to_string(),
                        map.get(*field).cloned().unwrap_or(Value::Null),
                    );
                }
                Value::Object(out)
            }
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| project(v, policy)).collect())
            }
            other => other,
        },
        RelationPolicy::Field(field) => match value {
            Value::Object(map) => map.get(*field).cloned().unwrap_or(Value::Null),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| project(v, policy)).collect())
            }
            other => other,
        },
    }
}

/// Insert a relation into a wire object according to its edge policy
///
/// - `Excluded` edges insert nothing, so the key is absent from the output
/// - a missing related record (`None`) inserts `null`, never an error; the
///   referenced row may have been deleted after the link was recorded
pub fn insert_relation<T: Serialize + ?Sized>(
    obj: &mut Map<String, Value>,
    key: &str,
    related: Option<&T>,
    policy: &RelationPolicy,
) -> Result<()> {
    if matches!(policy, RelationPolicy::Excluded) {
        return Ok(());
    }
    let value = match related {
        Some(entity) => project(serde_json::to_value(entity)?, policy),
        None => Value::Null,
    };
    obj.insert(key.to_string(), value);
    Ok(())
}

// ===== Entity converters =====

/// Serialize a Patient for the wire
///
/// The prescriptions edge is excluded, so nothing is loaded for it.
pub fn patient_to_wire(patient: &Patient) -> Result<Value> {
    let mut obj = scalar_map(patient)?;
    insert_relation(
        &mut obj,
        "prescriptions",
        None::<&[Prescription]>,
        &PATIENT_PRESCRIPTIONS,
    )?;
    Ok(Value::Object(obj))
}

/// Serialize a Pharmacist for the wire
pub fn pharmacist_to_wire(pharmacist: &Pharmacist) -> Result<Value> {
    let mut obj = scalar_map(pharmacist)?;
    insert_relation(
        &mut obj,
        "prescriptions",
        None::<&[Prescription]>,
        &PHARMACIST_PRESCRIPTIONS,
    )?;
    Ok(Value::Object(obj))
}

/// Serialize a Drug for the wire
pub fn drug_to_wire(drug: &Drug) -> Result<Value> {
    let mut obj = scalar_map(drug)?;
    insert_relation(
        &mut obj,
        "prescriptions",
        None::<&[Prescription]>,
        &DRUG_PRESCRIPTIONS,
    )?;
    Ok(Value::Object(obj))
}

/// Serialize a Prescription with its loaded relations
///
/// Scalar fields (including the raw foreign keys) pass through by name; the
/// three parent edges are projected per the policy table.
pub fn prescription_to_wire(
    prescription: &Prescription,
    links: &PrescriptionLinks,
) -> Result<Value> {
    let mut obj = scalar_map(prescription)?;
    insert_relation(&mut obj, "drug", links.drug.as_ref(), &PRESCRIPTION_DRUG)?;
    insert_relation(
        &mut obj,
        "patient",
        links.patient.as_ref(),
        &PRESCRIPTION_PATIENT,
    )?;
    insert_relation(
        &mut obj,
        "pharmacist",
        links.pharmacist.as_ref(),
        &PRESCRIPTION_PHARMACIST,
    )?;
    Ok(Value::Object(obj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::prescription::{created_timestamp, DEFAULT_STATUS};
    use serde_json::json;

    fn sample_prescription() -> Prescription {
        Prescription {
            id: 1,
            drug_id: Some(1),
            patient_id: Some(1),
            pharmacist_id: Some(1),
            created_at: created_timestamp(),
            instructions: Some("Take 1 daily".to_string()),
            status: DEFAULT_STATUS.to_string(),
        }
    }

    // ===== EXCLUSION TESTS =====

    #[test]
    fn test_patient_wire_never_contains_prescriptions_key() {
        let patient = Patient {
            id: 7,
            name: "Jane Doe".to_string(),
            address: Some("12 Main St".to_string()),
            insurance: Some("Acme Health".to_string()),
        };

        let wire = patient_to_wire(&patient).unwrap();

        assert!(wire.get("prescriptions").is_none());
        assert_eq!(
            wire,
            json!({
                "id": 7,
                "name": "Jane Doe",
                "address": "12 Main St",
                "insurance": "Acme Health",
            })
        );
    }

    #[test]
    fn test_pharmacist_and_drug_wires_exclude_prescriptions() {
        let pharmacist = Pharmacist::new(2, "Sam Lee".to_string());
        let drug = Drug::new(3, "0002-8215".to_string(), "Aspirin".to_string());

        assert!(pharmacist_to_wire(&pharmacist)
            .unwrap()
            .get("prescriptions")
            .is_none());
        assert!(drug_to_wire(&drug).unwrap().get("prescriptions").is_none());
    }

    #[test]
    fn test_optional_scalars_serialize_as_null() {
        let patient = Patient::new(1, "Jane Doe".to_string());
        let wire = patient_to_wire(&patient).unwrap();

        assert_eq!(wire["address"], Value::Null);
        assert_eq!(wire["insurance"], Value::Null);
    }

    // ===== REDUCED PROJECTION TESTS =====

    #[test]
    fn test_prescription_embeds_reduced_patient_projection() {
        // Given: a linked patient with address and insurance on record
        let patient = Patient {
            id: 7,
            name: "Jane Doe".to_string(),
            address: Some("12 Main St".to_string()),
            insurance: Some("Acme Health".to_string()),
        };
        let links = PrescriptionLinks {
            patient: Some(patient),
            ..Default::default()
        };

        // When: the prescription is serialized
        let wire = prescription_to_wire(&sample_prescription(), &links).unwrap();

        // Then: only id and name survive the projection
        assert_eq!(wire["patient"], json!({"id": 7, "name": "Jane Doe"}));
    }

    #[test]
    fn test_prescription_embeds_drug_as_bare_name() {
        let links = PrescriptionLinks {
            drug: Some(Drug::new(1, "0002-8215".to_string(), "Aspirin".to_string())),
            ..Default::default()
        };

        let wire = prescription_to_wire(&sample_prescription(), &links).unwrap();

        assert_eq!(wire["drug"], json!("Aspirin"));
    }

    #[test]
    fn test_missing_relations_project_as_null_without_error() {
        // A dangling or unset foreign key degrades to null
        let wire = prescription_to_wire(&sample_prescription(), &PrescriptionLinks::default())
            .expect("missing relations must not error");

        assert_eq!(wire["drug"], Value::Null);
        assert_eq!(wire["patient"], Value::Null);
        assert_eq!(wire["pharmacist"], Value::Null);
    }

    #[test]
    fn test_full_prescription_wire_shape() {
        let prescription = sample_prescription();
        let links = PrescriptionLinks {
            drug: Some(Drug::new(1, "0002-8215".to_string(), "Aspirin".to_string())),
            patient: Some(Patient::new(1, "Jane Doe".to_string())),
            pharmacist: Some(Pharmacist::new(1, "Sam Lee".to_string())),
        };

        let wire = prescription_to_wire(&prescription, &links).unwrap();

        let expected = json!({
            "id": 1,
            "drug_id": 1,
            "patient_id": 1,
            "pharmacist_id": 1,
            "created_at": serde_json::to_value(prescription.created_at).unwrap(),
            "instructions": "Take 1 daily",
            "status": "pending",
            "drug": "Aspirin",
            "patient": {"id": 1, "name": "Jane Doe"},
            "pharmacist": {"id": 1, "name": "Sam Lee"},
        });
        assert_eq!(wire, expected);
    }

    // ===== POLICY MECHANISM TESTS =====

    #[test]
    fn test_insert_relation_full_embeds_whole_record() {
        let mut obj = Map::new();
        let drug = Drug::new(1, "0002-8215".to_string(), "Aspirin".to_string());

        insert_relation(&mut obj, "drug", Some(&drug), &RelationPolicy::Full).unwrap();

        assert_eq!(
            obj["drug"],
            serde_json::to_value(&drug).unwrap(),
            "Full policy should embed every field"
        );
    }

    #[test]
    fn test_insert_relation_accepts_borrowed_slices() {
        // The parent converters hand over the prescriptions edge as
        // Option<&[Prescription]>, so unsized relation types must work
        let mut obj = Map::new();
        let prescriptions = vec![sample_prescription()];

        insert_relation(
            &mut obj,
            "prescriptions",
            Some(prescriptions.as_slice()),
            &RelationPolicy::Full,
        )
        .unwrap();

        let embedded = obj["prescriptions"].as_array().expect("should be an array");
        assert_eq!(embedded.len(), 1);
        assert_eq!(embedded[0]["id"], json!(1));
    }

    #[test]
    fn test_fields_policy_projects_arrays_elementwise() {
        let mut obj = Map::new();
        let patients = vec![
            Patient::new(1, "Jane Doe".to_string()),
            Patient::new(2, "John Roe".to_string()),
        ];

        insert_relation(
            &mut obj,
            "patients",
            Some(&patients),
            &RelationPolicy::Fields(&["id", "name"]),
        )
        .unwrap();

        assert_eq!(
            obj["patients"],
            json!([
                {"id": 1, "name": "Jane Doe"},
                {"id": 2, "name": "John Roe"},
            ])
        );
    }

    #[test]
    fn test_field_policy_missing_field_becomes_null() {
        let mut obj = Map::new();
        let drug = Drug::new(1, "0002-8215".to_string(), "Aspirin".to_string());

        insert_relation(
            &mut obj,
            "drug",
            Some(&drug),
            &RelationPolicy::Field("no_such_field"),
        )
        .unwrap();

        assert_eq!(obj["drug"], Value::Null);
    }
}
