//! Patient resource handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rxtrack_core::{wire, NewPatient, PatientUpdate, RxError};
use rxtrack_store::repo::{PatientRepo, PrescriptionRepo};
use serde_json::Value;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let patients = PatientRepo::list(&conn)?;
    let values = patients
        .iter()
        .map(wire::patient_to_wire)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Value::Array(values)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewPatient>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let conn = state.db.lock().await;
    let patient = PatientRepo::create(&conn, payload)?;
    Ok((StatusCode::CREATED, Json(wire::patient_to_wire(&patient)?)))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let patient = PatientRepo::get(&conn, id)?.ok_or(RxError::NotFound {
        entity: "patient",
        id,
    })?;
    Ok(Json(wire::patient_to_wire(&patient)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PatientUpdate>,
) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let patient = PatientRepo::update(&conn, id, payload)?;
    Ok(Json(wire::patient_to_wire(&patient)?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let conn = state.db.lock().await;
    PatientRepo::delete(&conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// Handler for /patients/:id/prescriptions
pub async fn prescriptions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let prescriptions = PatientRepo::prescriptions(&conn, id)?;
    let values = prescriptions
        .iter()
        .map(|p| {
            let links = PrescriptionRepo::links(&conn, p)?;
            wire::prescription_to_wire(p, &links)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Value::Array(values)))
}
