//! Pharmacist resource handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rxtrack_core::{wire, NewPharmacist, PharmacistUpdate, RxError};
use rxtrack_store::repo::{PharmacistRepo, PrescriptionRepo};
use serde_json::Value;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let pharmacists = PharmacistRepo::list(&conn)?;
    let values = pharmacists
        .iter()
        .map(wire::pharmacist_to_wire)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Value::Array(values)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewPharmacist>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let conn = state.db.lock().await;
    let pharmacist = PharmacistRepo::create(&conn, payload)?;
    Ok((
        StatusCode::CREATED,
        Json(wire::pharmacist_to_wire(&pharmacist)?),
    ))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let pharmacist = PharmacistRepo::get(&conn, id)?.ok_or(RxError::NotFound {
        entity: "pharmacist",
        id,
    })?;
    Ok(Json(wire::pharmacist_to_wire(&pharmacist)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PharmacistUpdate>,
) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let pharmacist = PharmacistRepo::update(&conn, id, payload)?;
    Ok(Json(wire::pharmacist_to_wire(&pharmacist)?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let conn = state.db.lock().await;
    PharmacistRepo::delete(&conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// Handler for /pharmacists/:id/prescriptions
pub async fn prescriptions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let prescriptions = PharmacistRepo::prescriptions(&conn, id)?;
    let values = prescriptions
        .iter()
        .map(|p| {
            let links = PrescriptionRepo::links(&conn, p)?;
            wire::prescription_to_wire(p, &links)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Value::Array(values)))
}
