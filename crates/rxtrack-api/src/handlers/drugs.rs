//! Drug resource handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rxtrack_core::{wire, DrugUpdate, NewDrug, RxError};
use rxtrack_store::repo::{DrugRepo, PrescriptionRepo};
use serde_json::Value;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let drugs = DrugRepo::list(&conn)?;
    let values = drugs
        .iter()
        .map(wire::drug_to_wire)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Value::Array(values)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewDrug>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let conn = state.db.lock().await;
    let drug = DrugRepo::create(&conn, payload)?;
    Ok((StatusCode::CREATED, Json(wire::drug_to_wire(&drug)?)))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let drug = DrugRepo::get(&conn, id)?.ok_or(RxError::NotFound {
        entity: "drug",
        id,
    })?;
    Ok(Json(wire::drug_to_wire(&drug)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DrugUpdate>,
) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let drug = DrugRepo::update(&conn, id, payload)?;
    Ok(Json(wire::drug_to_wire(&drug)?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let conn = state.db.lock().await;
    DrugRepo::delete(&conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// Handler for /drugs/:id/prescriptions
pub async fn prescriptions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let prescriptions = DrugRepo::prescriptions(&conn, id)?;
    let values = prescriptions
        .iter()
        .map(|p| {
            let links = PrescriptionRepo::links(&conn, p)?;
            wire::prescription_to_wire(p, &links)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Value::Array(values)))
}
