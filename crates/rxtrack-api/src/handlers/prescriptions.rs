//! Prescription resource handlers
//!
//! Every response embeds the relation projections, so each serialized
//! prescription is built from the record plus its resolved links.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rusqlite::Connection;
use rxtrack_core::{wire, NewPrescription, Prescription, PrescriptionUpdate, RxError};
use rxtrack_store::repo::PrescriptionRepo;
use serde_json::Value;

use crate::error::ApiResult;
use crate::state::AppState;

fn serialize(conn: &Connection, prescription: &Prescription) -> rxtrack_core::Result<Value> {
    let links = PrescriptionRepo::links(conn, prescription)?;
    wire::prescription_to_wire(prescription, &links)
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let prescriptions = PrescriptionRepo::list(&conn)?;
    let values = prescriptions
        .iter()
        .map(|p| serialize(&conn, p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Value::Array(values)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewPrescription>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let conn = state.db.lock().await;
    let prescription = PrescriptionRepo::create(&conn, payload)?;
    Ok((StatusCode::CREATED, Json(serialize(&conn, &prescription)?)))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let prescription = PrescriptionRepo::get(&conn, id)?.ok_or(RxError::NotFound {
        entity: "prescription",
        id,
    })?;
    Ok(Json(serialize(&conn, &prescription)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PrescriptionUpdate>,
) -> ApiResult<Json<Value>> {
    let conn = state.db.lock().await;
    let prescription = PrescriptionRepo::update(&conn, id, payload)?;
    Ok(Json(serialize(&conn, &prescription)?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let conn = state.db.lock().await;
    PrescriptionRepo::delete(&conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}
