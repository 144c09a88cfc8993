//! Request handlers, one module per resource

pub mod drugs;
pub mod patients;
pub mod pharmacists;
pub mod prescriptions;

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

// Handler for the /health endpoint
pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
