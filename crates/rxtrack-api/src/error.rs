//! HTTP mapping for the domain error taxonomy

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rxtrack_core::RxError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Handler result type
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wrapper that turns a domain error into an HTTP response
///
/// The response body always carries the stable error code plus the display
/// message: `{"code": "...", "message": "..."}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub RxError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            RxError::Validation { .. } => StatusCode::BAD_REQUEST,
            RxError::NotFound { .. } => StatusCode::NOT_FOUND,
            RxError::DuplicateNdc { .. }
            | RxError::MissingReference { .. }
            | RxError::StillReferenced { .. } => StatusCode::CONFLICT,
            RxError::Migration { .. }
            | RxError::ChecksumMismatch { .. }
            | RxError::Persistence { .. }
            | RxError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.0.code(), "request failed: {}", self.0);
        }

        let body = Json(json!({
            "code": self.0.code(),
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
