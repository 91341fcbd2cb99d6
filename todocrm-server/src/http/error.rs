//! Envelope responses with status mapping
//!
//! Operation envelopes are sent verbatim; the status code comes from the
//! failure class the envelope carries.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use todocrm_core::{Envelope, ErrorKind};

/// Request rejected before reaching an operation
#[derive(Debug)]
pub enum ApiError {
    /// Body missing, not JSON, or wrong shape (400)
    InvalidRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidRequest(reason) => {
                tracing::debug!(%reason, "rejected request body");
                let env: Envelope<()> =
                    Envelope::fail(ErrorKind::Validation, format!("Invalid request: {reason}"));
                (StatusCode::BAD_REQUEST, Json(env)).into_response()
            }
        }
    }
}

/// Status for a failed envelope.
pub fn failure_status(kind: Option<ErrorKind>) -> StatusCode {
    match kind {
        Some(ErrorKind::Validation) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::NotFound) => StatusCode::NOT_FOUND,
        Some(ErrorKind::Storage) | None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Send an operation envelope, using `success` as the status when it succeeded.
pub fn respond<T: Serialize>(success: StatusCode, env: Envelope<T>) -> Response {
    let status = if env.is_success() {
        success
    } else {
        failure_status(env.error_kind())
    };
    (status, Json(env)).into_response()
}
