//! Error responses.
//!
//! Validation maps to 400, a busy submission slot to 409 and a failed
//! collaborator call to 502. Bodies are `{"error": ..., "kind": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::workflow::WorkflowError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

/// A JSON error response with an explicit status.
pub fn error_response(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: message.into(),
        kind,
    };
    (status, Json(body)).into_response()
}

impl WorkflowError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WorkflowError::Validation(_) => StatusCode::BAD_REQUEST,
            WorkflowError::Busy => StatusCode::CONFLICT,
            WorkflowError::Remote(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for WorkflowError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.kind(), self.to_string())
    }
}
