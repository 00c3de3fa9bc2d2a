//! Error types for the HTTP interface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by HTTP handlers.
///
/// Every variant renders as `{"response": <message>, "status": "error"}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request body (400)
    #[error("{0}")]
    Validation(String),

    /// The planning pipeline could not produce a plan (500)
    #[error("{0}")]
    Generation(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    response: String,
    status: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            response: self.to_string(),
            status: "error",
        };
        (status, Json(body)).into_response()
    }
}
