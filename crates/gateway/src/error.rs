//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clients::ClientError;
use orchestrator::RentalError;

/// API-level error type that maps to HTTP responses.
///
/// Every failure renders as a single `{"message": …}` JSON object; downstream
/// detail beyond a short description never leaks to the caller.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client (missing identity, malformed dates).
    BadRequest(String),
    /// Resource not found.
    NotFound(String),
    /// A rental workflow failed.
    Workflow(RentalError),
    /// A plain passthrough call to a downstream service failed.
    Upstream(ClientError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Workflow(err) => rental_error_to_response(err),
            ApiError::Upstream(err) => client_error_to_response(err),
        };

        let body = serde_json::json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}

fn rental_error_to_response(err: RentalError) -> (StatusCode, String) {
    match &err {
        RentalError::CarNotFound(_) | RentalError::RentalNotFound(_) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        RentalError::CarUnavailable(_) => (StatusCode::CONFLICT, err.to_string()),
        _ => {
            tracing::error!(error = %err, "rental workflow failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn client_error_to_response(err: ClientError) -> (StatusCode, String) {
    match &err {
        ClientError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
        e if e.is_unavailable() => {
            tracing::error!(error = %err, "downstream unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl From<RentalError> for ApiError {
    fn from(err: RentalError) -> Self {
        ApiError::Workflow(err)
    }
}
