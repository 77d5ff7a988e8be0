//! API error type: the outcome mapper from gateway errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gateway::{FieldViolation, GatewayError};

/// API-level error that maps to an HTTP response.
///
/// Each variant corresponds to one externally observable outcome; the
/// [`IntoResponse`] impl is a single exhaustive match, so no error kind can
/// fall through to an unintended status or body.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found, reported with a generic message body.
    NotFound(String),
    /// Resource not found, reported with an empty body (benign delete).
    NotFoundNoBody,
    /// Structural validation failures on the request payload.
    Validation(Vec<FieldViolation>),
    /// Uniqueness conflict on the strategy name.
    NameExists(String),
    /// Internal server fault. Detail is logged, never sent to the caller.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            ApiError::NotFoundNoBody => StatusCode::NOT_FOUND.into_response(),
            ApiError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, Json(violations)).into_response()
            }
            ApiError::NameExists(name) => (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!([
                    { "msg": format!("A strategy named '{name}' already exists.") }
                ])),
            )
                .into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(violations) => ApiError::Validation(violations),
            GatewayError::NameExists { name } => ApiError::NameExists(name),
            GatewayError::NotFound { .. } => {
                ApiError::NotFound("Could not find strategy".to_string())
            }
            GatewayError::EventStore(err) => ApiError::Internal(err.to_string()),
        }
    }
}
