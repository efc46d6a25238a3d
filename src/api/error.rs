//! API error type and its HTTP mapping
//!
//! Error bodies are `{statusCode, message, error}`. Validation failures carry
//! the list of field messages; internal failures are logged and answered with
//! a generic message.

use crate::domain::MedtrackError;
use crate::log_error_with_context;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: ErrorMessage,
    pub error: &'static str,
}

/// API-level errors with HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {}", .0.join("; "))]
    BadRequest(Vec<String>),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, error) = match self {
            ApiError::BadRequest(messages) => (ErrorMessage::Many(messages), "Bad Request"),
            ApiError::NotFound(detail) => (ErrorMessage::One(detail), "Not Found"),
            ApiError::Conflict(detail) => (ErrorMessage::One(detail), "Conflict"),
            ApiError::Internal(detail) => {
                log_error_with_context!(detail, "Request failed");
                (
                    ErrorMessage::One("Internal server error".to_string()),
                    "Internal Server Error",
                )
            }
        };

        let body = ErrorBody {
            status_code: status.as_u16(),
            message,
            error,
        };
        (status, Json(body)).into_response()
    }
}

impl From<MedtrackError> for ApiError {
    fn from(err: MedtrackError) -> Self {
        match err {
            MedtrackError::Validation(errors) => ApiError::BadRequest(errors.messages()),
            err if err.is_not_found() => ApiError::NotFound(err.to_string()),
            MedtrackError::ReferenceInUse { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(vec![rejection.body_text()])
    }
}
