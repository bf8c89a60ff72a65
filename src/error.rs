use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::response::Envelope;

/// Failure taxonomy for the HTTP surface. Each variant owns its status
/// code and envelope shape.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input; the detail lands in both `message` and `error`.
    #[error("{0}")]
    Validation(String),

    /// A required create field was absent; detail is the quoted key name.
    #[error("missing field {0}")]
    MissingField(String),

    /// Failures a create/update surfaces as a client error with detail.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Database unavailable or constraint violation on read/delete paths.
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                Envelope::failed_with(&detail, &detail),
            ),
            ApiError::MissingField(key) => (
                StatusCode::BAD_REQUEST,
                Envelope::failed_with("An error occurred", &key),
            ),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                Envelope::failed_with("An error occurred", &detail),
            ),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, Envelope::failed(&message)),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, Envelope::failed(&message)),
            ApiError::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Envelope::failed_with("Database error occurred", &e.to_string()),
            ),
        };
        (status, Json(body)).into_response()
    }
}
