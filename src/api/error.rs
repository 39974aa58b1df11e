//! HTTP error type.
//!
//! Every failure leaves a handler as an [`ApiError`] and is rendered as
//! `{"error": "..."}` with the matching status code. Storage failures are
//! logged here and replaced by a fixed message so internals never reach the
//! caller.

use crate::errors::Error;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Handler error with HTTP response mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request data (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Dependency unavailable (503)
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Maps a service error, using `failure` as the public message for
    /// anything that is not the caller's fault.
    pub fn from_service(err: Error, failure: &'static str) -> Self {
        match err {
            Error::Validation { message } => Self::BadRequest(message),
            Error::NotFound { entity, .. } => Self::NotFound(format!("{entity} not found")),
            other => {
                tracing::error!(error = %other, "{failure}");
                Self::Internal(failure.to_string())
            }
        }
    }

    /// Curried form of [`ApiError::from_service`] for `map_err`.
    pub fn with_context(failure: &'static str) -> impl FnOnce(Error) -> Self {
        move |err| Self::from_service(err, failure)
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::Internal(msg)
            | Self::Unavailable(msg) => msg,
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;
