//! HTTP error types and implementations

#[cfg(feature = "server")]
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the server routes
#[derive(Error, Debug)]
pub enum HttpError {
    /// A required query parameter is missing or malformed
    #[error("{0}")]
    BadRequest(String),

    /// The course catalog answered with a non-success status. `resource`
    /// names what was requested (`course`, `sections`, `lessons`, `data`).
    #[error("Failed to fetch {resource}: {reason}")]
    Upstream {
        status: u16,
        resource: &'static str,
        reason: String,
    },

    /// Anything else; the detail is logged, never sent to the caller
    #[error("Internal server error")]
    InternalServerError(String),
}

impl HttpError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::InternalServerError(detail.into())
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(feature = "server")]
impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::InternalServerError(detail) => {
                tracing::error!(%detail, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias using HttpError
pub type Result<T> = std::result::Result<T, HttpError>;
