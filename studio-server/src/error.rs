//! API error type and its HTTP mapping.
//!
//! Every failure a handler can hit is converted into a JSON `{"error": ...}`
//! payload with a matching status code. Network-boundary failures carry the
//! collaborator-supplied message verbatim when one is present; nothing
//! propagates as an unhandled fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::resolver::ResolverError;
use crate::validation::ValidationError;

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed or exceeded a limit.
    #[error("{0}")]
    Validation(String),

    /// The requested resource does not exist.
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// An upstream collaborator reported a failure.
    #[error("{0}")]
    Upstream(String),

    /// The upstream media resolver is not configured.
    #[error("Media resolver is not configured")]
    ResolverUnavailable,

    /// Something failed on our side.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(..) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::ResolverUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("API error: {self}");
        } else {
            tracing::debug!("API error: {self}");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        crate::metrics::record_validation_failure(err.kind());
        Self::Validation(err.to_string())
    }
}

impl From<studio_core::StoreError> for ApiError {
    fn from(err: studio_core::StoreError) -> Self {
        match err {
            studio_core::StoreError::ThumbnailNotFound(id) => Self::NotFound("Thumbnail", id),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<studio_export::ExportError> for ApiError {
    fn from(err: studio_export::ExportError) -> Self {
        match err {
            studio_export::ExportError::UnsupportedFormat(_) => Self::Validation(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ResolverError> for ApiError {
    fn from(err: ResolverError) -> Self {
        Self::Upstream(err.to_string())
    }
}
