//! Error types for tenant resolution.
//!
//! Provides structured error responses for resolution failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during tenant resolution.
///
/// Malformed, unknown, inactive and mismatched tenant identifiers all share
/// the `invalid_tenant` code and a 400 status; a caller cannot probe which
/// tenants exist by comparing rejections.
#[derive(Debug, Clone, Error)]
pub enum TenantError {
    /// No tenant identifier was found on a request that requires one.
    #[error("Tenant identifier required")]
    Missing,

    /// The tenant identifier is not a valid UUID.
    #[error("Invalid tenant identifier: {0}")]
    InvalidFormat(String),

    /// The request header and the bearer token disagree about the tenant.
    #[error("Tenant identifier does not match the token")]
    Mismatch,

    /// The tenant does not exist or is not active.
    #[error("Unknown or inactive tenant")]
    NotResolvable,

    /// The registry could not be consulted.
    #[error("Tenant lookup failed: {0}")]
    LookupFailed(String),
}

impl TenantError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            TenantError::Missing
            | TenantError::InvalidFormat(_)
            | TenantError::Mismatch
            | TenantError::NotResolvable => StatusCode::BAD_REQUEST,
            TenantError::LookupFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for the JSON response.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            TenantError::Missing
            | TenantError::InvalidFormat(_)
            | TenantError::Mismatch
            | TenantError::NotResolvable => "invalid_tenant",
            TenantError::LookupFailed(_) => "internal_error",
        }
    }
}

/// Structured JSON error response.
///
/// ```json
/// {
///     "error": "invalid_tenant",
///     "message": "Unknown or inactive tenant"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "invalid_tenant")
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    #[must_use]
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl From<TenantError> for ErrorResponse {
    fn from(err: TenantError) -> Self {
        // Lookup failures keep their detail in the log, not the body.
        let message = match &err {
            TenantError::LookupFailed(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        Self::new(err.error_code(), message)
    }
}

impl IntoResponse for TenantError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::from(self);

        (
            status,
            [("content-type", "application/json")],
            serde_json::to_string(&body).unwrap_or_else(|_| {
                r#"{"error":"internal_error","message":"Failed to serialize error"}"#.to_string()
            }),
        )
            .into_response()
    }
}
