//! Error types for the authentication API.
//!
//! Every failure surfaces as a `{"error": code, "message": text}` JSON body.
//! Credential and membership failures share a 401 status and deliberately
//! flat messages; the three refresh failure codes are distinct because the
//! token holder already proved possession and replay diagnosis is useful to
//! legitimate clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domus_auth::AuthError;
use domus_db::DbError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum ApiAuthError {
    /// Request input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The presented credentials (passcode, bearer token) do not authenticate
    /// a user. Unknown mobiles, wrong codes, expired codes and exhausted
    /// attempt budgets all collapse into this variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The user holds no membership that would permit this operation.
    #[error("No tenant membership for this account")]
    NotAMember,

    /// The requested tenant does not exist or is not active.
    #[error("Unknown or inactive tenant")]
    InvalidTenant,

    /// The refresh token was already redeemed or revoked.
    #[error("Refresh token has already been used")]
    ReplayedRefreshToken,

    /// The refresh token expired before it was redeemed.
    #[error("Refresh token has expired")]
    RefreshTokenExpired,

    /// The refresh token is not recognised at all.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// The passcode could not be delivered to the mobile.
    #[error("Passcode delivery failed: {0}")]
    DeliveryFailed(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiAuthError {
    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<validator::ValidationErrors> for ApiAuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<AuthError> for ApiAuthError {
    fn from(err: AuthError) -> Self {
        match err {
            // Key problems are server misconfiguration, not a caller fault.
            AuthError::InvalidKey(msg) => Self::Internal(format!("JWT key error: {msg}")),
            // Everything else means the presented token does not verify.
            _ => Self::InvalidCredentials,
        }
    }
}

/// Error response format for API errors.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiAuthError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            ApiAuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            ApiAuthError::NotAMember => {
                (StatusCode::UNAUTHORIZED, "not_a_member", self.to_string())
            }
            ApiAuthError::InvalidTenant => {
                (StatusCode::BAD_REQUEST, "invalid_tenant", self.to_string())
            }
            ApiAuthError::ReplayedRefreshToken => (
                StatusCode::UNAUTHORIZED,
                "replayed_refresh_token",
                self.to_string(),
            ),
            ApiAuthError::RefreshTokenExpired => (
                StatusCode::UNAUTHORIZED,
                "refresh_token_expired",
                self.to_string(),
            ),
            ApiAuthError::InvalidRefreshToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_refresh_token",
                self.to_string(),
            ),
            ApiAuthError::DeliveryFailed(e) => {
                tracing::error!("Passcode delivery failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                )
            }
            ApiAuthError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                )
            }
            ApiAuthError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiAuthError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_credential_failures_are_unauthorized() {
        assert_eq!(
            status_of(ApiAuthError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(ApiAuthError::NotAMember), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_refresh_failures_are_unauthorized() {
        for err in [
            ApiAuthError::ReplayedRefreshToken,
            ApiAuthError::RefreshTokenExpired,
            ApiAuthError::InvalidRefreshToken,
        ] {
            assert_eq!(status_of(err), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_invalid_tenant_is_bad_request() {
        assert_eq!(status_of(ApiAuthError::InvalidTenant), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = ApiAuthError::Internal("dsn=postgres://secret".to_string());
        assert_eq!(err.to_string(), "Internal error: dsn=postgres://secret");
        // The response body must not carry the detail.
        assert_eq!(
            status_of(ApiAuthError::Internal("dsn=postgres://secret".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_mapping() {
        let err: ApiAuthError = AuthError::TokenExpired.into();
        assert!(matches!(err, ApiAuthError::InvalidCredentials));

        let err: ApiAuthError = AuthError::InvalidKey("bad PEM".to_string()).into();
        assert!(matches!(err, ApiAuthError::Internal(_)));
    }

    #[test]
    fn test_db_error_conversion() {
        let db_err = DbError::NotFound("tenant".to_string());
        let err: ApiAuthError = db_err.into();
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
