//! Error types for permission authorization.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a request can be denied by the authorization layer.
///
/// The variants carry enough detail for logs. Responses are deliberately
/// coarser: every post-authentication denial renders the same 403 body, so a
/// caller cannot probe which check rejected them.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// No authenticated caller on the request.
    #[error("Authentication required")]
    Unauthenticated,

    /// No tenant context on a permission-gated route.
    #[error("No tenant context on an authorization-gated route")]
    MissingTenantContext,

    /// The token's tenant scope does not match the resolved tenant.
    #[error("Token tenant scope does not match the resolved tenant")]
    TokenScopeMismatch,

    /// The required permission is not in the token's snapshot.
    #[error("Permission {0} not granted")]
    PermissionDenied(String),

    /// The required global role is not in the token's role list.
    #[error("Global role {0} not granted")]
    RoleDenied(String),
}

impl AuthzError {
    /// HTTP status code for this denial.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthzError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthzError::MissingTenantContext
            | AuthzError::TokenScopeMismatch
            | AuthzError::PermissionDenied(_)
            | AuthzError::RoleDenied(_) => StatusCode::FORBIDDEN,
        }
    }

    /// Machine-readable error code for this denial.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthzError::Unauthenticated => "invalid_credentials",
            _ => "forbidden",
        }
    }

    /// Message rendered to the caller.
    ///
    /// All 403 variants share one message; the specific cause goes to the
    /// logs only.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthzError::Unauthenticated => "Authentication required",
            _ => "You do not have permission to perform this action",
        }
    }
}

/// JSON body returned for denied requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,

    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for AuthzError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error_code().to_string(),
            message: self.public_message().to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_maps_to_401() {
        let err = AuthzError::Unauthenticated;
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "invalid_credentials");
    }

    #[test]
    fn test_denials_map_to_403() {
        let denials = [
            AuthzError::MissingTenantContext,
            AuthzError::TokenScopeMismatch,
            AuthzError::PermissionDenied("Units.Edit".to_string()),
            AuthzError::RoleDenied("platform_admin".to_string()),
        ];

        for err in denials {
            assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
            assert_eq!(err.error_code(), "forbidden");
        }
    }

    #[test]
    fn test_denials_share_one_public_message() {
        let mismatch = AuthzError::TokenScopeMismatch.public_message();
        let denied = AuthzError::PermissionDenied("Units.Edit".to_string()).public_message();
        let no_context = AuthzError::MissingTenantContext.public_message();

        assert_eq!(mismatch, denied);
        assert_eq!(mismatch, no_context);
    }

    #[test]
    fn test_log_messages_stay_specific() {
        let err = AuthzError::PermissionDenied("Units.Edit".to_string());
        assert!(err.to_string().contains("Units.Edit"));
        assert!(!err.public_message().contains("Units.Edit"));
    }
}
