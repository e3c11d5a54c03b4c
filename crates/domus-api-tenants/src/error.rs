//! Error types for the tenant administration API.
//!
//! Every failure surfaces as a `{"error": code, "message": text}` JSON body.
//! Unlike the end-user surfaces, provisioning failures here carry their
//! detail in the response: the caller is a platform administrator who needs
//! to know what broke, and the interrupted row stays `provisioning` so the
//! same call can be retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use domus_db::DbError;
use domus_provisioning::ProvisioningError;

/// Errors that can occur during tenant administration operations.
#[derive(Debug, Error)]
pub enum TenantAdminError {
    /// Request input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The slug already belongs to a fully provisioned tenant.
    #[error("Slug '{0}' is already in use")]
    SlugTaken(String),

    /// No tenant exists with the given ID.
    #[error("Tenant {0} not found")]
    UnknownTenant(Uuid),

    /// The tenant's physical database has not been confirmed yet, so
    /// lifecycle and membership changes are premature. Re-running the
    /// create call resumes provisioning.
    #[error("Tenant {0} is still provisioning")]
    TenantNotReady(Uuid),

    /// The role name does not exist in the tenant's role catalog.
    #[error("Role '{0}' does not exist in this tenant")]
    UnknownRole(String),

    /// The user already holds a membership in this tenant.
    #[error("User is already a member of this tenant")]
    MemberConflict,

    /// Creating or migrating a tenant database failed.
    #[error("Provisioning failed: {0}")]
    Provisioning(#[from] ProvisioningError),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for TenantAdminError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
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

impl IntoResponse for TenantAdminError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            TenantAdminError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            TenantAdminError::SlugTaken(_) => {
                (StatusCode::CONFLICT, "slug_taken", self.to_string())
            }
            TenantAdminError::UnknownTenant(_) => {
                (StatusCode::NOT_FOUND, "unknown_tenant", self.to_string())
            }
            TenantAdminError::TenantNotReady(_) => {
                (StatusCode::CONFLICT, "tenant_not_ready", self.to_string())
            }
            TenantAdminError::UnknownRole(_) => {
                (StatusCode::BAD_REQUEST, "unknown_role", self.to_string())
            }
            TenantAdminError::MemberConflict => {
                (StatusCode::CONFLICT, "member_conflict", self.to_string())
            }
            TenantAdminError::Provisioning(e) => {
                tracing::error!("Provisioning failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "provisioning_failure",
                    self.to_string(),
                )
            }
            TenantAdminError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                )
            }
            TenantAdminError::Internal(msg) => {
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
