//! Logout endpoint handler.
//!
//! POST /auth/logout — Invalidate a refresh token.

use axum::{http::StatusCode, Extension, Json};
use std::sync::Arc;
use validator::Validate;

use crate::error::ApiAuthError;
use crate::models::LogoutRequest;
use crate::services::TokenService;

/// Handle user logout.
///
/// Revokes the provided refresh token so it cannot mint new access
/// tokens. Revoking an already-dead token still returns 204; logout is
/// replay-safe.
#[utoipa::path(
    post,
    path = "/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 204, description = "Logout successful"),
        (status = 400, description = "Missing refresh token"),
    ),
    tag = "Authentication"
)]
pub async fn logout_handler(
    Extension(token_service): Extension<Arc<TokenService>>,
    Json(request): Json<LogoutRequest>,
) -> Result<StatusCode, ApiAuthError> {
    request.validate()?;

    let revoked = token_service.revoke(&request.refresh_token).await?;
    if revoked {
        tracing::info!("User logged out");
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
