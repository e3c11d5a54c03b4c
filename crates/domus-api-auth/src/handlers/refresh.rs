//! Token refresh endpoint handler.
//!
//! POST /auth/refresh — Redeem a refresh token for a new token pair.

use axum::{extract::ConnectInfo, http::HeaderMap, Extension, Json};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use validator::Validate;

use domus_core::TenantId;

use crate::error::ApiAuthError;
use crate::models::{RefreshRequest, TokenResponse};
use crate::services::TokenService;

/// Handle token refresh.
///
/// Rotates the presented refresh token and issues a new access/refresh
/// pair. An explicit `tenant_id` in the body re-scopes the pair (subject
/// to the same membership checks as tenant selection); otherwise the new
/// pair keeps the old token's scope.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens refreshed successfully", body = TokenResponse),
        (status = 400, description = "Unknown or inactive tenant requested"),
        (status = 401, description = "Invalid, expired, or replayed refresh token"),
    ),
    tag = "Authentication"
)]
pub async fn refresh_handler(
    Extension(token_service): Extension<Arc<TokenService>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiAuthError> {
    request.validate()?;

    let ip_address: Option<IpAddr> = Some(addr.ip());
    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let scope = request.tenant_id.map(TenantId::from_uuid);

    let (access_token, refresh_token, expires_in) = token_service
        .refresh(&request.refresh_token, scope, user_agent, ip_address)
        .await?;

    Ok(Json(TokenResponse::new(
        access_token,
        refresh_token,
        expires_in,
    )))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
