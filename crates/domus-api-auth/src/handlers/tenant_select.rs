//! Tenant selection endpoint handlers.
//!
//! - POST /session/tenant — Exchange a base token for a tenant token
//! - GET /session/tenants — List the caller's memberships

use axum::{extract::ConnectInfo, http::HeaderMap, Extension, Json};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;

use domus_core::{TenantId, UserId};
use domus_db::MembershipWithTenant;

use crate::error::ApiAuthError;
use crate::models::{TenantListResponse, TenantSelectRequest, TokenResponse};
use crate::services::TokenService;

/// Handle tenant selection.
///
/// Exchanges the caller's authenticated identity for a tenant token
/// scoped to the requested tenant, with the role and permission snapshot
/// resolved at this moment. The returned refresh token is bound to the
/// same tenant scope.
#[utoipa::path(
    post,
    path = "/session/tenant",
    request_body = TenantSelectRequest,
    responses(
        (status = 200, description = "Tenant token issued", body = TokenResponse),
        (status = 400, description = "Unknown or inactive tenant"),
        (status = 401, description = "Caller is not a member of the tenant"),
    ),
    security(("bearer_auth" = [])),
    tag = "Session"
)]
pub async fn select_tenant_handler(
    Extension(token_service): Extension<Arc<TokenService>>,
    Extension(user_id): Extension<UserId>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<TenantSelectRequest>,
) -> Result<Json<TokenResponse>, ApiAuthError> {
    let tenant_id = TenantId::from_uuid(body.tenant_id);

    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let (access_token, expires_in) = token_service
        .issue_tenant_token(user_id, tenant_id)
        .await?;
    let refresh_token = token_service
        .issue_refresh_token(user_id, Some(tenant_id), user_agent, Some(addr.ip()))
        .await?;

    tracing::info!(user_id = %user_id, tenant_id = %tenant_id, "Tenant selected");

    Ok(Json(TokenResponse::new(
        access_token,
        refresh_token,
        expires_in,
    )))
}

/// List the caller's tenant memberships.
///
/// Available with a base token; used by clients to render the tenant
/// picker after login.
#[utoipa::path(
    get,
    path = "/session/tenants",
    responses(
        (status = 200, description = "Memberships for the caller", body = TenantListResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Session"
)]
pub async fn list_tenants_handler(
    Extension(pool): Extension<PgPool>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<TenantListResponse>, ApiAuthError> {
    let tenants = MembershipWithTenant::list_for_user(&pool, *user_id.as_uuid())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(TenantListResponse { tenants }))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
