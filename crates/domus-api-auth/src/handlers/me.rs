//! Tenant-scoped identity endpoints.
//!
//! - GET /api/me — The caller's identity as the token presents it
//! - GET /api/members — Members of the resolved tenant

use axum::{Extension, Json};
use sqlx::PgPool;

use domus_auth::JwtClaims;
use domus_core::UserId;
use domus_db::MembershipWithUser;
use domus_tenant::TenantContext;

use crate::error::ApiAuthError;
use crate::models::{MeResponse, MembersResponse};

/// Return the caller's identity within the resolved tenant.
///
/// Answers purely from the request extensions the middleware stages
/// populated; no database round trip. What the client sees is exactly
/// what the token claims.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Caller identity and permission snapshot", body = MeResponse),
        (status = 400, description = "Tenant not resolvable"),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tenant API"
)]
pub async fn me_handler(
    Extension(user_id): Extension<UserId>,
    Extension(claims): Extension<JwtClaims>,
    Extension(context): Extension<TenantContext>,
) -> Result<Json<MeResponse>, ApiAuthError> {
    Ok(Json(MeResponse {
        user_id: *user_id.as_uuid(),
        tenant_id: *context.tenant_id().as_uuid(),
        role: claims.role.clone(),
        permissions: claims.perms.clone(),
        global_roles: claims.roles.clone(),
    }))
}

/// List the members of the resolved tenant.
///
/// Gated on the `Members.View` permission at the router.
#[utoipa::path(
    get,
    path = "/api/members",
    responses(
        (status = 200, description = "Members of the tenant", body = MembersResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks the Members.View permission"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tenant API"
)]
pub async fn list_members_handler(
    Extension(pool): Extension<PgPool>,
    Extension(context): Extension<TenantContext>,
) -> Result<Json<MembersResponse>, ApiAuthError> {
    let members = MembershipWithUser::list_for_tenant(&pool, *context.tenant_id().as_uuid())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(MembersResponse { members }))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
