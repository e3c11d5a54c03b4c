//! Tenant membership endpoint handler.

use axum::{extract::Path, http::StatusCode, Extension, Json};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use domus_db::{Membership, Tenant, TenantPools, TenantRole, User};

use crate::error::TenantAdminError;
use crate::models::{AddMemberRequest, MemberCreatedResponse};

/// Add a member to a tenant.
///
/// The invite path: the global user row is upserted by mobile so the same
/// person joining a second tenant reuses their account, and a membership
/// is created under the given role. The role name must exist in the
/// tenant's own role catalog, which is why the tenant database must be
/// reachable.
#[utoipa::path(
    post,
    path = "/tenants/{id}/members",
    params(("id" = Uuid, Path, description = "Tenant ID")),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Membership created", body = MemberCreatedResponse),
        (status = 400, description = "Validation error or unknown role"),
        (status = 403, description = "Caller is not a platform administrator"),
        (status = 404, description = "No such tenant"),
        (status = 409, description = "Already a member, or tenant still provisioning"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tenant Administration"
)]
pub async fn add_member_handler(
    Extension(pool): Extension<PgPool>,
    Extension(tenant_pools): Extension<TenantPools>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MemberCreatedResponse>), TenantAdminError> {
    body.validate()?;

    let tenant = Tenant::find_by_id(&pool, id)
        .await?
        .ok_or(TenantAdminError::UnknownTenant(id))?;

    if tenant.is_provisioning() {
        return Err(TenantAdminError::TenantNotReady(id));
    }

    let tenant_pool = tenant_pools.get(tenant.tenant_id()).await?;
    TenantRole::find_by_name(&tenant_pool, &body.role)
        .await?
        .ok_or_else(|| TenantAdminError::UnknownRole(body.role.clone()))?;

    let user = User::upsert_by_mobile(&pool, &body.name, &body.email, &body.mobile).await?;

    let membership = Membership::create(&pool, user.id, tenant.id, &body.role)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                TenantAdminError::MemberConflict
            } else {
                TenantAdminError::Database(e)
            }
        })?;

    tracing::info!(
        user_id = %user.id,
        tenant_id = %tenant.id,
        role = %membership.role_name,
        "Member added to tenant"
    );

    Ok((
        StatusCode::CREATED,
        Json(MemberCreatedResponse::from(membership)),
    ))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
