//! Tenant lifecycle endpoint handlers.
//!
//! - POST /tenants/{id}/activate — Reactivate a deactivated tenant
//! - POST /tenants/{id}/deactivate — Soft-deactivate a tenant

use axum::{extract::Path, Extension, Json};
use sqlx::PgPool;
use uuid::Uuid;

use domus_db::{Tenant, TenantPools, TenantStatus};

use crate::error::TenantAdminError;
use crate::models::TenantResponse;

/// Reactivate a tenant.
///
/// Only meaningful for tenants whose database already exists; a row still
/// in `provisioning` must finish creation first.
#[utoipa::path(
    post,
    path = "/tenants/{id}/activate",
    params(("id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Tenant is active", body = TenantResponse),
        (status = 403, description = "Caller is not a platform administrator"),
        (status = 404, description = "No such tenant"),
        (status = 409, description = "Tenant is still provisioning"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tenant Administration"
)]
pub async fn activate_tenant_handler(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<TenantResponse>, TenantAdminError> {
    let tenant = Tenant::find_by_id(&pool, id)
        .await?
        .ok_or(TenantAdminError::UnknownTenant(id))?;

    if tenant.is_provisioning() {
        return Err(TenantAdminError::TenantNotReady(id));
    }

    let tenant = Tenant::set_status(&pool, id, TenantStatus::Active).await?;

    tracing::info!(tenant_id = %tenant.id, slug = %tenant.slug, "Tenant activated");

    Ok(Json(TenantResponse::from(tenant)))
}

/// Soft-deactivate a tenant.
///
/// The tenant's data stays in place; resolution starts rejecting its
/// requests on their next arrival. The cached connection pool is dropped
/// so a later reactivation starts from a fresh pool.
#[utoipa::path(
    post,
    path = "/tenants/{id}/deactivate",
    params(("id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Tenant is inactive", body = TenantResponse),
        (status = 403, description = "Caller is not a platform administrator"),
        (status = 404, description = "No such tenant"),
        (status = 409, description = "Tenant is still provisioning"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tenant Administration"
)]
pub async fn deactivate_tenant_handler(
    Extension(pool): Extension<PgPool>,
    Extension(tenant_pools): Extension<TenantPools>,
    Path(id): Path<Uuid>,
) -> Result<Json<TenantResponse>, TenantAdminError> {
    let tenant = Tenant::find_by_id(&pool, id)
        .await?
        .ok_or(TenantAdminError::UnknownTenant(id))?;

    if tenant.is_provisioning() {
        return Err(TenantAdminError::TenantNotReady(id));
    }

    let tenant = Tenant::set_status(&pool, id, TenantStatus::Inactive).await?;
    tenant_pools.invalidate(tenant.tenant_id()).await;

    tracing::info!(tenant_id = %tenant.id, slug = %tenant.slug, "Tenant deactivated");

    Ok(Json(TenantResponse::from(tenant)))
}
