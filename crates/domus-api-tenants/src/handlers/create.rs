//! Tenant creation endpoint handler.

use axum::{http::StatusCode, Extension, Json};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use domus_db::{Tenant, TenantStatus};
use domus_provisioning::{database_name_for_slug, TenantProvisioner};

use crate::error::TenantAdminError;
use crate::models::{CreateTenantRequest, TenantResponse};

/// Handle tenant creation.
///
/// Registers the tenant in `provisioning` status, creates and migrates its
/// physical database, then flips the status to `active`. A provisioning
/// failure leaves the row in `provisioning`; repeating the call with the
/// same slug resumes from wherever the earlier run died.
#[utoipa::path(
    post,
    path = "/tenants",
    request_body = CreateTenantRequest,
    responses(
        (status = 201, description = "Tenant created and provisioned", body = TenantResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not a platform administrator"),
        (status = 409, description = "Slug already in use"),
        (status = 500, description = "Provisioning failed; the call can be retried"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tenant Administration"
)]
pub async fn create_tenant_handler(
    Extension(pool): Extension<PgPool>,
    Extension(provisioner): Extension<Arc<TenantProvisioner>>,
    Json(body): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<TenantResponse>), TenantAdminError> {
    body.validate()?;

    let database_name = database_name_for_slug(&body.slug)
        .map_err(|e| TenantAdminError::Validation(e.to_string()))?;

    let tenant = match Tenant::find_by_slug(&pool, &body.slug).await? {
        Some(existing) if existing.is_provisioning() => {
            tracing::info!(
                tenant_id = %existing.id,
                slug = %existing.slug,
                "Resuming interrupted tenant provisioning"
            );
            existing
        }
        Some(existing) => return Err(TenantAdminError::SlugTaken(existing.slug)),
        None => Tenant::create(&pool, &body.name, &body.slug, &database_name)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    // Lost a race with a concurrent create for the same slug.
                    TenantAdminError::SlugTaken(body.slug.clone())
                } else {
                    TenantAdminError::Database(e)
                }
            })?,
    };

    provisioner.create_tenant_database(&tenant).await?;

    let tenant = Tenant::set_status(&pool, tenant.id, TenantStatus::Active).await?;

    tracing::info!(tenant_id = %tenant.id, slug = %tenant.slug, "Tenant provisioned");

    Ok((StatusCode::CREATED, Json(TenantResponse::from(tenant))))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
