//! Bulk tenant schema upgrade endpoint handler.

use axum::{Extension, Json};
use sqlx::PgPool;
use std::sync::Arc;

use domus_db::Tenant;
use domus_provisioning::TenantProvisioner;

use crate::error::TenantAdminError;
use crate::models::UpgradeReportResponse;

/// Apply pending schema migrations to every provisioned tenant database.
///
/// Covers active and inactive tenants (both own a database); rows still in
/// `provisioning` are skipped. Tenants are upgraded sequentially and one
/// failure never aborts the batch — the response reports each tenant's
/// outcome, with failure detail for the administrative caller.
#[utoipa::path(
    post,
    path = "/tenants/upgrade",
    responses(
        (status = 200, description = "Per-tenant upgrade report", body = UpgradeReportResponse),
        (status = 403, description = "Caller is not a platform administrator"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tenant Administration"
)]
pub async fn upgrade_tenants_handler(
    Extension(pool): Extension<PgPool>,
    Extension(provisioner): Extension<Arc<TenantProvisioner>>,
) -> Result<Json<UpgradeReportResponse>, TenantAdminError> {
    let tenants = Tenant::list_provisioned(&pool).await?;

    let report = provisioner.upgrade_all(&tenants).await;

    if report.is_clean() {
        tracing::info!(total = report.total(), "Bulk tenant upgrade completed");
    } else {
        tracing::warn!(
            total = report.total(),
            failed = report.failed.len(),
            "Bulk tenant upgrade completed with failures"
        );
    }

    Ok(Json(UpgradeReportResponse::from(report)))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
