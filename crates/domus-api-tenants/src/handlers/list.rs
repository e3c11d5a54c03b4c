//! Tenant listing endpoint handler.

use axum::{Extension, Json};
use sqlx::PgPool;

use domus_db::Tenant;

use crate::error::TenantAdminError;
use crate::models::TenantListResponse;

/// List every registered tenant with its lifecycle status.
///
/// Includes rows still in `provisioning`, so an administrator can spot
/// interrupted creations and retry them.
#[utoipa::path(
    get,
    path = "/tenants",
    responses(
        (status = 200, description = "All registered tenants", body = TenantListResponse),
        (status = 403, description = "Caller is not a platform administrator"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tenant Administration"
)]
pub async fn list_tenants_handler(
    Extension(pool): Extension<PgPool>,
) -> Result<Json<TenantListResponse>, TenantAdminError> {
    let tenants = Tenant::list_all(&pool)
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
