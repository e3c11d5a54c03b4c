//! Router configuration for the tenant administration API.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use sqlx::PgPool;
use std::sync::Arc;

use domus_authz::{roles, GlobalRoleLayer};
use domus_db::TenantPools;
use domus_provisioning::TenantProvisioner;

use crate::handlers::{
    activate_tenant_handler, add_member_handler, create_tenant_handler, deactivate_tenant_handler,
    list_tenants_handler, upgrade_tenants_handler,
};

/// Shared state for the tenant administration routes.
#[derive(Clone)]
pub struct TenantAdminState {
    /// Registry database pool; also the admin pool for `CREATE DATABASE`.
    pub pool: PgPool,
    /// Per-tenant connection pool directory.
    pub tenant_pools: TenantPools,
    /// Provisioner creating and migrating tenant databases.
    pub provisioner: Arc<TenantProvisioner>,
}

impl TenantAdminState {
    /// Assemble the state, wiring the provisioner to the same pools the
    /// resolution path uses so a freshly provisioned tenant is served
    /// from the pool its migrations just ran on.
    #[must_use]
    pub fn new(pool: PgPool, tenant_pools: TenantPools) -> Self {
        let provisioner = Arc::new(TenantProvisioner::new(pool.clone(), tenant_pools.clone()));

        Self {
            pool,
            tenant_pools,
            provisioner,
        }
    }
}

/// Routes for platform administrators, mounted under `/tenants`.
///
/// Every route requires the `platform_admin` global role; the caller must
/// already be authenticated by the JWT middleware the application wraps
/// around this router. No tenant resolution applies here — these routes
/// operate on the registry, across tenants.
pub fn tenants_admin_router(state: TenantAdminState) -> Router {
    Router::new()
        .route(
            "/",
            post(create_tenant_handler).get(list_tenants_handler),
        )
        .route("/upgrade", post(upgrade_tenants_handler))
        .route("/:id/activate", post(activate_tenant_handler))
        .route("/:id/deactivate", post(deactivate_tenant_handler))
        .route("/:id/members", post(add_member_handler))
        .layer(GlobalRoleLayer::new(roles::PLATFORM_ADMIN))
        .layer(Extension(state.pool))
        .layer(Extension(state.tenant_pools))
        .layer(Extension(state.provisioner))
}

#[cfg(test)]
mod tests {
    // Router wiring is exercised end to end in tests/admin_router_test.rs.
}
