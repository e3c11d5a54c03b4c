//! Tenant liveness checks against the registry.
//!
//! Resolution consults the gate on every request, so deactivating a tenant
//! takes effect on the very next request even for holders of unexpired
//! tokens.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domus_core::TenantId;
use domus_db::Tenant;

use crate::error::TenantError;

/// Liveness oracle for tenants.
///
/// Object-safe so the resolution service can hold it as `Arc<dyn
/// TenantGate>` and tests can swap in an in-memory implementation.
#[async_trait]
pub trait TenantGate: Send + Sync {
    /// Check whether the tenant exists and is currently active.
    async fn is_live(&self, tenant_id: TenantId) -> Result<bool, TenantError>;
}

/// Registry-backed gate used in production.
#[derive(Clone)]
pub struct PgTenantGate {
    pool: PgPool,
}

impl PgTenantGate {
    /// Create a gate over the registry pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantGate for PgTenantGate {
    async fn is_live(&self, tenant_id: TenantId) -> Result<bool, TenantError> {
        let tenant = Tenant::find_by_id(&self.pool, *tenant_id.as_uuid())
            .await
            .map_err(|err| TenantError::LookupFailed(err.to_string()))?;

        Ok(tenant.is_some_and(|t| t.is_active()))
    }
}

/// Gate over a fixed set of live tenants, for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct StaticTenantGate {
    live: HashSet<Uuid>,
}

impl StaticTenantGate {
    /// Create a gate where exactly the given tenants are live.
    #[must_use]
    pub fn new(live: impl IntoIterator<Item = TenantId>) -> Self {
        Self {
            live: live.into_iter().map(|id| *id.as_uuid()).collect(),
        }
    }

    /// Create a gate that rejects every tenant.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenantGate for StaticTenantGate {
    async fn is_live(&self, tenant_id: TenantId) -> Result<bool, TenantError> {
        Ok(self.live.contains(tenant_id.as_uuid()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_gate_membership() {
        let live = TenantId::new();
        let dead = TenantId::new();
        let gate = StaticTenantGate::new([live]);

        assert!(gate.is_live(live).await.unwrap());
        assert!(!gate.is_live(dead).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_gate_rejects_all() {
        let gate = StaticTenantGate::empty();
        assert!(!gate.is_live(TenantId::new()).await.unwrap());
    }
}
