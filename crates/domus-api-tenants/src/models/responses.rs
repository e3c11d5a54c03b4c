//! Response DTOs for tenant administration endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use domus_db::{Membership, Tenant};
use domus_provisioning::{FailedTenant, UpgradeReport, UpgradedTenant};

/// One tenant as seen by a platform administrator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantResponse {
    /// The tenant's ID.
    pub id: Uuid,

    /// The tenant's display name.
    pub name: String,

    /// The tenant's slug.
    pub slug: String,

    /// The tenant's physical database name.
    pub database_name: String,

    /// The tenant's lifecycle status.
    pub status: String,

    /// When the tenant was registered.
    pub created_at: DateTime<Utc>,
}

impl From<Tenant> for TenantResponse {
    fn from(tenant: Tenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name,
            slug: tenant.slug,
            database_name: tenant.database_name,
            status: tenant.status.to_string(),
            created_at: tenant.created_at,
        }
    }
}

/// Response for GET /tenants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantListResponse {
    /// Every registered tenant, oldest first.
    pub tenants: Vec<TenantResponse>,
}

/// Response after adding a member to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberCreatedResponse {
    /// The new membership's ID.
    pub membership_id: Uuid,

    /// The (possibly upserted) user's ID.
    pub user_id: Uuid,

    /// The tenant the user was added to.
    pub tenant_id: Uuid,

    /// The role granted.
    pub role: String,
}

impl From<Membership> for MemberCreatedResponse {
    fn from(m: Membership) -> Self {
        Self {
            membership_id: m.id,
            user_id: m.user_id,
            tenant_id: m.tenant_id,
            role: m.role_name,
        }
    }
}

/// One successfully upgraded tenant in a bulk-upgrade report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpgradedTenantResponse {
    /// The tenant's ID.
    pub tenant_id: Uuid,

    /// The tenant's slug.
    pub slug: String,
}

impl From<UpgradedTenant> for UpgradedTenantResponse {
    fn from(t: UpgradedTenant) -> Self {
        Self {
            tenant_id: t.tenant_id,
            slug: t.slug,
        }
    }
}

/// One failed tenant in a bulk-upgrade report, with the failure detail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FailedTenantResponse {
    /// The tenant's ID.
    pub tenant_id: Uuid,

    /// The tenant's slug.
    pub slug: String,

    /// What went wrong for this tenant.
    pub error: String,
}

impl From<FailedTenant> for FailedTenantResponse {
    fn from(t: FailedTenant) -> Self {
        Self {
            tenant_id: t.tenant_id,
            slug: t.slug,
            error: t.error,
        }
    }
}

/// Response for POST /tenants/upgrade.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpgradeReportResponse {
    /// Number of tenants the run touched.
    pub total: usize,

    /// Whether every tenant upgraded cleanly.
    pub clean: bool,

    /// Tenants now at the latest schema version.
    pub succeeded: Vec<UpgradedTenantResponse>,

    /// Tenants whose upgrade failed, with per-tenant detail.
    pub failed: Vec<FailedTenantResponse>,
}

impl From<UpgradeReport> for UpgradeReportResponse {
    fn from(report: UpgradeReport) -> Self {
        Self {
            total: report.total(),
            clean: report.is_clean(),
            succeeded: report.succeeded.into_iter().map(Into::into).collect(),
            failed: report.failed.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domus_db::TenantStatus;

    #[test]
    fn test_tenant_response_from_row() {
        let id = Uuid::new_v4();
        let tenant = Tenant {
            id,
            name: "Lakeside Residency".to_string(),
            slug: "lakeside".to_string(),
            database_name: "domus_t_lakeside".to_string(),
            database_url: None,
            status: TenantStatus::Provisioning,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = TenantResponse::from(tenant);
        assert_eq!(response.id, id);
        assert_eq!(response.status, "provisioning");
        assert_eq!(response.database_name, "domus_t_lakeside");
    }

    #[test]
    fn test_upgrade_report_response_counts() {
        let report = UpgradeReport {
            succeeded: vec![UpgradedTenant {
                tenant_id: Uuid::new_v4(),
                slug: "lakeside".to_string(),
            }],
            failed: vec![FailedTenant {
                tenant_id: Uuid::new_v4(),
                slug: "hillview".to_string(),
                error: "migration failed".to_string(),
            }],
        };

        let response = UpgradeReportResponse::from(report);
        assert_eq!(response.total, 2);
        assert!(!response.clean);
        assert_eq!(response.failed[0].error, "migration failed");
    }
}
