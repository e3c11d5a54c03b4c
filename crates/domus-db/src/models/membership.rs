//! Membership entity model.
//!
//! A membership associates one user with one tenant and names the role the
//! user holds there. The role is referenced by name because the role catalog
//! lives inside the tenant's own database.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domus_core::{MembershipId, TenantId, UserId};

use crate::models::tenant::TenantStatus;
use crate::DbError;

/// A user-to-tenant association.
///
/// At most one membership exists per (user, tenant) pair.
#[derive(Debug, Clone, FromRow)]
pub struct Membership {
    /// Unique identifier for this membership.
    pub id: uuid::Uuid,

    /// The user who belongs to the tenant.
    pub user_id: uuid::Uuid,

    /// The tenant the user belongs to.
    pub tenant_id: uuid::Uuid,

    /// Name of the role the user holds inside the tenant.
    pub role_name: String,

    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Get the membership ID as a typed `MembershipId`.
    #[must_use]
    pub fn membership_id(&self) -> MembershipId {
        MembershipId::from_uuid(self.id)
    }

    /// Get the user ID as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }

    /// Get the tenant ID as a typed `TenantId`.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        TenantId::from_uuid(self.tenant_id)
    }

    /// Find the membership for a (user, tenant) pair.
    pub async fn find_for_user_and_tenant(
        pool: &sqlx::PgPool,
        user_id: uuid::Uuid,
        tenant_id: uuid::Uuid,
    ) -> Result<Option<Self>, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, user_id, tenant_id, role_name, created_at
            FROM memberships
            WHERE user_id = $1 AND tenant_id = $2
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Count the memberships a user holds.
    pub async fn count_for_user(pool: &sqlx::PgPool, user_id: uuid::Uuid) -> Result<i64, DbError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM memberships WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map_err(DbError::QueryFailed)?;

        Ok(result.0)
    }

    /// Create a membership.
    ///
    /// A duplicate (user, tenant) pair surfaces as a unique violation; use
    /// [`DbError::is_unique_violation`] to map it.
    pub async fn create(
        pool: &sqlx::PgPool,
        user_id: uuid::Uuid,
        tenant_id: uuid::Uuid,
        role_name: &str,
    ) -> Result<Self, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO memberships (user_id, tenant_id, role_name)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, tenant_id, role_name, created_at
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .bind(role_name)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)
    }
}

/// A membership joined with its tenant, for the tenant-selection list
/// returned after login.
#[derive(Debug, Clone, FromRow)]
pub struct MembershipWithTenant {
    /// The tenant's ID.
    pub tenant_id: uuid::Uuid,

    /// The tenant's display name.
    pub tenant_name: String,

    /// The tenant's slug.
    pub tenant_slug: String,

    /// The tenant's lifecycle status.
    pub tenant_status: TenantStatus,

    /// The role the user holds in this tenant.
    pub role_name: String,
}

impl MembershipWithTenant {
    /// List every tenant a user belongs to, with the role held in each.
    pub async fn list_for_user(
        pool: &sqlx::PgPool,
        user_id: uuid::Uuid,
    ) -> Result<Vec<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                t.id AS tenant_id,
                t.name AS tenant_name,
                t.slug AS tenant_slug,
                t.status AS tenant_status,
                m.role_name
            FROM memberships m
            JOIN tenants t ON t.id = m.tenant_id
            WHERE m.user_id = $1
            ORDER BY t.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)
    }
}

/// A membership joined with its user, for the tenant-side member list.
#[derive(Debug, Clone, FromRow)]
pub struct MembershipWithUser {
    /// The user's ID.
    pub user_id: uuid::Uuid,

    /// The user's display name.
    pub user_name: String,

    /// The user's mobile number.
    pub user_mobile: String,

    /// Whether the user account is active.
    pub user_is_active: bool,

    /// The role the user holds in this tenant.
    pub role_name: String,
}

impl MembershipWithUser {
    /// List every member of a tenant, with each user's identity fields.
    pub async fn list_for_tenant(
        pool: &sqlx::PgPool,
        tenant_id: uuid::Uuid,
    ) -> Result<Vec<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                u.id AS user_id,
                u.name AS user_name,
                u.mobile AS user_mobile,
                u.is_active AS user_is_active,
                m.role_name
            FROM memberships m
            JOIN users u ON u.id = m.user_id
            WHERE m.tenant_id = $1
            ORDER BY u.name ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_id_conversions() {
        let membership = Membership {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            tenant_id: uuid::Uuid::new_v4(),
            role_name: "Manager".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(*membership.membership_id().as_uuid(), membership.id);
        assert_eq!(*membership.user_id().as_uuid(), membership.user_id);
        assert_eq!(*membership.tenant_id().as_uuid(), membership.tenant_id);
    }
}
