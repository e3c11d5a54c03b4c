//! Role catalog model for tenant databases.
//!
//! Unlike every other model in this crate, these queries run against a
//! tenant's own physical database (a pool from [`TenantPools`]), not the
//! registry. The catalog is seeded by the provisioning migrations.
//!
//! [`TenantPools`]: crate::directory::TenantPools

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::DbError;

/// A role inside a tenant's catalog.
#[derive(Debug, Clone, FromRow)]
pub struct TenantRole {
    /// Unique identifier for the role.
    pub id: uuid::Uuid,

    /// Role name, unique within the tenant (e.g., "Administrator").
    pub name: String,

    /// Optional human-readable description.
    pub description: Option<String>,

    /// When the role was created.
    pub created_at: DateTime<Utc>,
}

impl TenantRole {
    /// Find a role by name in the tenant's catalog.
    pub async fn find_by_name(pool: &sqlx::PgPool, name: &str) -> Result<Option<Self>, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, name, description, created_at
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Resolve the flattened permission set for a role.
    ///
    /// Returns the system names of every permission granted to the role,
    /// sorted for a stable snapshot. An unknown role resolves to an empty
    /// set rather than an error; the membership names the role, and a
    /// catalog drift should deny rather than fail.
    pub async fn resolve_permissions(
        pool: &sqlx::PgPool,
        role_name: &str,
    ) -> Result<Vec<String>, DbError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT p.system_name
            FROM permissions p
            JOIN role_permissions rp ON rp.permission_id = p.id
            JOIN roles r ON r.id = rp.role_id
            WHERE r.name = $1
            ORDER BY p.system_name ASC
            "#,
        )
        .bind(role_name)
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
