//! Tenant registry model.
//!
//! Provides the tenant entity, its lifecycle status, and the physical
//! database locator used to route tenant-scoped queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Type};
use uuid::Uuid;

use domus_core::TenantId;

use crate::DbError;

/// Lifecycle status of a tenant.
///
/// - `Provisioning`: the registry row exists but the physical database has
///   not been confirmed yet. Resolution rejects the tenant; creation can be
///   retried safely.
/// - `Active`: fully provisioned and serving requests.
/// - `Inactive`: soft-deactivated. The database is kept but resolution
///   rejects the tenant on the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(type_name = "tenant_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    /// Registry row written, physical database not yet confirmed.
    Provisioning,
    /// Fully provisioned and resolvable.
    Active,
    /// Soft-deactivated; rejected by resolution.
    Inactive,
}

impl std::fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenantStatus::Provisioning => write!(f, "provisioning"),
            TenantStatus::Active => write!(f, "active"),
            TenantStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// A tenant in the registry.
///
/// Each tenant owns one isolated physical database; the registry row carries
/// the locator (`database_name`, optionally a full `database_url` override)
/// used to reach it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique identifier for the tenant.
    pub id: Uuid,

    /// Human-readable name (e.g., "Lakeside Residency").
    pub name: String,

    /// URL-safe slug, unique across all tenants (e.g., "lakeside").
    pub slug: String,

    /// Name of the tenant's physical database on the shared server.
    pub database_name: String,

    /// Optional full connection URL override. When set, the tenant's
    /// database lives outside the shared server and this URL wins over
    /// `database_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Lifecycle status.
    pub status: TenantStatus,

    /// When the tenant was created.
    pub created_at: DateTime<Utc>,

    /// When the tenant was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// Get the tenant ID as a typed `TenantId`.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        TenantId::from_uuid(self.id)
    }

    /// Returns `true` if the tenant is active and resolvable.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }

    /// Returns `true` if provisioning has started but not completed.
    #[must_use]
    pub fn is_provisioning(&self) -> bool {
        self.status == TenantStatus::Provisioning
    }

    /// Finds a tenant by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, name, slug, database_name, database_url, status, created_at, updated_at
            FROM tenants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Finds a tenant by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, name, slug, database_name, database_url, status, created_at, updated_at
            FROM tenants
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Lists all tenants.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, name, slug, database_name, database_url, status, created_at, updated_at
            FROM tenants
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Lists every tenant whose physical database creation has completed
    /// (active and inactive, never still-provisioning rows).
    pub async fn list_provisioned(pool: &PgPool) -> Result<Vec<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, name, slug, database_name, database_url, status, created_at, updated_at
            FROM tenants
            WHERE status <> 'provisioning'
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Check if a slug already exists.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, DbError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM tenants WHERE slug = $1)
            "#,
        )
        .bind(slug)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(result.0)
    }

    /// Create a new tenant row in `provisioning` status.
    ///
    /// The status is flipped to `active` by the caller only after the
    /// physical database has been created and migrated.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        slug: &str,
        database_name: &str,
    ) -> Result<Self, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO tenants (name, slug, database_name, status)
            VALUES ($1, $2, $3, 'provisioning')
            RETURNING id, name, slug, database_name, database_url, status, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(database_name)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Update a tenant's lifecycle status.
    ///
    /// Returns `DbError::NotFound` if no tenant has the given ID.
    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: TenantStatus,
    ) -> Result<Self, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE tenants
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, database_name, database_url, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)?
        .ok_or_else(|| DbError::NotFound(format!("tenant {id}")))
    }
}
