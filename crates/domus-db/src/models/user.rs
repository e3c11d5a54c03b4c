//! User entity model.
//!
//! Users are global: one row per human, shared across every tenant they
//! belong to. Tenant association lives in `memberships`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domus_core::UserId;

use crate::DbError;

/// A user account in the registry.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique identifier for the user.
    pub id: uuid::Uuid,

    /// Display name.
    pub name: String,

    /// Email address, globally unique.
    pub email: String,

    /// Mobile number, globally unique. The OTP login identifier.
    pub mobile: String,

    /// Whether the account is active (false = deactivated).
    pub is_active: bool,

    /// When the user was created.
    pub created_at: DateTime<Utc>,

    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Get the user ID as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.id)
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &sqlx::PgPool, id: uuid::Uuid) -> Result<Option<Self>, DbError> {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(DbError::QueryFailed)
    }

    /// Find a user by mobile number.
    pub async fn find_by_mobile(
        pool: &sqlx::PgPool,
        mobile: &str,
    ) -> Result<Option<Self>, DbError> {
        sqlx::query_as("SELECT * FROM users WHERE mobile = $1")
            .bind(mobile)
            .fetch_optional(pool)
            .await
            .map_err(DbError::QueryFailed)
    }

    /// Create a user or refresh an existing one keyed by mobile number.
    ///
    /// This is the invite path: adding a member to a tenant upserts the
    /// global user row so the same human is never duplicated per tenant.
    pub async fn upsert_by_mobile(
        pool: &sqlx::PgPool,
        name: &str,
        email: &str,
        mobile: &str,
    ) -> Result<Self, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (name, email, mobile)
            VALUES ($1, $2, $3)
            ON CONFLICT (mobile) DO UPDATE
                SET name = EXCLUDED.name, email = EXCLUDED.email, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(mobile)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)
    }
}
