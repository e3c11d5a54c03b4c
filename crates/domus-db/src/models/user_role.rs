//! Global role assignment model.
//!
//! Global roles live in the registry and gate cross-tenant administrative
//! operations. They are unrelated to the role catalogs inside tenant
//! databases.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domus_core::UserId;

use crate::DbError;

/// A global role assignment for a user.
#[derive(Debug, Clone, FromRow)]
pub struct UserRole {
    /// The user this role is assigned to.
    pub user_id: uuid::Uuid,

    /// The role identifier (e.g., "platform_admin").
    pub role_name: String,

    /// When the role was assigned.
    pub created_at: DateTime<Utc>,
}

impl UserRole {
    /// Get the user ID as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }

    /// Fetch all global role names for a user.
    pub async fn get_user_roles(
        pool: &sqlx::PgPool,
        user_id: uuid::Uuid,
    ) -> Result<Vec<String>, DbError> {
        let roles: Vec<UserRole> = sqlx::query_as(
            r#"SELECT user_id, role_name, created_at FROM user_roles WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(roles.into_iter().map(|r| r.role_name).collect())
    }

    /// Grant a role to a user. Granting an already-held role is a no-op.
    pub async fn grant(
        pool: &sqlx::PgPool,
        user_id: uuid::Uuid,
        role_name: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_name)
            VALUES ($1, $2)
            ON CONFLICT (user_id, role_name) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_name)
        .execute(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_user_id_conversion() {
        let uuid = uuid::Uuid::new_v4();
        let role = UserRole {
            user_id: uuid,
            role_name: "platform_admin".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(*role.user_id().as_uuid(), uuid);
    }
}
