//! Refresh token entity model.
//!
//! Represents an opaque refresh token stored in the database for session
//! rotation and revocation. Tokens are stored as SHA-256 hashes; the opaque
//! value is only ever transmitted to the client.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::net::IpAddr;

use domus_core::{TenantId, UserId};

use crate::DbError;

/// A refresh token record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    /// Unique identifier for this token record.
    pub id: uuid::Uuid,

    /// The user who owns this token.
    pub user_id: uuid::Uuid,

    /// The tenant scope this token refreshes. `None` for base-scope tokens
    /// issued before tenant selection.
    pub tenant_id: Option<uuid::Uuid>,

    /// SHA-256 hash of the opaque token value.
    pub token_hash: String,

    /// When the token expires (7 days from creation by default).
    pub expires_at: DateTime<Utc>,

    /// When the token was revoked or redeemed (None if still live).
    pub revoked_at: Option<DateTime<Utc>>,

    /// When the token was created.
    pub created_at: DateTime<Utc>,

    /// The client's user agent (optional, for auditing).
    pub user_agent: Option<String>,

    /// The client's IP address as string (optional, for auditing).
    /// Stored as String because INET type maps to String in sqlx.
    pub ip_address: Option<String>,
}

impl RefreshToken {
    /// Check if the token is still redeemable (not expired and not revoked).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.revoked_at.is_none() && self.expires_at > Utc::now()
    }

    /// Check if the token has been revoked or redeemed.
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check if the token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Get the user ID as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }

    /// Get the tenant scope as a typed `TenantId`, if any.
    #[must_use]
    pub fn tenant_scope(&self) -> Option<TenantId> {
        self.tenant_id.map(TenantId::from_uuid)
    }

    /// Get the IP address as parsed `IpAddr` (if present and valid).
    #[must_use]
    pub fn ip_addr(&self) -> Option<IpAddr> {
        self.ip_address.as_ref().and_then(|s| s.parse().ok())
    }

    /// Atomically claim the token for redemption.
    ///
    /// The conditional update is the at-most-once guarantee: of any number
    /// of concurrent redemptions of the same token, exactly one observes a
    /// returned row and the rest get `None`. No in-process locking is
    /// involved.
    pub async fn claim(pool: &sqlx::PgPool, token_hash: &str) -> Result<Option<Self>, DbError> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE token_hash = $1 AND revoked_at IS NULL AND expires_at > NOW()
            RETURNING id, user_id, tenant_id, token_hash, expires_at, revoked_at,
                      created_at, user_agent, ip_address
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Look up a token by hash without touching it. Used to diagnose a
    /// failed claim (replayed vs. expired vs. unknown).
    pub async fn find_by_hash(
        pool: &sqlx::PgPool,
        token_hash: &str,
    ) -> Result<Option<Self>, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, user_id, tenant_id, token_hash, expires_at, revoked_at,
                   created_at, user_agent, ip_address
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Revoke a token by hash. Returns `true` if a live token was revoked.
    ///
    /// Revoking an already-revoked or unknown token is not an error; logout
    /// is replay-safe.
    pub async fn revoke(pool: &sqlx::PgPool, token_hash: &str) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE token_hash = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .execute(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Builder for inserting new refresh token records.
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    user_id: uuid::Uuid,
    tenant_id: Option<uuid::Uuid>,
    token_hash: String,
    expires_at: DateTime<Utc>,
    user_agent: Option<String>,
    ip_address: Option<IpAddr>,
}

impl NewRefreshToken {
    /// Create a new builder with required fields. The token starts
    /// base-scoped; call [`tenant_scope`](Self::tenant_scope) to bind it
    /// to a tenant.
    #[must_use]
    pub fn new(user_id: uuid::Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            tenant_id: None,
            token_hash,
            expires_at,
            user_agent: None,
            ip_address: None,
        }
    }

    /// Bind the token to a tenant scope.
    #[must_use]
    pub fn tenant_scope(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(*tenant_id.as_uuid());
        self
    }

    /// Set the client's user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the client's IP address.
    #[must_use]
    pub fn ip_address(mut self, ip: IpAddr) -> Self {
        self.ip_address = Some(ip);
        self
    }

    /// Insert the record and return the stored row.
    pub async fn insert(self, pool: &sqlx::PgPool) -> Result<RefreshToken, DbError> {
        sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (user_id, tenant_id, token_hash, expires_at, user_agent, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, tenant_id, token_hash, expires_at, revoked_at,
                      created_at, user_agent, ip_address
            "#,
        )
        .bind(self.user_id)
        .bind(self.tenant_id)
        .bind(self.token_hash)
        .bind(self.expires_at)
        .bind(self.user_agent)
        .bind(self.ip_address.map(|ip| ip.to_string()))
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_token(
        expires_at: DateTime<Utc>,
        revoked_at: Option<DateTime<Utc>>,
    ) -> RefreshToken {
        RefreshToken {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            tenant_id: None,
            token_hash: "testhash".to_string(),
            expires_at,
            revoked_at,
            created_at: Utc::now(),
            user_agent: None,
            ip_address: None,
        }
    }

    #[test]
    fn test_valid_token() {
        let token = create_test_token(Utc::now() + Duration::hours(1), None);
        assert!(token.is_valid());
        assert!(!token.is_revoked());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_expired_token() {
        let token = create_test_token(Utc::now() - Duration::hours(1), None);
        assert!(!token.is_valid());
        assert!(!token.is_revoked());
        assert!(token.is_expired());
    }

    #[test]
    fn test_revoked_token() {
        let token = create_test_token(Utc::now() + Duration::hours(1), Some(Utc::now()));
        assert!(!token.is_valid());
        assert!(token.is_revoked());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_tenant_scope() {
        let mut token = create_test_token(Utc::now() + Duration::hours(1), None);
        assert!(token.tenant_scope().is_none());

        let tenant = uuid::Uuid::new_v4();
        token.tenant_id = Some(tenant);
        assert_eq!(*token.tenant_scope().unwrap().as_uuid(), tenant);
    }

    #[test]
    fn test_ip_addr_parsing() {
        let mut token = create_test_token(Utc::now() + Duration::hours(1), None);
        token.ip_address = Some("192.168.1.1".to_string());

        let ip = token.ip_addr().unwrap();
        assert_eq!(ip.to_string(), "192.168.1.1");
    }
}
