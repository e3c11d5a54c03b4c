//! One-time passcode entity model.
//!
//! Passcodes are stored as SHA-256 hex digests, never plaintext. Issuing a
//! new code supersedes any pending code for the same mobile (latest wins),
//! and verification consumes a code at most once via a conditional update.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domus_core::UserId;

use crate::DbError;

/// A one-time passcode record.
#[derive(Debug, Clone, FromRow)]
pub struct OneTimePasscode {
    /// Unique identifier for this passcode record.
    pub id: uuid::Uuid,

    /// The user this passcode was issued to.
    pub user_id: uuid::Uuid,

    /// The mobile number the passcode was sent to.
    pub mobile: String,

    /// SHA-256 hex digest of the passcode.
    pub code_hash: String,

    /// When the passcode stops being redeemable.
    pub expires_at: DateTime<Utc>,

    /// When the passcode was successfully verified (None if pending).
    pub verified_at: Option<DateTime<Utc>>,

    /// Number of failed verification attempts so far.
    pub attempts: i32,

    /// When the passcode was issued.
    pub created_at: DateTime<Utc>,
}

impl OneTimePasscode {
    /// Get the user ID as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }

    /// Check if the passcode has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Check if the passcode has already been verified.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }

    /// Check if the attempt budget is spent.
    #[must_use]
    pub fn is_exhausted(&self, max_attempts: i32) -> bool {
        self.attempts >= max_attempts
    }

    /// Issue a passcode for a mobile, superseding any pending one.
    ///
    /// The delete and insert run in one transaction so at most one
    /// unverified code exists per mobile at any time.
    pub async fn issue(
        pool: &sqlx::PgPool,
        user_id: uuid::Uuid,
        mobile: &str,
        code_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, DbError> {
        let mut tx = pool.begin().await.map_err(DbError::QueryFailed)?;

        sqlx::query("DELETE FROM one_time_passcodes WHERE mobile = $1 AND verified_at IS NULL")
            .bind(mobile)
            .execute(&mut *tx)
            .await
            .map_err(DbError::QueryFailed)?;

        let passcode = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO one_time_passcodes (user_id, mobile, code_hash, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, mobile, code_hash, expires_at, verified_at, attempts, created_at
            "#,
        )
        .bind(user_id)
        .bind(mobile)
        .bind(code_hash)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::QueryFailed)?;

        tx.commit().await.map_err(DbError::QueryFailed)?;

        Ok(passcode)
    }

    /// Find the pending (unverified) passcode for a mobile, newest first.
    pub async fn find_pending_by_mobile(
        pool: &sqlx::PgPool,
        mobile: &str,
    ) -> Result<Option<Self>, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, user_id, mobile, code_hash, expires_at, verified_at, attempts, created_at
            FROM one_time_passcodes
            WHERE mobile = $1 AND verified_at IS NULL
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(mobile)
        .fetch_optional(pool)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Record a failed verification attempt and return the new count.
    pub async fn record_failed_attempt(
        pool: &sqlx::PgPool,
        id: uuid::Uuid,
    ) -> Result<i32, DbError> {
        let result: (i32,) = sqlx::query_as(
            r#"
            UPDATE one_time_passcodes
            SET attempts = attempts + 1
            WHERE id = $1
            RETURNING attempts
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(result.0)
    }

    /// Consume the passcode, marking it verified.
    ///
    /// The update is conditional on the code being unverified and unexpired,
    /// so concurrent verifications succeed at most once. Returns `true` for
    /// the winning caller.
    pub async fn consume(pool: &sqlx::PgPool, id: uuid::Uuid) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE one_time_passcodes
            SET verified_at = NOW()
            WHERE id = $1 AND verified_at IS NULL AND expires_at > NOW()
            "#,
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_passcode(
        expires_at: DateTime<Utc>,
        verified_at: Option<DateTime<Utc>>,
        attempts: i32,
    ) -> OneTimePasscode {
        OneTimePasscode {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            mobile: "+919800000001".to_string(),
            code_hash: "ab".repeat(32),
            expires_at,
            verified_at,
            attempts,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_passcode() {
        let otp = make_passcode(Utc::now() + Duration::minutes(5), None, 0);
        assert!(!otp.is_expired());
        assert!(!otp.is_verified());
        assert!(!otp.is_exhausted(5));
    }

    #[test]
    fn test_expired_passcode() {
        let otp = make_passcode(Utc::now() - Duration::minutes(1), None, 0);
        assert!(otp.is_expired());
    }

    #[test]
    fn test_verified_passcode() {
        let otp = make_passcode(Utc::now() + Duration::minutes(5), Some(Utc::now()), 1);
        assert!(otp.is_verified());
    }

    #[test]
    fn test_exhausted_passcode() {
        let otp = make_passcode(Utc::now() + Duration::minutes(5), None, 5);
        assert!(otp.is_exhausted(5));
        assert!(!otp.is_exhausted(6));
    }
}
