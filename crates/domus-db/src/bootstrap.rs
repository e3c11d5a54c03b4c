//! Idempotent registry seeding run at startup.
//!
//! Ensures the configured platform administrator exists and holds the
//! `platform_admin` global role before the server starts accepting
//! requests. The whole seed runs inside one transaction holding a
//! transaction-scoped advisory lock, so concurrently starting instances
//! serialize instead of racing.

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::DbError;

/// Advisory lock key for the startup seed ("DOMUSREG" in ASCII).
const BOOTSTRAP_LOCK_KEY: i64 = 0x444F_4D55_5352_4547;

/// The global role granted to the seeded administrator.
const PLATFORM_ADMIN_ROLE: &str = "platform_admin";

/// What a bootstrap run found or changed.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// The platform administrator's user ID.
    pub admin_user_id: Uuid,

    /// Whether this run created the user row.
    pub user_created: bool,

    /// Whether this run granted the `platform_admin` role.
    pub role_granted: bool,
}

/// Ensure a platform administrator exists and holds `platform_admin`.
///
/// The user is keyed by mobile, same as the member-invite path. Safe to
/// call on every startup: when the user and grant already exist the run
/// changes nothing and reports so.
///
/// # Errors
///
/// Returns [`DbError::QueryFailed`] if any statement fails, including a
/// unique violation when the email is already taken by a different user.
#[instrument(skip_all)]
pub async fn seed_platform_admin(
    pool: &PgPool,
    name: &str,
    email: &str,
    mobile: &str,
) -> Result<BootstrapReport, DbError> {
    let mut tx = pool.begin().await.map_err(DbError::QueryFailed)?;

    // Serializes concurrent bootstrap runs; released at commit.
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(BOOTSTRAP_LOCK_KEY)
        .execute(&mut *tx)
        .await
        .map_err(DbError::QueryFailed)?;

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE mobile = $1")
        .bind(mobile)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::QueryFailed)?;

    let (admin_user_id, user_created) = match existing {
        Some((id,)) => (id, false),
        None => {
            let (id,): (Uuid,) = sqlx::query_as(
                "INSERT INTO users (name, email, mobile) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(name)
            .bind(email)
            .bind(mobile)
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::QueryFailed)?;
            (id, true)
        }
    };

    let grant = sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role_name)
        VALUES ($1, $2)
        ON CONFLICT (user_id, role_name) DO NOTHING
        "#,
    )
    .bind(admin_user_id)
    .bind(PLATFORM_ADMIN_ROLE)
    .execute(&mut *tx)
    .await
    .map_err(DbError::QueryFailed)?;

    tx.commit().await.map_err(DbError::QueryFailed)?;

    Ok(BootstrapReport {
        admin_user_id,
        user_created,
        role_granted: grant.rows_affected() > 0,
    })
}
