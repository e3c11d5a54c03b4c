//! Embedded tenant-schema migrator.
//!
//! Unlike the registry migrations, which run once per process against one
//! database, the tenant migrator runs against every tenant's physical
//! database: once at provisioning, and again on each bulk upgrade.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;

/// The tenant schema, embedded at compile time from `migrations/`.
///
/// The migrator takes a database-level lock while running, so two racing
/// provisioning calls serialize instead of producing divergent schemas.
pub static TENANT_MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply all pending tenant-schema migrations to one tenant database.
///
/// Versioned and idempotent: re-running against an up-to-date database
/// applies nothing.
pub async fn run_tenant_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    TENANT_MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrator_embeds_the_tenant_schema() {
        let versions: Vec<i64> = TENANT_MIGRATOR
            .iter()
            .map(|m| m.version)
            .collect();
        assert!(versions.contains(&1), "core schema migration missing");
        assert!(versions.contains(&2), "role catalog seed missing");
    }
}
