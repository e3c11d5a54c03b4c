//! Error types for tenant provisioning.

use thiserror::Error;

use domus_db::DbError;

/// Errors that can occur while provisioning or upgrading tenant databases.
///
/// Messages carry the database name (a charset-validated identifier), never
/// the connection URL.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The tenant's database name fails the identifier rules.
    #[error("Invalid tenant database name: {0}")]
    InvalidDatabaseName(String),

    /// The database already exists and the tenant is not resumable.
    #[error("Tenant database {0} already exists")]
    DatabaseAlreadyExists(String),

    /// `CREATE DATABASE` failed.
    #[error("Failed to create tenant database {database}: {source}")]
    CreateFailed {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    /// Could not open a pool to the tenant database.
    #[error("Failed to connect to tenant database {database}: {source}")]
    ConnectFailed {
        database: String,
        #[source]
        source: DbError,
    },

    /// The embedded migrator failed against the tenant database.
    #[error("Migration failed for tenant database {database}: {source}")]
    MigrationFailed {
        database: String,
        #[source]
        source: sqlx::migrate::MigrateError,
    },
}

impl ProvisioningError {
    /// Check if this is an invalid database name error.
    #[must_use]
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, ProvisioningError::InvalidDatabaseName(_))
    }

    /// Check if this is a database-already-exists error.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, ProvisioningError::DatabaseAlreadyExists(_))
    }

    /// Check if this is a migration failure.
    #[must_use]
    pub fn is_migration_failure(&self) -> bool {
        matches!(self, ProvisioningError::MigrationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_database() {
        let err = ProvisioningError::DatabaseAlreadyExists("domus_t_lakeside".to_string());
        assert!(err.to_string().contains("domus_t_lakeside"));
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_predicates_are_disjoint() {
        let err = ProvisioningError::InvalidDatabaseName("Bad-Name".to_string());
        assert!(err.is_invalid_name());
        assert!(!err.is_already_exists());
        assert!(!err.is_migration_failure());
    }
}
