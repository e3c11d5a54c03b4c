//! Tenant database provisioning for the Domus platform.
//!
//! Every tenant owns one physical PostgreSQL database. This crate creates
//! those databases, applies the embedded tenant schema (role catalog plus
//! its permission seed), and upgrades existing tenants in bulk.
//!
//! Provisioning is two-phase from the registry's point of view: the caller
//! registers the tenant as `provisioning`, calls
//! [`TenantProvisioner::create_tenant_database`], and flips the row `active`
//! only on success. A failed run leaves the row `provisioning`, and
//! repeating the call resumes: the duplicate database is tolerated in that
//! state and the versioned migrator reconciles whatever schema exists.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use domus_provisioning::{database_name_for_slug, TenantProvisioner};
//!
//! let provisioner = TenantProvisioner::new(admin_pool, tenant_pools);
//!
//! let database_name = database_name_for_slug("lakeside-towers")?;
//! let tenant = Tenant::create(&registry, "Lakeside Towers", "lakeside-towers", &database_name).await?;
//! provisioner.create_tenant_database(&tenant).await?;
//! Tenant::set_status(&registry, tenant.id, TenantStatus::Active).await?;
//! ```

pub mod error;
pub mod locator;
pub mod migrations;
pub mod provisioner;

pub use error::ProvisioningError;
pub use locator::{database_name_for_slug, validate_database_name, DATABASE_NAME_PREFIX};
pub use migrations::{run_tenant_migrations, TENANT_MIGRATOR};
pub use provisioner::{FailedTenant, TenantProvisioner, UpgradeReport, UpgradedTenant};
