//! Registry database access for the domus platform.
//!
//! This crate owns the global registry database (tenants, users,
//! memberships, credentials, global roles) and the directory of per-tenant
//! connection pools. Business data never lives here; each tenant's own
//! database is created by the provisioning crate and reached through
//! [`TenantPools`].

pub mod bootstrap;
pub mod directory;
pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use bootstrap::{seed_platform_admin, BootstrapReport};
pub use directory::{tenant_connect_options, TenantPools};
pub use error::DbError;
pub use migrations::run_registry_migrations;
pub use pool::DbPool;

pub use models::membership::{Membership, MembershipWithTenant, MembershipWithUser};
pub use models::one_time_passcode::OneTimePasscode;
pub use models::refresh_token::{NewRefreshToken, RefreshToken};
pub use models::tenant::{Tenant, TenantStatus};
pub use models::tenant_role::TenantRole;
pub use models::user::User;
pub use models::user_role::UserRole;
