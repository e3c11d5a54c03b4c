//! Well-known role names.
//!
//! Global roles live in the registry's `user_roles` table and apply across
//! tenants. Tenant roles live in each tenant database's `roles` table; the
//! three defaults below are seeded at provisioning time, and tenants may add
//! their own alongside them.

/// Global role granting access to the platform administration surface.
pub const PLATFORM_ADMIN: &str = "platform_admin";

/// Default tenant role holding every permission in the catalog.
pub const ADMINISTRATOR: &str = "Administrator";

/// Default tenant role for day-to-day property management.
pub const MANAGER: &str = "Manager";

/// Default tenant role with read-only access.
pub const VIEWER: &str = "Viewer";
