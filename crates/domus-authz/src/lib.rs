//! Permission authorization for the Domus platform.
//!
//! The last of the three request stages, after token authentication and
//! tenant resolution. Gates are route-scoped Tower layers deciding purely
//! from the request extensions the earlier stages populated:
//!
//! - [`PermissionLayer`] requires one permission system-name from the
//!   token's snapshot, and additionally enforces that the token's tenant
//!   scope matches the resolved [`TenantContext`]. A base token never
//!   passes a permission gate.
//! - [`GlobalRoleLayer`] requires one global role (registry-scoped) and
//!   guards the platform administration surface.
//!
//! Denials are deliberately uniform: apart from the 401 for a missing or
//! invalid token, every rejection renders the same 403 body, so a caller
//! cannot probe whether a tenant, route, or permission exists.
//!
//! Permission checks read only the token snapshot; the tenant database is
//! never consulted per request. Tightened grants therefore take effect on
//! the next token issuance, not mid-token.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use axum::{routing::get, Router};
//! use domus_authz::{permissions, roles, GlobalRoleLayer, PermissionLayer};
//!
//! let tenant_routes = Router::new()
//!     .route("/api/members", get(list_members))
//!     .route_layer(PermissionLayer::new(permissions::MEMBERS_VIEW));
//!
//! let admin_routes = Router::new()
//!     .route("/tenants", get(list_tenants))
//!     .route_layer(GlobalRoleLayer::new(roles::PLATFORM_ADMIN));
//! ```
//!
//! [`TenantContext`]: domus_tenant::TenantContext

pub mod check;
pub mod error;
pub mod layer;
pub mod permissions;
pub mod roles;
pub mod service;

pub use check::{check_global_role, check_permission};
pub use error::{AuthzError, ErrorResponse};
pub use layer::{GlobalRoleLayer, PermissionLayer};
pub use service::{AuthzFuture, GlobalRoleService, PermissionService};
