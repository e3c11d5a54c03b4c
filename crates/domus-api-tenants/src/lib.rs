//! Tenant administration API endpoints for the domus platform.
//!
//! This crate provides the REST surface platform administrators use to
//! operate tenants (all routes gated on the `platform_admin` global role):
//! - Create and provision (POST /tenants)
//! - List (GET /tenants)
//! - Lifecycle (POST /tenants/{id}/activate, POST /tenants/{id}/deactivate)
//! - Membership (POST /tenants/{id}/members)
//! - Bulk schema upgrade (POST /tenants/upgrade)
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::Router;
//! use domus_api_tenants::{tenants_admin_router, TenantAdminState};
//!
//! let state = TenantAdminState::new(pool, tenant_pools);
//! let app = Router::new()
//!     .nest("/tenants", tenants_admin_router(state));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;

// Re-export public API
pub use error::{ErrorResponse, TenantAdminError};
pub use models::{
    AddMemberRequest, CreateTenantRequest, FailedTenantResponse, MemberCreatedResponse,
    TenantListResponse, TenantResponse, UpgradeReportResponse, UpgradedTenantResponse,
};
pub use router::{tenants_admin_router, TenantAdminState};
