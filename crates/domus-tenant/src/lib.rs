//! # domus-tenant
//!
//! Tower/Axum middleware for the tenant resolution stage.
//!
//! Every request entering a tenant-scoped router passes through
//! [`TenantResolutionLayer`], which decides which tenant the request
//! targets and whether that tenant may be served:
//!
//! - **Header extraction**: `X-Tenant-ID` is the authoritative tenant
//!   identifier.
//! - **Token cross-check**: a bearer token's `tid` claim is a fallback when
//!   the header is absent and must match the header when both are present.
//! - **Liveness**: the registry is consulted through a [`TenantGate`] on
//!   every request, so deactivating a tenant takes effect immediately even
//!   for unexpired tokens.
//! - **Context**: success inserts a [`TenantContext`] request extension,
//!   exactly once, immutable for the request's lifetime. Failure responds
//!   400 `invalid_tenant` and the inner service never runs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use axum::{Extension, Router, routing::get};
//! use domus_tenant::{PgTenantGate, TenantContext, TenantResolutionLayer};
//!
//! async fn list_units(Extension(ctx): Extension<TenantContext>) -> String {
//!     format!("Units for tenant: {}", ctx.tenant_id())
//! }
//!
//! let gate = Arc::new(PgTenantGate::new(registry_pool.clone()));
//! let app = Router::new()
//!     .route("/api/units", get(list_units))
//!     .layer(TenantResolutionLayer::new(gate));
//! ```

mod config;
mod error;
mod extract;
mod gate;
mod layer;
mod service;

pub use config::{TenantConfig, TenantConfigBuilder, DEFAULT_TENANT_HEADER};
pub use error::{ErrorResponse, TenantError};
pub use extract::{requested_tenant, tenant_from_header, TenantContext};
pub use gate::{PgTenantGate, StaticTenantGate, TenantGate};
pub use layer::TenantResolutionLayer;
pub use service::TenantResolutionService;
