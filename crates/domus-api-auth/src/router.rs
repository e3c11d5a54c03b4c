//! Authentication API router configuration.
//!
//! Three routers with different middleware expectations:
//!
//! - [`auth_router`] — public endpoints (no token required):
//!   - POST /auth/otp/request
//!   - POST /auth/otp/verify
//!   - POST /auth/refresh
//!   - POST /auth/logout
//! - [`session_router`] — requires an authenticated caller (any token):
//!   - POST /session/tenant
//!   - GET /session/tenants
//! - [`api_router`] — requires a tenant token and a resolved tenant:
//!   - GET /api/me
//!   - GET /api/members (gated on `Members.View`)
//!
//! The routers carry their own service extensions. JWT authentication and
//! tenant resolution are applied by the application around the session and
//! api routers.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use sqlx::PgPool;
use std::sync::Arc;

use domus_authz::{permissions, PermissionLayer};

use crate::handlers::{
    list_members_handler, list_tenants_handler, logout_handler, me_handler, refresh_handler,
    request_otp_handler, select_tenant_handler, verify_otp_handler,
};
use crate::services::{OtpService, TokenService};

/// Shared state for the authentication routers.
#[derive(Clone)]
pub struct AuthApiState {
    /// Registry database pool.
    pub pool: PgPool,
    /// Token issuance and rotation service.
    pub token_service: Arc<TokenService>,
    /// One-time passcode service.
    pub otp_service: Arc<OtpService>,
}

impl AuthApiState {
    /// Create a new auth state.
    #[must_use]
    pub fn new(pool: PgPool, token_service: TokenService, otp_service: OtpService) -> Self {
        Self {
            pool,
            token_service: Arc::new(token_service),
            otp_service: Arc::new(otp_service),
        }
    }
}

/// Create the public authentication router.
///
/// None of these endpoints require a bearer token: the OTP pair is how a
/// caller first authenticates, and refresh/logout authenticate by
/// possession of the opaque refresh token.
pub fn auth_router(state: AuthApiState) -> Router {
    Router::new()
        .route("/otp/request", post(request_otp_handler))
        .route("/otp/verify", post(verify_otp_handler))
        .route("/refresh", post(refresh_handler))
        .route("/logout", post(logout_handler))
        .layer(Extension(state.pool))
        .layer(Extension(state.token_service))
        .layer(Extension(state.otp_service))
}

/// Create the session router for tenant selection.
///
/// The application must wrap this router with the JWT middleware; handlers
/// extract `Extension<UserId>` inserted by it. A base token is sufficient,
/// so no tenant resolution applies here.
pub fn session_router(state: AuthApiState) -> Router {
    Router::new()
        .route("/tenant", post(select_tenant_handler))
        .route("/tenants", get(list_tenants_handler))
        .layer(Extension(state.pool))
        .layer(Extension(state.token_service))
}

/// Create the tenant-scoped API router.
///
/// The application must wrap this router with the JWT middleware and the
/// tenant resolution layer; handlers extract `Extension<TenantContext>`.
/// The members route is additionally gated on the `Members.View`
/// permission from the token snapshot.
pub fn api_router(state: AuthApiState) -> Router {
    Router::new()
        .route("/members", get(list_members_handler))
        .route_layer(PermissionLayer::new(permissions::MEMBERS_VIEW))
        .route("/me", get(me_handler))
        .layer(Extension(state.pool))
}

#[cfg(test)]
mod tests {
    // Router wiring is exercised end to end in tests/router_test.rs.
}
