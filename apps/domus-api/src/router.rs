//! Router composition: pipeline stages wrapped around the API crates.
//!
//! The three stages are layered outside-in per router group:
//!
//! - `/auth/*` — public, no stage applies (OTP and refresh authenticate by
//!   their own payloads).
//! - `/session/*` — Token Authentication only; a base token suffices to
//!   enumerate memberships and select a tenant.
//! - `/api/*` — Token Authentication, then Tenant Resolution; permission
//!   gates are declared per route inside the router.
//! - `/tenants/*` — Token Authentication; the global-role gate inside the
//!   admin router requires `platform_admin`. No tenant resolution, since
//!   these routes operate on the registry across tenants.

use std::sync::Arc;

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Extension, Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domus_api_auth::{api_router, auth_router, jwt_auth_middleware, session_router};
use domus_api_tenants::tenants_admin_router;
use domus_tenant::TenantResolutionLayer;

use crate::openapi::openapi_routes;
use crate::state::AppState;

/// Build the complete application router.
pub fn build_app(state: &AppState, cors_origins: &[String]) -> Router {
    let gate = Arc::clone(&state.tenant_gate);

    Router::new()
        .route("/health", get(health_handler))
        .merge(openapi_routes())
        .nest("/auth", auth_router(state.auth.clone()))
        .nest(
            "/session",
            session_router(state.auth.clone())
                .layer(middleware::from_fn(jwt_auth_middleware))
                .layer(Extension(state.verifier.clone())),
        )
        .nest(
            "/api",
            api_router(state.auth.clone())
                .layer(TenantResolutionLayer::new(gate))
                .layer(middleware::from_fn(jwt_auth_middleware))
                .layer(Extension(state.verifier.clone())),
        )
        .nest(
            "/tenants",
            tenants_admin_router(state.admin.clone())
                .layer(middleware::from_fn(jwt_auth_middleware))
                .layer(Extension(state.verifier.clone())),
        )
        .layer(build_cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Liveness probe; reports nothing about dependencies.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Build the CORS layer from configured origins.
///
/// Wildcard mode allows anything but cannot carry credentials (a browser
/// requirement); explicit origins get credentials plus the header set the
/// clients actually send, `X-Tenant-ID` included.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let is_wildcard = origins.len() == 1 && origins[0] == "*";

    if is_wildcard {
        return CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static("x-tenant-id"),
        ])
        .allow_credentials(true)
}
