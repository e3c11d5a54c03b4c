//! `OpenAPI` documentation for the domus API.
//!
//! Aggregates the annotated handlers from the API crates into one spec,
//! served as JSON at `/api-docs/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// `OpenAPI` documentation for the domus API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "domus API",
        version = "0.1.0",
        description = "Multi-tenant property-management backend: identity, tenancy, and administration"
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "OTP login, refresh, logout"),
        (name = "Session", description = "Tenant selection for an authenticated user"),
        (name = "Tenant API", description = "Tenant-scoped caller identity and membership"),
        (name = "Tenant Administration", description = "Platform administration of tenants")
    ),
    paths(
        domus_api_auth::handlers::otp::request_otp_handler,
        domus_api_auth::handlers::otp::verify_otp_handler,
        domus_api_auth::handlers::refresh::refresh_handler,
        domus_api_auth::handlers::logout::logout_handler,
        domus_api_auth::handlers::tenant_select::select_tenant_handler,
        domus_api_auth::handlers::tenant_select::list_tenants_handler,
        domus_api_auth::handlers::me::me_handler,
        domus_api_auth::handlers::me::list_members_handler,
        domus_api_tenants::handlers::create::create_tenant_handler,
        domus_api_tenants::handlers::list::list_tenants_handler,
        domus_api_tenants::handlers::lifecycle::activate_tenant_handler,
        domus_api_tenants::handlers::lifecycle::deactivate_tenant_handler,
        domus_api_tenants::handlers::members::add_member_handler,
        domus_api_tenants::handlers::upgrade::upgrade_tenants_handler,
    ),
    components(schemas(
        domus_api_auth::OtpRequest,
        domus_api_auth::OtpRequestedResponse,
        domus_api_auth::OtpVerifyRequest,
        domus_api_auth::OtpVerifyResponse,
        domus_api_auth::TenantSelectRequest,
        domus_api_auth::RefreshRequest,
        domus_api_auth::LogoutRequest,
        domus_api_auth::TokenResponse,
        domus_api_auth::TenantMembershipResponse,
        domus_api_auth::TenantListResponse,
        domus_api_auth::MeResponse,
        domus_api_auth::MemberResponse,
        domus_api_auth::MembersResponse,
        domus_api_auth::ErrorResponse,
        domus_api_tenants::CreateTenantRequest,
        domus_api_tenants::AddMemberRequest,
        domus_api_tenants::TenantResponse,
        domus_api_tenants::MemberCreatedResponse,
        domus_api_tenants::UpgradedTenantResponse,
        domus_api_tenants::FailedTenantResponse,
        domus_api_tenants::UpgradeReportResponse,
    ))
)]
pub struct ApiDoc;

/// Route serving the generated spec.
pub fn openapi_routes() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
