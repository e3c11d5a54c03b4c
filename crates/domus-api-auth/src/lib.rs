//! Authentication API endpoints for the domus platform.
//!
//! This crate provides the REST surface for passwordless login and the
//! two-stage token model:
//! - OTP login (POST /auth/otp/request, POST /auth/otp/verify)
//! - Tenant selection (POST /session/tenant, GET /session/tenants)
//! - Token refresh (POST /auth/refresh)
//! - Logout (POST /auth/logout)
//! - Tenant-scoped identity (GET /api/me, GET /api/members)
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::Router;
//! use domus_api_auth::{auth_router, AuthApiState};
//!
//! let app = Router::new()
//!     .nest("/auth", auth_router(state));
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

// Re-export public API
pub use error::{ApiAuthError, ErrorResponse};
pub use middleware::{jwt_auth_middleware, JwtVerifier};
pub use models::{
    LogoutRequest, MeResponse, MemberResponse, MembersResponse, OtpRequest, OtpRequestedResponse,
    OtpVerifyRequest, OtpVerifyResponse, RefreshRequest, TenantListResponse,
    TenantMembershipResponse, TenantSelectRequest, TokenResponse,
};
pub use router::{api_router, auth_router, session_router, AuthApiState};
pub use services::{
    generate_secure_token, hash_token, verify_token_hash_constant_time, LoggingOtpSender,
    MockOtpSender, OtpDeliveryError, OtpSender, OtpService, TokenConfig, TokenService,
    ACCESS_TOKEN_VALIDITY_MINUTES, OTP_MAX_ATTEMPTS, OTP_VALIDITY_MINUTES,
    REFRESH_TOKEN_VALIDITY_DAYS,
};
