//! Router tests for the authentication middleware pipeline.
//!
//! These tests exercise everything that resolves before a database query:
//! bearer extraction, token verification, tenant resolution, permission
//! gates, and request validation. Pools are created with `connect_lazy`,
//! so no `PostgreSQL` instance is needed.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::{middleware, Extension, Router};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use domus_api_auth::{
    api_router, auth_router, jwt_auth_middleware, session_router, AuthApiState, MockOtpSender,
    OtpService, TokenService,
};
use domus_core::TenantId;
use domus_db::TenantPools;
use domus_tenant::{StaticTenantGate, TenantGate, TenantResolutionLayer};

/// Build the full router stack the way the server composes it, backed by
/// lazy pools that never connect.
fn test_app(live: Vec<TenantId>) -> Router {
    let url = common::test_database_url();
    let registry = PgPool::connect_lazy(&url).expect("Failed to build lazy pool");
    let tenant_pools = TenantPools::new(registry.clone(), url);

    let token_service = TokenService::new(
        common::token_config(),
        registry.clone(),
        tenant_pools,
    );
    let otp_service = OtpService::new(registry.clone(), Arc::new(MockOtpSender::new()));
    let state = AuthApiState::new(registry, token_service, otp_service);

    let gate: Arc<dyn TenantGate> = Arc::new(StaticTenantGate::new(live));

    Router::new()
        .nest("/auth", auth_router(state.clone()))
        .nest(
            "/session",
            session_router(state.clone())
                .layer(middleware::from_fn(jwt_auth_middleware))
                .layer(Extension(common::verifier())),
        )
        .nest(
            "/api",
            api_router(state)
                .layer(TenantResolutionLayer::new(gate))
                .layer(middleware::from_fn(jwt_auth_middleware))
                .layer(Extension(common::verifier())),
        )
}

fn test_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 40000))
}

/// A GET request with an optional bearer token and tenant header.
fn get_request(uri: &str, bearer: Option<&str>, tenant: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(tenant_id) = tenant {
        builder = builder.header("X-Tenant-ID", tenant_id.to_string());
    }

    let mut request = builder.body(Body::empty()).expect("request");
    request.extensions_mut().insert(ConnectInfo(test_addr()));
    request
}

/// A POST request carrying a JSON body and an optional bearer token.
fn post_json(uri: &str, bearer: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let mut request = builder
        .body(Body::from(body.to_string()))
        .expect("request");
    request.extensions_mut().insert(ConnectInfo(test_addr()));
    request
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body should be JSON")
}

#[tokio::test]
async fn missing_bearer_is_unauthorized() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(get_request("/session/tenants", None, None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn garbage_bearer_is_unauthorized() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(get_request("/session/tenants", Some("not-a-jwt"), None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let app = test_app(vec![]);

    // Expired an hour ago, past the 60s validation leeway.
    let claims = domus_auth::JwtClaims::builder()
        .subject(Uuid::new_v4().to_string())
        .issuer(common::TEST_ISSUER)
        .audience(vec![common::TEST_AUDIENCE])
        .expiration(chrono::Utc::now().timestamp() - 3600)
        .build();
    let token =
        domus_auth::encode_token(&claims, common::TEST_PRIVATE_KEY).expect("encode");

    let response = app
        .oneshot(get_request("/session/tenants", Some(&token), None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn wrong_issuer_is_unauthorized() {
    let app = test_app(vec![]);

    let claims = domus_auth::JwtClaims::builder()
        .subject(Uuid::new_v4().to_string())
        .issuer("someone-else")
        .audience(vec![common::TEST_AUDIENCE])
        .expires_in_secs(900)
        .build();
    let token =
        domus_auth::encode_token(&claims, common::TEST_PRIVATE_KEY).expect("encode");

    let response = app
        .oneshot(get_request("/session/tenants", Some(&token), None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn api_requires_tenant() {
    let app = test_app(vec![]);
    let token = common::mint_base_token(Uuid::new_v4());

    // Base token carries no tenant claim and no header is sent.
    let response = app
        .oneshot(get_request("/api/me", Some(&token), None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_tenant");
}

#[tokio::test]
async fn api_me_returns_token_snapshot() {
    let tenant_id = TenantId::new();
    let user_id = Uuid::new_v4();
    let app = test_app(vec![tenant_id]);

    let token = common::mint_tenant_token(
        user_id,
        tenant_id,
        "Manager",
        vec!["Units.View", "Units.Edit"],
    );

    let response = app
        .oneshot(get_request(
            "/api/me",
            Some(&token),
            Some(*tenant_id.as_uuid()),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user_id"], user_id.to_string());
    assert_eq!(body["tenant_id"], tenant_id.to_string());
    assert_eq!(body["role"], "Manager");
    assert_eq!(body["permissions"], json!(["Units.View", "Units.Edit"]));
    assert_eq!(body["global_roles"], json!([]));
}

#[tokio::test]
async fn api_resolves_tenant_from_claims_without_header() {
    let tenant_id = TenantId::new();
    let app = test_app(vec![tenant_id]);

    let token =
        common::mint_tenant_token(Uuid::new_v4(), tenant_id, "Viewer", vec!["Units.View"]);

    let response = app
        .oneshot(get_request("/api/me", Some(&token), None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tenant_id"], tenant_id.to_string());
}

#[tokio::test]
async fn api_rejects_header_claim_mismatch() {
    let tenant_id = TenantId::new();
    let other = TenantId::new();
    let app = test_app(vec![tenant_id, other]);

    let token =
        common::mint_tenant_token(Uuid::new_v4(), tenant_id, "Viewer", vec!["Units.View"]);

    let response = app
        .oneshot(get_request(
            "/api/me",
            Some(&token),
            Some(*other.as_uuid()),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_tenant");
}

#[tokio::test]
async fn api_rejects_unknown_tenant() {
    // The gate knows no tenants, so any requested tenant is not live.
    let app = test_app(vec![]);
    let tenant_id = TenantId::new();

    let token =
        common::mint_tenant_token(Uuid::new_v4(), tenant_id, "Viewer", vec!["Units.View"]);

    let response = app
        .oneshot(get_request("/api/me", Some(&token), None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_tenant");
}

#[tokio::test]
async fn members_requires_permission() {
    let tenant_id = TenantId::new();
    let app = test_app(vec![tenant_id]);

    // Viewer snapshot without Members.View.
    let token =
        common::mint_tenant_token(Uuid::new_v4(), tenant_id, "Viewer", vec!["Units.View"]);

    let response = app
        .oneshot(get_request("/api/members", Some(&token), None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "forbidden");
    assert_eq!(
        body["message"],
        "You do not have permission to perform this action"
    );
}

#[tokio::test]
async fn options_requests_bypass_tenant_resolution() {
    let app = test_app(vec![]);
    let token = common::mint_base_token(Uuid::new_v4());

    // Tenant resolution lets preflight through; the router then reports
    // the method as unsupported rather than rejecting the tenant.
    let mut request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request");
    request.extensions_mut().insert(ConnectInfo(test_addr()));

    let response = app.oneshot(request).await.expect("request should complete");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn otp_request_validates_mobile() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(post_json(
            "/auth/otp/request",
            None,
            json!({ "mobile": "12345" }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn otp_verify_validates_code_length() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(post_json(
            "/auth/otp/verify",
            None,
            json!({ "mobile": "+919876543210", "code": "12345" }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn refresh_validates_empty_token() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(post_json(
            "/auth/refresh",
            None,
            json!({ "refresh_token": "" }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn logout_validates_empty_token() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(post_json(
            "/auth/logout",
            None,
            json!({ "refresh_token": "" }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}
