//! Tower services enforcing authorization gates.
//!
//! Both services decide synchronously from request extensions, so their
//! futures are plain enums rather than boxed: either the inner service's
//! future, or an immediate denial response.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use http::Method;
use pin_project_lite::pin_project;
use tower::Service;

use crate::check::{check_global_role, check_permission};
use crate::error::AuthzError;

/// Tower service that requires one permission from the token's snapshot.
///
/// Expects `JwtClaims` and `TenantContext` in the request extensions, placed
/// there by the authentication and tenant-resolution stages. OPTIONS requests
/// bypass the gate so CORS preflight keeps working.
#[derive(Debug, Clone)]
pub struct PermissionService<S> {
    inner: S,
    permission: Arc<str>,
}

impl<S> PermissionService<S> {
    /// Create a new `PermissionService` wrapping `inner`.
    pub fn new(inner: S, permission: Arc<str>) -> Self {
        Self { inner, permission }
    }
}

impl<S> Service<Request> for PermissionService<S>
where
    S: Service<Request, Response = Response> + Clone,
{
    type Response = Response;
    type Error = S::Error;
    type Future = AuthzFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // CORS preflight carries no credentials.
        if req.method() == Method::OPTIONS {
            let inner = self.inner.clone();
            let mut inner = std::mem::replace(&mut self.inner, inner);
            return AuthzFuture::Inner {
                future: inner.call(req),
            };
        }

        match check_permission(&req, &self.permission) {
            Ok(()) => {
                let inner = self.inner.clone();
                let mut inner = std::mem::replace(&mut self.inner, inner);
                AuthzFuture::Inner {
                    future: inner.call(req),
                }
            }
            Err(err) => {
                tracing::warn!(
                    permission = %self.permission,
                    path = %req.uri().path(),
                    error = %err,
                    "Permission gate denied request"
                );
                AuthzFuture::Deny { error: Some(err) }
            }
        }
    }
}

/// Tower service that requires one global role from the token.
///
/// Expects `JwtClaims` in the request extensions. No tenant context is
/// consulted; global roles guard the registry-scoped administration surface.
#[derive(Debug, Clone)]
pub struct GlobalRoleService<S> {
    inner: S,
    role: Arc<str>,
}

impl<S> GlobalRoleService<S> {
    /// Create a new `GlobalRoleService` wrapping `inner`.
    pub fn new(inner: S, role: Arc<str>) -> Self {
        Self { inner, role }
    }
}

impl<S> Service<Request> for GlobalRoleService<S>
where
    S: Service<Request, Response = Response> + Clone,
{
    type Response = Response;
    type Error = S::Error;
    type Future = AuthzFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        if req.method() == Method::OPTIONS {
            let inner = self.inner.clone();
            let mut inner = std::mem::replace(&mut self.inner, inner);
            return AuthzFuture::Inner {
                future: inner.call(req),
            };
        }

        match check_global_role(&req, &self.role) {
            Ok(()) => {
                let inner = self.inner.clone();
                let mut inner = std::mem::replace(&mut self.inner, inner);
                AuthzFuture::Inner {
                    future: inner.call(req),
                }
            }
            Err(err) => {
                tracing::warn!(
                    role = %self.role,
                    path = %req.uri().path(),
                    error = %err,
                    "Global role gate denied request"
                );
                AuthzFuture::Deny { error: Some(err) }
            }
        }
    }
}

pin_project! {
    /// Future for the authorization services.
    #[project = AuthzFutureProj]
    pub enum AuthzFuture<F> {
        /// Inner service future (the gate passed).
        Inner {
            #[pin]
            future: F,
        },
        /// Denial response (the gate rejected the request).
        Deny {
            error: Option<AuthzError>,
        },
    }
}

impl<F, E> Future for AuthzFuture<F>
where
    F: Future<Output = Result<Response, E>>,
{
    type Output = Result<Response, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            AuthzFutureProj::Inner { future } => future.poll(cx),
            AuthzFutureProj::Deny { error } => {
                let err = error.take().unwrap_or(AuthzError::Unauthenticated);
                Poll::Ready(Ok(err.into_response()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use domus_auth::JwtClaims;
    use domus_core::TenantId;
    use domus_tenant::TenantContext;
    use std::convert::Infallible;
    use tower::ServiceExt;

    // Mock service that always returns 200 OK
    #[derive(Clone)]
    struct MockService;

    impl Service<Request> for MockService {
        type Response = Response;
        type Error = Infallible;
        type Future = std::future::Ready<Result<Response, Infallible>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request) -> Self::Future {
            std::future::ready(Ok(Response::new(Body::from("allowed"))))
        }
    }

    fn permission_gate(permission: &str) -> PermissionService<MockService> {
        PermissionService::new(MockService, Arc::from(permission))
    }

    fn role_gate(role: &str) -> GlobalRoleService<MockService> {
        GlobalRoleService::new(MockService, Arc::from(role))
    }

    fn tenant_request(tenant_id: TenantId, perms: Vec<&str>) -> Request {
        let claims = JwtClaims::builder()
            .subject("f0b9a2d8-4e11-47c3-8b6d-9e0a1c2d3e4f")
            .tenant_id(tenant_id)
            .role("Viewer")
            .permissions(perms)
            .build();

        let mut req = Request::builder()
            .method(Method::POST)
            .uri("/api/units")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut().insert(claims);
        req.extensions_mut().insert(TenantContext::new(tenant_id));
        req
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_matching_permission_passes() {
        let service = permission_gate("Units.Edit");
        let req = tenant_request(TenantId::new(), vec!["Units.View", "Units.Edit"]);

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(body_string(response).await, "allowed");
    }

    #[tokio::test]
    async fn test_viewer_cannot_reach_edit_route() {
        let service = permission_gate("Units.Edit");
        let req = tenant_request(TenantId::new(), vec!["Units.View"]);

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), 403);

        let body = body_string(response).await;
        assert!(body.contains("\"error\":\"forbidden\""));
        // The denied permission name must not leak.
        assert!(!body.contains("Units.Edit"));
    }

    #[tokio::test]
    async fn test_unauthenticated_request_gets_401() {
        let service = permission_gate("Units.View");
        let req = Request::builder()
            .uri("/api/units")
            .body(Body::empty())
            .unwrap();

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), 401);
        assert!(body_string(response)
            .await
            .contains("\"error\":\"invalid_credentials\""));
    }

    #[tokio::test]
    async fn test_missing_tenant_context_gets_403() {
        let service = permission_gate("Units.View");
        let mut req = tenant_request(TenantId::new(), vec!["Units.View"]);
        req.extensions_mut().remove::<TenantContext>();

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), 403);
    }

    #[tokio::test]
    async fn test_token_for_wrong_tenant_gets_403() {
        let service = permission_gate("Units.View");
        let mut req = tenant_request(TenantId::new(), vec!["Units.View"]);
        // Resolve a different tenant than the one the token was minted for.
        req.extensions_mut()
            .insert(TenantContext::new(TenantId::new()));

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), 403);
    }

    #[tokio::test]
    async fn test_denial_bodies_are_indistinguishable() {
        // Scope mismatch and missing permission must produce identical
        // bodies, so a caller cannot probe which check rejected them.
        let mismatch_req = {
            let mut req = tenant_request(TenantId::new(), vec!["Units.View"]);
            req.extensions_mut()
                .insert(TenantContext::new(TenantId::new()));
            req
        };
        let denied_req = tenant_request(TenantId::new(), vec![]);

        let mismatch = permission_gate("Units.View")
            .oneshot(mismatch_req)
            .await
            .unwrap();
        let denied = permission_gate("Units.View")
            .oneshot(denied_req)
            .await
            .unwrap();

        assert_eq!(mismatch.status(), denied.status());
        assert_eq!(
            body_string(mismatch).await,
            body_string(denied).await
        );
    }

    #[tokio::test]
    async fn test_options_request_bypasses_permission_gate() {
        let service = permission_gate("Units.Edit");
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/units")
            .body(Body::empty())
            .unwrap();

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_global_role_gate_passes_admin() {
        let service = role_gate("platform_admin");
        let claims = JwtClaims::builder()
            .subject("admin")
            .global_roles(vec!["platform_admin"])
            .build();
        let mut req = Request::builder()
            .uri("/tenants")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut().insert(claims);

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_global_role_gate_denies_regular_user() {
        let service = role_gate("platform_admin");
        let claims = JwtClaims::builder().subject("user").build();
        let mut req = Request::builder()
            .uri("/tenants")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut().insert(claims);

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), 403);
        assert!(body_string(response)
            .await
            .contains("\"error\":\"forbidden\""));
    }

    #[tokio::test]
    async fn test_global_role_gate_requires_authentication() {
        let service = role_gate("platform_admin");
        let req = Request::builder()
            .uri("/tenants")
            .body(Body::empty())
            .unwrap();

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), 401);
    }
}
