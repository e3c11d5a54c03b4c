//! Tower Service for the tenant resolution stage.
//!
//! The service decides per request:
//! 1. Which tenant is requested (authoritative header, token claim fallback,
//!    both must agree when both are present).
//! 2. Whether that tenant is live right now (registry gate, re-checked on
//!    every request).
//! 3. Only then inserts the `TenantContext` extension and calls the inner
//!    service. Failed requests never reach the inner service and never get
//!    a context.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use http::Method;
use tower::Service;

use crate::config::TenantConfig;
use crate::error::TenantError;
use crate::extract::{requested_tenant, TenantContext};
use crate::gate::TenantGate;

/// Tower Service that resolves and validates the request tenant.
#[derive(Clone)]
pub struct TenantResolutionService<S> {
    inner: S,
    config: Arc<TenantConfig>,
    gate: Arc<dyn TenantGate>,
}

impl<S> TenantResolutionService<S> {
    /// Create a new resolution service around an inner service.
    pub fn new(inner: S, config: Arc<TenantConfig>, gate: Arc<dyn TenantGate>) -> Self {
        Self {
            inner,
            config,
            gate,
        }
    }
}

impl<S> Service<Request> for TenantResolutionService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let config = Arc::clone(&self.config);
        let gate = Arc::clone(&self.gate);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // CORS preflight carries no tenant header.
            if req.method() == Method::OPTIONS {
                return inner.call(req).await;
            }

            let requested = match requested_tenant(&req, &config) {
                Ok(requested) => requested,
                Err(err) => {
                    tracing::warn!(error = %err, "tenant resolution rejected request");
                    return Ok(err.into_response());
                }
            };

            let Some(tenant_id) = requested else {
                if config.require_tenant {
                    tracing::warn!("request carries no tenant identifier");
                    return Ok(TenantError::Missing.into_response());
                }
                // Tenant-agnostic request; proceed with an empty context.
                return inner.call(req).await;
            };

            match gate.is_live(tenant_id).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(tenant_id = %tenant_id, "unknown or inactive tenant");
                    return Ok(TenantError::NotResolvable.into_response());
                }
                Err(err) => {
                    tracing::error!(tenant_id = %tenant_id, error = %err, "tenant liveness lookup failed");
                    return Ok(err.into_response());
                }
            }

            req.extensions_mut().insert(tenant_id);
            req.extensions_mut().insert(TenantContext::new(tenant_id));

            tracing::debug!(tenant_id = %tenant_id, "tenant context resolved");

            inner.call(req).await
        })
    }
}
