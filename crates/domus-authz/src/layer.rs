//! Tower Layers for the authorization gates.

use std::sync::Arc;

use tower::Layer;

use crate::service::{GlobalRoleService, PermissionService};

/// Tower Layer requiring one permission from the token's snapshot.
///
/// Applied per route with `route_layer`, after authentication and tenant
/// resolution have populated the request extensions.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{routing::post, Router};
/// use domus_authz::{permissions, PermissionLayer};
///
/// let app = Router::new()
///     .route("/api/units", post(create_unit))
///     .route_layer(PermissionLayer::new(permissions::UNITS_EDIT));
/// ```
#[derive(Debug, Clone)]
pub struct PermissionLayer {
    permission: Arc<str>,
}

impl PermissionLayer {
    /// Create a layer requiring `permission`.
    #[must_use]
    pub fn new(permission: impl Into<Arc<str>>) -> Self {
        Self {
            permission: permission.into(),
        }
    }

    /// The permission this layer requires.
    #[must_use]
    pub fn permission(&self) -> &str {
        &self.permission
    }
}

impl<S> Layer<S> for PermissionLayer {
    type Service = PermissionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PermissionService::new(inner, Arc::clone(&self.permission))
    }
}

/// Tower Layer requiring one global role from the token.
///
/// Guards the registry-scoped administration surface; mounted on routers
/// that sit outside tenant resolution.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{routing::post, Router};
/// use domus_authz::{roles, GlobalRoleLayer};
///
/// let admin = Router::new()
///     .route("/tenants", post(create_tenant))
///     .route_layer(GlobalRoleLayer::new(roles::PLATFORM_ADMIN));
/// ```
#[derive(Debug, Clone)]
pub struct GlobalRoleLayer {
    role: Arc<str>,
}

impl GlobalRoleLayer {
    /// Create a layer requiring `role`.
    #[must_use]
    pub fn new(role: impl Into<Arc<str>>) -> Self {
        Self { role: role.into() }
    }

    /// The global role this layer requires.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }
}

impl<S> Layer<S> for GlobalRoleLayer {
    type Service = GlobalRoleService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GlobalRoleService::new(inner, Arc::clone(&self.role))
    }
}
