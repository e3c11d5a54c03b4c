//! Authorization decision rules.
//!
//! Pure functions over request extensions. Everything they consult was
//! placed there by the upstream stages: authentication inserts `JwtClaims`,
//! tenant resolution inserts `TenantContext`. No I/O happens here, which is
//! what lets the service wrappers stay synchronous.

use http::Request;

use domus_auth::JwtClaims;
use domus_tenant::TenantContext;

use crate::error::AuthzError;

/// Decide whether a request may pass a permission gate.
///
/// Deny rules, in order:
///
/// 1. no authenticated claims → [`AuthzError::Unauthenticated`] (401)
/// 2. no resolved tenant context → denied
/// 3. token not scoped to the resolved tenant → denied (a base token and a
///    token minted for a different tenant both fail here)
/// 4. permission absent from the token's snapshot → denied
///
/// Global roles are never consulted: a platform administrator still needs a
/// tenant-scoped token to touch tenant data.
pub fn check_permission<B>(req: &Request<B>, permission: &str) -> Result<(), AuthzError> {
    let Some(claims) = req.extensions().get::<JwtClaims>() else {
        return Err(AuthzError::Unauthenticated);
    };

    let Some(context) = req.extensions().get::<TenantContext>() else {
        return Err(AuthzError::MissingTenantContext);
    };

    match claims.tenant_id() {
        Some(scope) if scope == context.tenant_id() => {}
        _ => return Err(AuthzError::TokenScopeMismatch),
    }

    if !claims.has_permission(permission) {
        return Err(AuthzError::PermissionDenied(permission.to_string()));
    }

    Ok(())
}

/// Decide whether a request may pass a global-role gate.
///
/// Global roles are registry-scoped, so no tenant context is consulted; the
/// platform administration surface sits outside tenant resolution.
pub fn check_global_role<B>(req: &Request<B>, role: &str) -> Result<(), AuthzError> {
    let Some(claims) = req.extensions().get::<JwtClaims>() else {
        return Err(AuthzError::Unauthenticated);
    };

    if !claims.has_global_role(role) {
        return Err(AuthzError::RoleDenied(role.to_string()));
    }

    Ok(())
}
