//! JWT authentication middleware.
//!
//! Extracts the bearer token from the Authorization header, validates it,
//! and inserts `JwtClaims` and `UserId` into request extensions. Tenant
//! resolution runs as a separate stage after this one; base tokens pass
//! here but carry no tenant claim for it to pick up.

use axum::{
    body::Body,
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use domus_auth::{decode_token_with_config, AuthError, JwtClaims, ValidationConfig};
use domus_core::UserId;

use crate::error::ApiAuthError;

/// Decoder configuration for bearer token validation.
///
/// Built once at startup from the PEM public key and inserted into request
/// extensions, so the middleware never re-reads key material per request.
#[derive(Clone)]
pub struct JwtVerifier {
    public_key: Vec<u8>,
    validation: ValidationConfig,
}

impl JwtVerifier {
    /// Create a verifier that checks signature, expiry, issuer, and audience.
    #[must_use]
    pub fn new(
        public_key: Vec<u8>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        let validation = ValidationConfig::default()
            .issuer(issuer)
            .audience(vec![audience.into()]);
        Self {
            public_key,
            validation,
        }
    }

    /// Decode and validate a bearer token.
    pub fn decode(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode_token_with_config(token, &self.public_key, &self.validation)
    }
}

/// JWT authentication middleware.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Decodes and validates the JWT against the configured [`JwtVerifier`]
/// 3. Inserts `JwtClaims` and `UserId` into request extensions
///
/// # Usage
///
/// ```rust,ignore
/// use axum::{middleware, routing::get, Extension, Router};
/// use domus_api_auth::middleware::{jwt_auth_middleware, JwtVerifier};
///
/// let router = Router::new()
///     .route("/api/me", get(me_handler))
///     .layer(middleware::from_fn(jwt_auth_middleware))
///     .layer(Extension(verifier));
/// ```
pub async fn jwt_auth_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiAuthError> {
    let verifier = request
        .extensions()
        .get::<JwtVerifier>()
        .cloned()
        .ok_or_else(|| {
            tracing::error!("JWT verifier not configured");
            ApiAuthError::internal("JWT verifier missing from request extensions")
        })?;

    let Some(token) = bearer_token(request.headers()) else {
        return Err(ApiAuthError::InvalidCredentials);
    };

    // SECURITY: Reject empty bearer tokens before attempting JWT decode.
    if token.is_empty() {
        tracing::warn!("Rejected empty bearer token");
        return Err(ApiAuthError::InvalidCredentials);
    }

    let claims = verifier.decode(token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        ApiAuthError::from(e)
    })?;

    let user_id = claims.sub.parse::<UserId>().map_err(|e| {
        tracing::warn!("Malformed subject claim: {}", e);
        ApiAuthError::InvalidCredentials
    })?;

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user_id);

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header, if present.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_extracted() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn wrong_scheme_yields_none() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn bare_bearer_yields_empty_token() {
        // "Bearer " with nothing after it strips to an empty token, which
        // the middleware rejects explicitly.
        let headers = headers_with_auth("Bearer ");
        assert_eq!(bearer_token(&headers), Some(""));
    }
}
