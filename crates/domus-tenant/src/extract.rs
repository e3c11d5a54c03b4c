//! Tenant identifier extraction from HTTP requests.
//!
//! The `X-Tenant-ID` header is the authoritative source. A bearer token's
//! `tid` claim (placed in extensions by the authentication stage) is used as
//! a fallback when the header is absent, and must agree with the header when
//! both are present.

use http::Request;

use domus_auth::JwtClaims;
use domus_core::TenantId;

use crate::config::TenantConfig;
use crate::error::TenantError;

/// The per-request tenant context.
///
/// Inserted into request extensions exactly once by the resolution stage,
/// only after the tenant passed the liveness check. Holds exactly one
/// tenant id; a request without a resolved tenant has no `TenantContext`
/// extension at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
}

impl TenantContext {
    /// Create a new tenant context.
    #[must_use]
    pub fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    /// Get the tenant ID.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

impl From<TenantId> for TenantContext {
    fn from(tenant_id: TenantId) -> Self {
        Self::new(tenant_id)
    }
}

impl From<TenantContext> for TenantId {
    fn from(ctx: TenantContext) -> Self {
        ctx.tenant_id
    }
}

/// Determine which tenant a request is asking for, before any liveness check.
///
/// Returns `Ok(None)` when neither the header nor the token names a tenant.
///
/// # Errors
///
/// Returns `TenantError::InvalidFormat` for a malformed header value and
/// `TenantError::Mismatch` when the header and the token's `tid` claim name
/// different tenants.
pub fn requested_tenant<B>(
    req: &Request<B>,
    config: &TenantConfig,
) -> Result<Option<TenantId>, TenantError> {
    let header = tenant_from_header(req, &config.header_name)?;
    let claim = req
        .extensions()
        .get::<JwtClaims>()
        .and_then(|claims| claims.tenant_id());

    match (header, claim) {
        (Some(from_header), Some(from_claim)) if from_header != from_claim => {
            Err(TenantError::Mismatch)
        }
        (Some(from_header), _) => Ok(Some(from_header)),
        (None, fallback) => Ok(fallback),
    }
}

/// Extract and parse the tenant identifier header.
///
/// An absent or empty header is `Ok(None)`; a present but malformed value
/// is an error.
pub fn tenant_from_header<B>(
    req: &Request<B>,
    header_name: &str,
) -> Result<Option<TenantId>, TenantError> {
    let Some(header_value) = req.headers().get(header_name) else {
        return Ok(None);
    };

    let value_str = header_value
        .to_str()
        .map_err(|_| TenantError::InvalidFormat("Header value is not valid UTF-8".to_string()))?;

    let trimmed = value_str.trim();

    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<TenantId>()
        .map(Some)
        .map_err(|_| TenantError::InvalidFormat(format!("'{trimmed}' is not a valid UUID")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;
    use uuid::Uuid;

    const UUID_A: &str = "550e8400-e29b-41d4-a716-446655440000";
    const UUID_B: &str = "660e8400-e29b-41d4-a716-446655440111";

    fn request_with_header(value: &str) -> Request<()> {
        Request::builder()
            .header("X-Tenant-ID", value)
            .body(())
            .unwrap()
    }

    fn claims_for_tenant(tenant: &str) -> JwtClaims {
        JwtClaims::builder()
            .subject(Uuid::new_v4().to_string())
            .tenant_id(TenantId::from_uuid(tenant.parse().unwrap()))
            .build()
    }

    #[test]
    fn test_header_valid_uuid() {
        let req = request_with_header(UUID_A);
        let result = tenant_from_header(&req, "X-Tenant-ID").unwrap();
        assert_eq!(result.unwrap().to_string(), UUID_A);
    }

    #[test]
    fn test_header_with_whitespace() {
        let req = request_with_header(&format!("  {UUID_A}  "));
        let result = tenant_from_header(&req, "X-Tenant-ID").unwrap();
        assert_eq!(result.unwrap().to_string(), UUID_A);
    }

    #[test]
    fn test_header_absent_is_none() {
        let req = Request::builder().body(()).unwrap();
        assert!(tenant_from_header(&req, "X-Tenant-ID").unwrap().is_none());
    }

    #[test]
    fn test_header_empty_is_none() {
        let req = request_with_header("   ");
        assert!(tenant_from_header(&req, "X-Tenant-ID").unwrap().is_none());
    }

    #[test]
    fn test_header_invalid_uuid() {
        let req = request_with_header("not-a-uuid");
        let result = tenant_from_header(&req, "X-Tenant-ID");
        assert!(matches!(result, Err(TenantError::InvalidFormat(_))));
    }

    #[test]
    fn test_requested_tenant_header_only() {
        let req = request_with_header(UUID_A);
        let config = TenantConfig::default();

        let result = requested_tenant(&req, &config).unwrap();
        assert_eq!(result.unwrap().to_string(), UUID_A);
    }

    #[test]
    fn test_requested_tenant_claim_fallback() {
        let mut req = Request::builder().body(()).unwrap();
        req.extensions_mut().insert(claims_for_tenant(UUID_A));
        let config = TenantConfig::default();

        let result = requested_tenant(&req, &config).unwrap();
        assert_eq!(result.unwrap().to_string(), UUID_A);
    }

    #[test]
    fn test_requested_tenant_header_wins_when_equal() {
        let mut req = request_with_header(UUID_A);
        req.extensions_mut().insert(claims_for_tenant(UUID_A));
        let config = TenantConfig::default();

        let result = requested_tenant(&req, &config).unwrap();
        assert_eq!(result.unwrap().to_string(), UUID_A);
    }

    #[test]
    fn test_requested_tenant_mismatch_rejected() {
        let mut req = request_with_header(UUID_A);
        req.extensions_mut().insert(claims_for_tenant(UUID_B));
        let config = TenantConfig::default();

        let result = requested_tenant(&req, &config);
        assert!(matches!(result, Err(TenantError::Mismatch)));
    }

    #[test]
    fn test_requested_tenant_neither_is_none() {
        let req = Request::builder().body(()).unwrap();
        let config = TenantConfig::default();

        assert!(requested_tenant(&req, &config).unwrap().is_none());
    }

    #[test]
    fn test_tenant_context_conversions() {
        let tenant_id = TenantId::new();
        let ctx = TenantContext::new(tenant_id);

        assert_eq!(ctx.tenant_id(), tenant_id);

        let ctx_from: TenantContext = tenant_id.into();
        assert_eq!(ctx_from.tenant_id(), tenant_id);

        let id_from: TenantId = ctx.into();
        assert_eq!(id_from, tenant_id);
    }
}
