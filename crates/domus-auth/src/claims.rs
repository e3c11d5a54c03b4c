//! JWT claims structure with standard and custom claims.
//!
//! Provides the `JwtClaims` struct containing both RFC 7519 standard claims
//! and Domus-specific custom claims (`tid`, `role`, `perms`, `roles`).

use chrono::{Duration, Utc};
use domus_core::TenantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of the two access-token kinds a set of claims represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// User identity only; issued after passcode verification, before a
    /// tenant is selected. Carries no tenant id, role or permissions.
    Base,
    /// Scoped to exactly one tenant; carries the membership role and the
    /// permission snapshot taken at issuance.
    Tenant,
}

/// JWT claims containing standard and custom claims.
///
/// # Standard Claims (RFC 7519)
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer
/// - `aud`: Audience
/// - `exp`: Expiration time (Unix timestamp)
/// - `iat`: Issued at (Unix timestamp)
/// - `jti`: JWT ID (unique identifier)
///
/// # Custom Claims (Domus-specific)
///
/// - `tid`: Tenant ID (present only on tenant access tokens)
/// - `role`: Membership role name for the tenant in `tid`
/// - `perms`: Flattened permission system-names, snapshotted at issuance
/// - `roles`: Global roles (cross-tenant administrative catalog)
///
/// # Example
///
/// ```rust
/// use domus_auth::{JwtClaims, TokenKind};
/// use domus_core::TenantId;
///
/// let claims = JwtClaims::builder()
///     .subject("user-123")
///     .issuer("domus")
///     .tenant_id(TenantId::new())
///     .role("Manager")
///     .permissions(vec!["Units.View", "Units.Edit"])
///     .expires_in_secs(900)
///     .build();
///
/// assert_eq!(claims.kind(), TokenKind::Tenant);
/// assert!(claims.has_permission("Units.Edit"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JwtClaims {
    /// Subject - the user ID.
    pub sub: String,

    /// Issuer - who created the token.
    pub iss: String,

    /// Audience - intended recipients.
    #[serde(default)]
    pub aud: Vec<String>,

    /// Expiration time as Unix timestamp.
    pub exp: i64,

    /// Issued at as Unix timestamp.
    pub iat: i64,

    /// JWT ID - unique identifier for this token.
    pub jti: String,

    /// Tenant ID this token is scoped to. Absent on base tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<Uuid>,

    /// Membership role name for the tenant in `tid`. Absent on base tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Flattened permission system-names, snapshotted at issuance time.
    #[serde(default)]
    pub perms: Vec<String>,

    /// Global roles. Independent of the per-tenant role catalog; these gate
    /// only cross-tenant administrative operations.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl JwtClaims {
    /// Create a new builder for constructing JWT claims.
    #[must_use]
    pub fn builder() -> JwtClaimsBuilder {
        JwtClaimsBuilder::default()
    }

    /// Which token kind these claims represent.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        if self.tid.is_some() {
            TokenKind::Tenant
        } else {
            TokenKind::Base
        }
    }

    /// Check if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Get the tenant ID if present.
    #[must_use]
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tid.map(TenantId::from_uuid)
    }

    /// Check if the permission snapshot contains a specific system-name.
    ///
    /// Always false for base tokens (their snapshot is empty). There is no
    /// wildcard or hierarchy; the administrator role simply holds every
    /// permission in its snapshot.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.perms.iter().any(|p| p == permission)
    }

    /// Check if the claims carry a specific global role.
    ///
    /// Global roles never imply tenant permissions and vice versa.
    #[must_use]
    pub fn has_global_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Builder for constructing JWT claims.
#[derive(Debug, Default)]
pub struct JwtClaimsBuilder {
    sub: Option<String>,
    iss: Option<String>,
    aud: Vec<String>,
    exp: Option<i64>,
    iat: Option<i64>,
    jti: Option<String>,
    tid: Option<Uuid>,
    role: Option<String>,
    perms: Vec<String>,
    roles: Vec<String>,
}

impl JwtClaimsBuilder {
    /// Set the subject (user ID).
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Set the issuer.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set the audience.
    #[must_use]
    pub fn audience(mut self, aud: Vec<impl Into<String>>) -> Self {
        self.aud = aud.into_iter().map(Into::into).collect();
        self
    }

    /// Set expiration time as Unix timestamp.
    #[must_use]
    pub fn expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set expiration time as seconds from now.
    #[must_use]
    pub fn expires_in_secs(mut self, secs: i64) -> Self {
        self.exp = Some(Utc::now().timestamp() + secs);
        self
    }

    /// Set expiration time using a Duration.
    #[must_use]
    pub fn expires_in(mut self, duration: Duration) -> Self {
        self.exp = Some((Utc::now() + duration).timestamp());
        self
    }

    /// Set the issued at time.
    #[must_use]
    pub fn issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set the JWT ID.
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Set the tenant ID, making this a tenant access token.
    #[must_use]
    pub fn tenant_id(mut self, tid: TenantId) -> Self {
        self.tid = Some(*tid.as_uuid());
        self
    }

    /// Set the membership role name.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the permission snapshot.
    #[must_use]
    pub fn permissions(mut self, perms: Vec<impl Into<String>>) -> Self {
        self.perms = perms.into_iter().map(Into::into).collect();
        self
    }

    /// Set the global roles.
    #[must_use]
    pub fn global_roles(mut self, roles: Vec<impl Into<String>>) -> Self {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Build the JWT claims.
    ///
    /// # Defaults
    ///
    /// - `sub`: Empty string if not set
    /// - `iss`: "domus" if not set
    /// - `aud`: Empty vec if not set
    /// - `exp`: 1 hour from now if not set
    /// - `iat`: Current time if not set
    /// - `jti`: New UUID v4 if not set
    #[must_use]
    pub fn build(self) -> JwtClaims {
        let now = Utc::now().timestamp();

        JwtClaims {
            sub: self.sub.unwrap_or_default(),
            iss: self.iss.unwrap_or_else(|| "domus".to_string()),
            aud: self.aud,
            exp: self.exp.unwrap_or(now + 3600),
            iat: self.iat.unwrap_or(now),
            jti: self.jti.unwrap_or_else(|| Uuid::new_v4().to_string()),
            tid: self.tid,
            role: self.role,
            perms: self.perms,
            roles: self.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_builder_basic() {
        let claims = JwtClaims::builder()
            .subject("user-123")
            .issuer("test-issuer")
            .build();

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.iss, "test-issuer");
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_base_token_kind() {
        let claims = JwtClaims::builder().subject("user-123").build();

        assert_eq!(claims.kind(), TokenKind::Base);
        assert_eq!(claims.tenant_id(), None);
        assert!(claims.role.is_none());
        assert!(claims.perms.is_empty());
    }

    #[test]
    fn test_tenant_token_kind() {
        let tenant_id = TenantId::new();
        let claims = JwtClaims::builder()
            .subject("user-123")
            .tenant_id(tenant_id)
            .role("Viewer")
            .permissions(vec!["Units.View"])
            .build();

        assert_eq!(claims.kind(), TokenKind::Tenant);
        assert_eq!(claims.tenant_id(), Some(tenant_id));
        assert_eq!(claims.role.as_deref(), Some("Viewer"));
    }

    #[test]
    fn test_has_permission() {
        let claims = JwtClaims::builder()
            .subject("user-123")
            .tenant_id(TenantId::new())
            .permissions(vec!["Units.View", "Units.Edit"])
            .build();

        assert!(claims.has_permission("Units.View"));
        assert!(claims.has_permission("Units.Edit"));
        assert!(!claims.has_permission("Owners.Edit"));
    }

    #[test]
    fn test_base_token_has_no_permissions() {
        let claims = JwtClaims::builder().subject("user-123").build();

        assert!(!claims.has_permission("Units.View"));
    }

    #[test]
    fn test_global_roles_independent_of_permissions() {
        let claims = JwtClaims::builder()
            .subject("user-123")
            .global_roles(vec!["platform_admin"])
            .build();

        assert!(claims.has_global_role("platform_admin"));
        assert!(!claims.has_global_role("auditor"));
        // A global role never grants tenant permissions.
        assert!(!claims.has_permission("Units.View"));
    }

    #[test]
    fn test_claims_expiration() {
        let claims = JwtClaims::builder()
            .subject("user-123")
            .expires_in_secs(900)
            .build();

        assert!(!claims.is_expired());

        let claims = JwtClaims::builder()
            .subject("user-123")
            .expiration(Utc::now().timestamp() - 3600)
            .build();

        assert!(claims.is_expired());
    }

    #[test]
    fn test_claims_serialization() {
        let claims = JwtClaims::builder()
            .subject("user-123")
            .issuer("domus")
            .audience(vec!["domus-api"])
            .tenant_id(TenantId::new())
            .role("Manager")
            .permissions(vec!["Units.Edit"])
            .build();

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: JwtClaims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims.sub, deserialized.sub);
        assert_eq!(claims.tid, deserialized.tid);
        assert_eq!(claims.role, deserialized.role);
        assert_eq!(claims.perms, deserialized.perms);
    }

    #[test]
    fn test_base_token_serialization_omits_tenant_fields() {
        let claims = JwtClaims::builder().subject("user-123").build();

        let json = serde_json::to_string(&claims).unwrap();

        // tid and role must not appear in JSON when None
        assert!(!json.contains("tid"));
        assert!(!json.contains("\"role\""));
    }

    #[test]
    fn test_deserialization_defaults_missing_vectors() {
        // A minimal token body without perms/roles/aud must still parse.
        let json = r#"{
            "sub": "user-123",
            "iss": "domus",
            "exp": 4102444800,
            "iat": 1700000000,
            "jti": "abc"
        }"#;

        let claims: JwtClaims = serde_json::from_str(json).unwrap();
        assert!(claims.aud.is_empty());
        assert!(claims.perms.is_empty());
        assert!(claims.roles.is_empty());
        assert_eq!(claims.kind(), TokenKind::Base);
    }
}
