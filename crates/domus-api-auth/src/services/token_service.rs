//! Token service for the two-stage access token model.
//!
//! Issues base tokens (identity only), tenant tokens (identity plus a
//! tenant role and permission snapshot), and opaque refresh tokens with
//! one-shot rotation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use std::net::IpAddr;
use subtle::ConstantTimeEq;

use domus_auth::{encode_token, JwtClaims};
use domus_core::{TenantId, UserId};
use domus_db::{
    Membership, NewRefreshToken, RefreshToken, Tenant, TenantPools, TenantRole, User, UserRole,
};

use crate::error::ApiAuthError;

/// Default refresh token validity in days.
pub const REFRESH_TOKEN_VALIDITY_DAYS: i64 = 7;

/// Default access token validity in minutes.
///
/// Applies to both base and tenant tokens. A short lifetime bounds how
/// stale a tenant token's permission snapshot can get.
pub const ACCESS_TOKEN_VALIDITY_MINUTES: i64 = 15;

/// Size of opaque refresh tokens in bytes (256 bits of entropy).
pub const SECURE_TOKEN_BYTES: usize = 32;

/// Configuration for JWT token generation.
#[derive(Clone)]
pub struct TokenConfig {
    /// PEM-encoded RSA private key for signing JWTs.
    pub private_key: Vec<u8>,
    /// Token issuer (iss claim).
    pub issuer: String,
    /// Token audience (aud claim).
    pub audience: String,
}

/// Service for issuing JWT access tokens and rotating refresh tokens.
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    registry: PgPool,
    tenant_pools: TenantPools,
    access_token_validity: Duration,
    refresh_token_validity: Duration,
}

impl TokenService {
    /// Create a new token service.
    #[must_use]
    pub fn new(config: TokenConfig, registry: PgPool, tenant_pools: TenantPools) -> Self {
        Self {
            config,
            registry,
            tenant_pools,
            access_token_validity: Duration::minutes(ACCESS_TOKEN_VALIDITY_MINUTES),
            refresh_token_validity: Duration::days(REFRESH_TOKEN_VALIDITY_DAYS),
        }
    }

    /// Create a token service with custom validity periods.
    #[must_use]
    pub fn with_validity(
        config: TokenConfig,
        registry: PgPool,
        tenant_pools: TenantPools,
        access_token_minutes: i64,
        refresh_token_days: i64,
    ) -> Self {
        Self {
            config,
            registry,
            tenant_pools,
            access_token_validity: Duration::minutes(access_token_minutes),
            refresh_token_validity: Duration::days(refresh_token_days),
        }
    }

    /// Issue a base token for an authenticated user.
    ///
    /// Base tokens carry the user's identity and global roles but no
    /// tenant claim; they can only reach tenant selection and profile
    /// endpoints.
    ///
    /// # Returns
    ///
    /// A tuple of (`access_token`, `expires_in_seconds`).
    pub async fn issue_base_token(&self, user: &User) -> Result<(String, i64), ApiAuthError> {
        let global_roles = UserRole::get_user_roles(&self.registry, user.id).await?;

        let claims = JwtClaims::builder()
            .subject(user.id.to_string())
            .issuer(&self.config.issuer)
            .audience(vec![&self.config.audience])
            .global_roles(global_roles)
            .expires_in_secs(self.access_token_validity.num_seconds())
            .build();

        let token = self.encode(&claims)?;
        Ok((token, self.access_token_validity.num_seconds()))
    }

    /// Issue a tenant token for a user who is a member of the tenant.
    ///
    /// Verifies the membership and the tenant's liveness, then snapshots
    /// the role's permissions from the tenant database into the token.
    /// The snapshot is fixed for the token's lifetime; permission changes
    /// take effect on the next issuance.
    ///
    /// # Errors
    ///
    /// [`ApiAuthError::NotAMember`] if no membership exists and
    /// [`ApiAuthError::InvalidTenant`] if the tenant is unknown or not
    /// active.
    ///
    /// # Returns
    ///
    /// A tuple of (`access_token`, `expires_in_seconds`).
    pub async fn issue_tenant_token(
        &self,
        user_id: UserId,
        tenant_id: TenantId,
    ) -> Result<(String, i64), ApiAuthError> {
        let membership = Membership::find_for_user_and_tenant(
            &self.registry,
            *user_id.as_uuid(),
            *tenant_id.as_uuid(),
        )
        .await?
        .ok_or(ApiAuthError::NotAMember)?;

        Tenant::find_by_id(&self.registry, *tenant_id.as_uuid())
            .await?
            .filter(Tenant::is_active)
            .ok_or(ApiAuthError::InvalidTenant)?;

        let tenant_pool = self.tenant_pools.get(tenant_id).await?;
        let permissions =
            TenantRole::resolve_permissions(&tenant_pool, &membership.role_name).await?;
        let global_roles = UserRole::get_user_roles(&self.registry, *user_id.as_uuid()).await?;

        let claims = JwtClaims::builder()
            .subject(user_id.to_string())
            .issuer(&self.config.issuer)
            .audience(vec![&self.config.audience])
            .tenant_id(tenant_id)
            .role(&membership.role_name)
            .permissions(permissions)
            .global_roles(global_roles)
            .expires_in_secs(self.access_token_validity.num_seconds())
            .build();

        let token = self.encode(&claims)?;
        Ok((token, self.access_token_validity.num_seconds()))
    }

    /// Create an opaque refresh token and store its hash.
    ///
    /// The scope records which access token kind a redemption reproduces:
    /// `None` refreshes into a base token, `Some` into a tenant token.
    pub async fn issue_refresh_token(
        &self,
        user_id: UserId,
        scope: Option<TenantId>,
        user_agent: Option<String>,
        ip_address: Option<IpAddr>,
    ) -> Result<String, ApiAuthError> {
        let opaque_token = generate_secure_token();
        let token_hash = hash_token(&opaque_token);
        let expires_at = Utc::now() + self.refresh_token_validity;

        let mut record = NewRefreshToken::new(*user_id.as_uuid(), token_hash, expires_at);
        if let Some(tenant_id) = scope {
            record = record.tenant_scope(tenant_id);
        }
        if let Some(user_agent) = user_agent {
            record = record.user_agent(user_agent);
        }
        if let Some(ip) = ip_address {
            record = record.ip_address(ip);
        }
        record.insert(&self.registry).await?;

        Ok(opaque_token)
    }

    /// Redeem a refresh token: rotate it and issue a fresh token pair.
    ///
    /// The presented token is claimed atomically before anything else, so
    /// concurrent redemptions of the same token succeed at most once. A
    /// claim that fails is diagnosed after the fact: replayed, expired,
    /// and unknown tokens each get their own error.
    ///
    /// An explicit `tenant_id` re-scopes the new pair (validated like
    /// tenant selection); otherwise the stored scope carries over. The
    /// old token stays burned even if issuance fails past the claim.
    ///
    /// # Returns
    ///
    /// A tuple of (`access_token`, `refresh_token`, `expires_in_seconds`).
    pub async fn refresh(
        &self,
        presented: &str,
        tenant_id: Option<TenantId>,
        user_agent: Option<String>,
        ip_address: Option<IpAddr>,
    ) -> Result<(String, String, i64), ApiAuthError> {
        let token_hash = hash_token(presented);

        let claimed = match RefreshToken::claim(&self.registry, &token_hash).await? {
            Some(token) => token,
            None => return Err(self.diagnose_failed_claim(&token_hash).await),
        };

        let user = User::find_by_id(&self.registry, claimed.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(ApiAuthError::InvalidCredentials)?;

        let scope = tenant_id.or(claimed.tenant_scope());

        let (access_token, expires_in) = match scope {
            Some(tenant_id) => self.issue_tenant_token(user.user_id(), tenant_id).await?,
            None => self.issue_base_token(&user).await?,
        };

        let refresh_token = self
            .issue_refresh_token(user.user_id(), scope, user_agent, ip_address)
            .await?;

        Ok((access_token, refresh_token, expires_in))
    }

    /// Revoke a refresh token by its opaque value.
    ///
    /// Returns `true` if a live token was revoked. Revoking an unknown or
    /// already-revoked token is not an error; logout is replay-safe.
    pub async fn revoke(&self, presented: &str) -> Result<bool, ApiAuthError> {
        let token_hash = hash_token(presented);
        Ok(RefreshToken::revoke(&self.registry, &token_hash).await?)
    }

    /// Explain why a claim returned no row.
    async fn diagnose_failed_claim(&self, token_hash: &str) -> ApiAuthError {
        match RefreshToken::find_by_hash(&self.registry, token_hash).await {
            Ok(Some(token)) if token.is_revoked() => {
                tracing::warn!(
                    user_id = %token.user_id,
                    "Replay of a rotated refresh token detected"
                );
                ApiAuthError::ReplayedRefreshToken
            }
            Ok(Some(_)) => ApiAuthError::RefreshTokenExpired,
            Ok(None) => ApiAuthError::InvalidRefreshToken,
            Err(e) => ApiAuthError::Database(e),
        }
    }

    fn encode(&self, claims: &JwtClaims) -> Result<String, ApiAuthError> {
        encode_token(claims, &self.config.private_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiAuthError::Internal(format!("Token generation error: {e}"))
        })
    }
}

/// Hash a token using SHA-256.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a cryptographically secure opaque token.
///
/// Returns a URL-safe base64-encoded string of 32 random bytes (256 bits
/// of entropy). The resulting token is 43 characters long.
///
/// SECURITY: Do NOT use `Uuid::new_v4()` for tokens; it is not designed
/// for cryptographic security.
#[must_use]
pub fn generate_secure_token() -> String {
    let mut bytes = [0u8; SECURE_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Verify a token hash using constant-time comparison.
///
/// This prevents timing attacks by ensuring the comparison takes the same
/// amount of time regardless of where the first difference occurs.
///
/// # Arguments
///
/// * `provided_token` - The raw token provided by the user
/// * `stored_hash` - The SHA-256 hash stored in the database (hex-encoded)
///
/// # Returns
///
/// `true` if the token matches the hash, `false` otherwise.
#[must_use]
pub fn verify_token_hash_constant_time(provided_token: &str, stored_hash: &str) -> bool {
    let provided_hash = hash_token(provided_token);
    provided_hash
        .as_bytes()
        .ct_eq(stored_hash.as_bytes())
        .into()
}
