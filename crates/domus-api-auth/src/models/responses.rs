//! Response DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use domus_db::{MembershipWithTenant, MembershipWithUser};

/// Access and refresh token pair returned by token-issuing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// The signed JWT access token.
    pub access_token: String,

    /// The opaque refresh token.
    pub refresh_token: String,

    /// Token type, always "Bearer".
    pub token_type: String,

    /// Access token validity in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Create a new token response.
    #[must_use]
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Response after requesting a passcode.
///
/// Carries the expiry only; the code itself travels through the delivery
/// channel, never the HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OtpRequestedResponse {
    /// Generic confirmation message.
    pub message: String,

    /// Passcode validity in seconds.
    pub expires_in_seconds: i64,
}

impl OtpRequestedResponse {
    /// Create a response for a dispatched passcode.
    #[must_use]
    pub fn new(expires_in_minutes: i64) -> Self {
        Self {
            message: "A verification code has been sent to your mobile.".to_string(),
            expires_in_seconds: expires_in_minutes * 60,
        }
    }
}

/// One tenant the caller belongs to, with the role held there.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantMembershipResponse {
    /// The tenant's ID.
    pub tenant_id: Uuid,

    /// The tenant's display name.
    pub name: String,

    /// The tenant's slug.
    pub slug: String,

    /// The tenant's lifecycle status.
    pub status: String,

    /// The role the caller holds in this tenant.
    pub role: String,
}

impl From<MembershipWithTenant> for TenantMembershipResponse {
    fn from(m: MembershipWithTenant) -> Self {
        Self {
            tenant_id: m.tenant_id,
            name: m.tenant_name,
            slug: m.tenant_slug,
            status: m.tenant_status.to_string(),
            role: m.role_name,
        }
    }
}

/// Response after successful passcode verification.
///
/// The access token is base-scoped; the membership list lets the client
/// choose a tenant for the second stage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OtpVerifyResponse {
    /// The signed base-scope JWT access token.
    pub access_token: String,

    /// The opaque refresh token (base scope).
    pub refresh_token: String,

    /// Token type, always "Bearer".
    pub token_type: String,

    /// Access token validity in seconds.
    pub expires_in: i64,

    /// Every tenant the caller belongs to.
    pub memberships: Vec<TenantMembershipResponse>,
}

impl OtpVerifyResponse {
    /// Assemble from a token pair and a membership list.
    #[must_use]
    pub fn new(tokens: TokenResponse, memberships: Vec<TenantMembershipResponse>) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            memberships,
        }
    }
}

/// Response for GET /auth/tenants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantListResponse {
    /// Every tenant the caller belongs to.
    pub tenants: Vec<TenantMembershipResponse>,
}

/// Caller identity echo for GET /api/me.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    /// The caller's user ID.
    pub user_id: Uuid,

    /// The resolved tenant.
    pub tenant_id: Uuid,

    /// The membership role held in the resolved tenant.
    pub role: Option<String>,

    /// The permission snapshot from the access token.
    pub permissions: Vec<String>,

    /// The caller's global roles.
    pub global_roles: Vec<String>,
}

/// One member of a tenant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    /// The member's user ID.
    pub user_id: Uuid,

    /// The member's display name.
    pub name: String,

    /// The role the member holds in this tenant.
    pub role: String,

    /// Whether the member's user account is active.
    pub is_active: bool,
}

impl From<MembershipWithUser> for MemberResponse {
    fn from(m: MembershipWithUser) -> Self {
        Self {
            user_id: m.user_id,
            name: m.user_name,
            role: m.role_name,
            is_active: m.user_is_active,
        }
    }
}

/// Response for GET /api/members.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MembersResponse {
    /// Every member of the resolved tenant.
    pub members: Vec<MemberResponse>,
}
