//! Request DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request body for POST /auth/otp/request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OtpRequest {
    /// Mobile number in E.164 format.
    #[validate(custom(function = validate_mobile))]
    pub mobile: String,
}

/// Request body for POST /auth/otp/verify.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OtpVerifyRequest {
    /// Mobile number the passcode was sent to.
    #[validate(custom(function = validate_mobile))]
    pub mobile: String,

    /// The 6-digit passcode.
    #[validate(length(equal = 6, message = "Code must be exactly 6 digits"))]
    pub code: String,
}

/// Request body for POST /auth/tenant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantSelectRequest {
    /// The tenant to scope the new access token to.
    pub tenant_id: Uuid,
}

/// Request body for POST /auth/refresh.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    /// The opaque refresh token to redeem.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,

    /// Optional tenant scope for the successor tokens. Falls back to the
    /// scope stored with the presented token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
}

/// Request body for POST /auth/logout.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LogoutRequest {
    /// The refresh token to revoke.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Validate an E.164 mobile number: `+` followed by 7 to 15 digits.
fn validate_mobile(mobile: &str) -> Result<(), validator::ValidationError> {
    let digits = match mobile.strip_prefix('+') {
        Some(rest) => rest,
        None => {
            let mut err = validator::ValidationError::new("invalid_mobile");
            err.message = Some("Mobile must start with '+'".into());
            return Err(err);
        }
    };

    if digits.len() < 7 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        let mut err = validator::ValidationError::new("invalid_mobile");
        err.message = Some("Mobile must be '+' followed by 7-15 digits".into());
        return Err(err);
    }

    Ok(())
}
