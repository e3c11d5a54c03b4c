//! Request DTOs for tenant administration endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for POST /tenants.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTenantRequest {
    /// Human-readable tenant name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// URL-safe identifier; also derives the tenant database name.
    #[validate(custom(function = validate_slug))]
    pub slug: String,
}

/// Request body for POST /tenants/{id}/members.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddMemberRequest {
    /// The member's display name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// The member's email address.
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    /// Mobile number in E.164 format; the login identifier.
    #[validate(custom(function = validate_mobile))]
    pub mobile: String,

    /// Name of a role in the tenant's role catalog.
    #[validate(length(min = 1, max = 50, message = "Role must be 1-50 characters"))]
    pub role: String,
}

/// Validate a tenant slug: lowercase letters, digits and `-`, starting with
/// a letter. The length cap keeps the derived database name under the
/// 63-byte `PostgreSQL` identifier limit.
fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let bytes = slug.as_bytes();

    let well_formed = !bytes.is_empty()
        && bytes.len() <= 50
        && bytes[0].is_ascii_lowercase()
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-');

    if !well_formed {
        let mut err = validator::ValidationError::new("invalid_slug");
        err.message =
            Some("Slug must be 1-50 lowercase letters, digits or '-', starting with a letter".into());
        return Err(err);
    }

    Ok(())
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
