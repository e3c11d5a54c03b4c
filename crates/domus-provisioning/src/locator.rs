//! Tenant database naming rules.
//!
//! Database names end up interpolated into `CREATE DATABASE` statements,
//! where identifiers cannot be bound as parameters. The strict charset here
//! is what makes that interpolation safe; nothing may bypass it.

use crate::error::ProvisioningError;

/// PostgreSQL identifier length limit.
pub const MAX_DATABASE_NAME_LEN: usize = 63;

/// Prefix for derived tenant database names.
pub const DATABASE_NAME_PREFIX: &str = "domus_t_";

/// Validate a tenant database name.
///
/// Accepts only `[a-z0-9_]`, not starting with a digit, at most 63 bytes.
/// Every path that interpolates a database name into SQL must go through
/// this check first.
pub fn validate_database_name(name: &str) -> Result<(), ProvisioningError> {
    if name.is_empty() || name.len() > MAX_DATABASE_NAME_LEN {
        return Err(ProvisioningError::InvalidDatabaseName(name.to_string()));
    }

    let bytes = name.as_bytes();
    if !(bytes[0].is_ascii_lowercase() || bytes[0] == b'_') {
        return Err(ProvisioningError::InvalidDatabaseName(name.to_string()));
    }

    if !bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'_')
    {
        return Err(ProvisioningError::InvalidDatabaseName(name.to_string()));
    }

    Ok(())
}

/// Derive a tenant database name from its slug.
///
/// `domus_t_<slug>` with `-` mapped to `_`. The result is validated, so a
/// slug that cannot produce a legal identifier is rejected here rather than
/// at the `CREATE DATABASE` boundary.
pub fn database_name_for_slug(slug: &str) -> Result<String, ProvisioningError> {
    let name = format!("{DATABASE_NAME_PREFIX}{}", slug.replace('-', "_"));
    validate_database_name(&name)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_names() {
        assert!(validate_database_name("domus_t_lakeside").is_ok());
        assert!(validate_database_name("domus_t_block_42").is_ok());
        assert!(validate_database_name("_internal").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_overlong_names() {
        assert!(validate_database_name("").is_err());
        assert!(validate_database_name(&"a".repeat(64)).is_err());
        assert!(validate_database_name(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_rejects_leading_digit() {
        assert!(validate_database_name("1domus").is_err());
    }

    #[test]
    fn test_rejects_unsafe_characters() {
        for name in [
            "domus-t-lakeside",
            "Domus_T_Lakeside",
            "domus t lakeside",
            "domus;drop",
            "domus\"t",
            "domus'||'t",
        ] {
            let err = validate_database_name(name).unwrap_err();
            assert!(err.is_invalid_name(), "{name} should be rejected");
        }
    }

    #[test]
    fn test_slug_derivation_maps_hyphens() {
        assert_eq!(
            database_name_for_slug("lakeside-towers").unwrap(),
            "domus_t_lakeside_towers"
        );
    }

    #[test]
    fn test_slug_derivation_rejects_bad_slugs() {
        assert!(database_name_for_slug("Lakeside").is_err());
        assert!(database_name_for_slug("lakeside towers").is_err());
        assert!(database_name_for_slug("").is_err());
    }

    #[test]
    fn test_slug_derivation_respects_length_limit() {
        // 8 bytes of prefix leave 55 for the slug.
        let ok = "a".repeat(55);
        let too_long = "a".repeat(56);
        assert!(database_name_for_slug(&ok).is_ok());
        assert!(database_name_for_slug(&too_long).is_err());
    }
}
