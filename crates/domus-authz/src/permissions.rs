//! Permission system-name catalog.
//!
//! Stable string identifiers for every authorizable action. The same names
//! are seeded into each tenant database's `permissions` table, resolved into
//! token snapshots at tenant selection, and referenced by route guards via
//! [`PermissionLayer`](crate::PermissionLayer).

/// View units and their details.
pub const UNITS_VIEW: &str = "Units.View";

/// Create and modify units.
pub const UNITS_EDIT: &str = "Units.Edit";

/// View owner records.
pub const OWNERS_VIEW: &str = "Owners.View";

/// Create and modify owner records.
pub const OWNERS_EDIT: &str = "Owners.Edit";

/// View resident records.
pub const RESIDENTS_VIEW: &str = "Residents.View";

/// Create and modify resident records.
pub const RESIDENTS_EDIT: &str = "Residents.Edit";

/// View facilities and bookings.
pub const FACILITIES_VIEW: &str = "Facilities.View";

/// Manage facilities and approve bookings.
pub const FACILITIES_MANAGE: &str = "Facilities.Manage";

/// View the visitor log.
pub const VISITORS_VIEW: &str = "Visitors.View";

/// Record visitor entries and exits.
pub const VISITORS_LOG: &str = "Visitors.Log";

/// View shared documents.
pub const DOCUMENTS_VIEW: &str = "Documents.View";

/// Upload and replace shared documents.
pub const DOCUMENTS_UPLOAD: &str = "Documents.Upload";

/// View the tenant's member list.
pub const MEMBERS_VIEW: &str = "Members.View";

/// Manage tenant memberships and role assignments.
pub const MEMBERS_MANAGE: &str = "Members.Manage";

/// View reports and dashboards.
pub const REPORTS_VIEW: &str = "Reports.View";

/// Every permission system-name, in catalog order.
///
/// Must stay in sync with the seed migration that populates each tenant's
/// `permissions` table.
pub const ALL: &[&str] = &[
    UNITS_VIEW,
    UNITS_EDIT,
    OWNERS_VIEW,
    OWNERS_EDIT,
    RESIDENTS_VIEW,
    RESIDENTS_EDIT,
    FACILITIES_VIEW,
    FACILITIES_MANAGE,
    VISITORS_VIEW,
    VISITORS_LOG,
    DOCUMENTS_VIEW,
    DOCUMENTS_UPLOAD,
    MEMBERS_VIEW,
    MEMBERS_MANAGE,
    REPORTS_VIEW,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let unique: HashSet<&str> = ALL.iter().copied().collect();
        assert_eq!(unique.len(), ALL.len());
    }

    #[test]
    fn test_catalog_names_are_well_formed() {
        for name in ALL {
            let mut parts = name.split('.');
            let domain = parts.next().unwrap_or_default();
            let action = parts.next().unwrap_or_default();

            assert!(!domain.is_empty(), "{name} has no domain");
            assert!(!action.is_empty(), "{name} has no action");
            assert!(parts.next().is_none(), "{name} has extra segments");
        }
    }
}
