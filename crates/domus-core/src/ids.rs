//! Strongly Typed Identifiers
//!
//! Type-safe identifier newtypes used across Domus. The newtype pattern
//! prevents accidental misuse of different ID kinds at compile time.
//!
//! # Example
//!
//! ```
//! use domus_core::{TenantId, UserId};
//!
//! let tenant = TenantId::new();
//! let user = UserId::new();
//!
//! fn requires_tenant(id: TenantId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_tenant(tenant);
//! // requires_tenant(user); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying UUID parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Strongly typed identifier for tenants.
    ///
    /// A tenant is an isolated customer organization with its own physical
    /// database. Every tenant-scoped operation carries one of these.
    ///
    /// # Example
    ///
    /// ```
    /// use domus_core::TenantId;
    /// use uuid::Uuid;
    ///
    /// let tenant_id = TenantId::new();
    /// println!("Tenant: {}", tenant_id);
    ///
    /// let uuid = Uuid::new_v4();
    /// let tenant_id = TenantId::from_uuid(uuid);
    /// assert_eq!(tenant_id.as_uuid(), &uuid);
    ///
    /// let tenant_id: TenantId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
    /// ```
    TenantId
);

define_id!(
    /// Strongly typed identifier for users.
    ///
    /// Users are global (one row per human, never duplicated per tenant);
    /// tenancy is expressed through memberships.
    ///
    /// # Example
    ///
    /// ```
    /// use domus_core::UserId;
    ///
    /// let user_id = UserId::new();
    /// println!("User: {}", user_id);
    /// ```
    UserId
);

define_id!(
    /// Strongly typed identifier for user-to-tenant memberships.
    ///
    /// A membership links one user to one tenant with an assigned role name.
    ///
    /// # Example
    ///
    /// ```
    /// use domus_core::MembershipId;
    ///
    /// let membership_id = MembershipId::new();
    /// println!("Membership: {}", membership_id);
    /// ```
    MembershipId
);
