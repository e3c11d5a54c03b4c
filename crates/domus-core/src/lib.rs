//! Domus Core Library
//!
//! Shared primitives for the Domus property-management platform.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (TenantId, UserId, MembershipId)
//!
//! # Example
//!
//! ```
//! use domus_core::{TenantId, UserId};
//!
//! let tenant_id = TenantId::new();
//! let user_id = UserId::new();
//! assert_ne!(tenant_id.to_string(), user_id.to_string());
//! ```

pub mod ids;

pub use ids::{MembershipId, ParseIdError, TenantId, UserId};
