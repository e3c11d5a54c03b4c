//! Database entity models for domus-db.
//!
//! These models represent the registry tables and provide type-safe
//! interactions with PostgreSQL. `tenant_role` is the exception: it queries
//! a tenant's own database through a pool from the directory.

pub mod membership;
pub mod one_time_passcode;
pub mod refresh_token;
pub mod tenant;
pub mod tenant_role;
pub mod user;
pub mod user_role;
