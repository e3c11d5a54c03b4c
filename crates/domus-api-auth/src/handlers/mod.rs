//! HTTP handlers for authentication and session endpoints.

pub mod logout;
pub mod me;
pub mod otp;
pub mod refresh;
pub mod tenant_select;

pub use logout::logout_handler;
pub use me::{list_members_handler, me_handler};
pub use otp::{request_otp_handler, verify_otp_handler};
pub use refresh::refresh_handler;
pub use tenant_select::{list_tenants_handler, select_tenant_handler};
