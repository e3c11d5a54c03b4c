//! HTTP handlers for the tenant administration API.

pub mod create;
pub mod lifecycle;
pub mod list;
pub mod members;
pub mod upgrade;

pub use create::create_tenant_handler;
pub use lifecycle::{activate_tenant_handler, deactivate_tenant_handler};
pub use list::list_tenants_handler;
pub use members::add_member_handler;
pub use upgrade::upgrade_tenants_handler;
