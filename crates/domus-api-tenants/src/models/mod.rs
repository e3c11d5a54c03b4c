//! Request and response DTOs for the tenant administration API.

pub mod requests;
pub mod responses;

pub use requests::{AddMemberRequest, CreateTenantRequest};
pub use responses::{
    FailedTenantResponse, MemberCreatedResponse, TenantListResponse, TenantResponse,
    UpgradeReportResponse, UpgradedTenantResponse,
};
