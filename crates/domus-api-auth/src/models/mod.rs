//! Request and response DTOs for the authentication API.

pub mod requests;
pub mod responses;

pub use requests::{
    LogoutRequest, OtpRequest, OtpVerifyRequest, RefreshRequest, TenantSelectRequest,
};
pub use responses::{
    MeResponse, MemberResponse, MembersResponse, OtpRequestedResponse, OtpVerifyResponse,
    TenantListResponse, TenantMembershipResponse, TokenResponse,
};
