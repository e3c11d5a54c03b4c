//! One-time passcode login endpoint handlers.
//!
//! - POST /auth/otp/request — Request a passcode for a mobile number
//! - POST /auth/otp/verify — Verify a passcode and receive a base token

use axum::{extract::ConnectInfo, http::HeaderMap, Extension, Json};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use validator::Validate;

use domus_db::MembershipWithTenant;

use crate::error::ApiAuthError;
use crate::models::{
    OtpRequest, OtpRequestedResponse, OtpVerifyRequest, OtpVerifyResponse, TokenResponse,
};
use crate::services::{OtpService, TokenService};

/// Handle a passcode request.
///
/// Issues a 6-digit code for a provisioned member and delivers it through
/// the configured sender. The response carries the expiry window only,
/// never the code itself.
#[utoipa::path(
    post,
    path = "/auth/otp/request",
    request_body = OtpRequest,
    responses(
        (status = 200, description = "Passcode issued and delivery started", body = OtpRequestedResponse),
        (status = 400, description = "Malformed mobile number"),
        (status = 401, description = "Mobile is not a provisioned member"),
    ),
    tag = "Authentication"
)]
pub async fn request_otp_handler(
    Extension(otp_service): Extension<Arc<OtpService>>,
    Json(body): Json<OtpRequest>,
) -> Result<Json<OtpRequestedResponse>, ApiAuthError> {
    body.validate()?;

    let expiry_minutes = otp_service.request_code(&body.mobile).await?;

    Ok(Json(OtpRequestedResponse::new(expiry_minutes)))
}

/// Handle passcode verification.
///
/// A correct code authenticates the user and returns a base token, a
/// refresh token, and the user's memberships so the client can offer a
/// tenant picker. The base token carries no tenant claim; tenant selection
/// is a separate exchange.
#[utoipa::path(
    post,
    path = "/auth/otp/verify",
    request_body = OtpVerifyRequest,
    responses(
        (status = 200, description = "Authentication successful", body = OtpVerifyResponse),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Invalid, expired, or exhausted passcode"),
    ),
    tag = "Authentication"
)]
pub async fn verify_otp_handler(
    Extension(pool): Extension<PgPool>,
    Extension(otp_service): Extension<Arc<OtpService>>,
    Extension(token_service): Extension<Arc<TokenService>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<OtpVerifyRequest>,
) -> Result<Json<OtpVerifyResponse>, ApiAuthError> {
    body.validate()?;

    let user = otp_service.verify_code(&body.mobile, &body.code).await?;

    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let (access_token, expires_in) = token_service.issue_base_token(&user).await?;
    let refresh_token = token_service
        .issue_refresh_token(user.user_id(), None, user_agent, Some(addr.ip()))
        .await?;

    let memberships = MembershipWithTenant::list_for_user(&pool, user.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    tracing::info!(user_id = %user.id, "User authenticated via one-time passcode");

    let tokens = TokenResponse::new(access_token, refresh_token, expires_in);
    Ok(Json(OtpVerifyResponse::new(tokens, memberships)))
}

#[cfg(test)]
mod tests {
    // Handler tests require integration test setup
}
