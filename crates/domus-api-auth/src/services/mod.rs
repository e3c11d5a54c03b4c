//! Business logic for passwordless login and token issuance.

pub mod otp_service;
pub mod token_service;

pub use otp_service::{
    LoggingOtpSender, MockOtpSender, OtpDeliveryError, OtpSender, OtpService, OTP_MAX_ATTEMPTS,
    OTP_VALIDITY_MINUTES,
};
pub use token_service::{
    generate_secure_token, hash_token, verify_token_hash_constant_time, TokenConfig, TokenService,
    ACCESS_TOKEN_VALIDITY_MINUTES, REFRESH_TOKEN_VALIDITY_DAYS,
};
