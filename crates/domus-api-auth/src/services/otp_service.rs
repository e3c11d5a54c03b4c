//! One-time passcode login service.
//!
//! Business logic for the OTP request and verification flow. Codes are
//! delivered through an [`OtpSender`] so the transport (SMS gateway, dev
//! logger, test capture) stays pluggable.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use domus_db::{Membership, OneTimePasscode, User};

use crate::error::ApiAuthError;
use crate::services::token_service::{hash_token, verify_token_hash_constant_time};

/// How long an issued passcode stays redeemable, in minutes.
pub const OTP_VALIDITY_MINUTES: i64 = 5;

/// Maximum failed verification attempts before a passcode is dead.
pub const OTP_MAX_ATTEMPTS: i32 = 5;

/// Error raised by an [`OtpSender`] when delivery fails.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct OtpDeliveryError(pub String);

/// Transport for delivering one-time passcodes to a mobile number.
#[async_trait]
pub trait OtpSender: Send + Sync {
    /// Deliver `code` to `mobile`.
    async fn send_code(&self, mobile: &str, code: &str) -> Result<(), OtpDeliveryError>;
}

/// Sender that logs delivery instead of sending. For development setups
/// without an SMS gateway.
///
/// Logs a masked mobile number only; the code itself is never logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingOtpSender;

#[async_trait]
impl OtpSender for LoggingOtpSender {
    async fn send_code(&self, mobile: &str, _code: &str) -> Result<(), OtpDeliveryError> {
        tracing::info!(
            mobile = %mask_mobile(mobile),
            "One-time passcode issued (delivery disabled)"
        );
        Ok(())
    }
}

/// Sender that captures delivered codes in memory for tests.
#[derive(Debug, Default)]
pub struct MockOtpSender {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl MockOtpSender {
    /// Create a capturing sender.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sender whose deliveries always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// All `(mobile, code)` pairs delivered so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, String)> {
        self.lock().clone()
    }

    /// The most recently delivered code for a mobile, if any.
    #[must_use]
    pub fn last_code(&self, mobile: &str) -> Option<String> {
        self.lock()
            .iter()
            .rev()
            .find(|(m, _)| m == mobile)
            .map(|(_, code)| code.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, String)>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OtpSender for MockOtpSender {
    async fn send_code(&self, mobile: &str, code: &str) -> Result<(), OtpDeliveryError> {
        if self.fail {
            return Err(OtpDeliveryError(
                "mock sender configured to fail".to_string(),
            ));
        }
        self.lock().push((mobile.to_string(), code.to_string()));
        Ok(())
    }
}

/// Service for the one-time passcode login flow.
#[derive(Clone)]
pub struct OtpService {
    registry: PgPool,
    sender: Arc<dyn OtpSender>,
    validity: Duration,
    max_attempts: i32,
}

impl OtpService {
    /// Create a new OTP service with default validity and attempt limits.
    #[must_use]
    pub fn new(registry: PgPool, sender: Arc<dyn OtpSender>) -> Self {
        Self {
            registry,
            sender,
            validity: Duration::minutes(OTP_VALIDITY_MINUTES),
            max_attempts: OTP_MAX_ATTEMPTS,
        }
    }

    /// Create an OTP service with custom limits.
    #[must_use]
    pub fn with_limits(
        registry: PgPool,
        sender: Arc<dyn OtpSender>,
        validity_minutes: i64,
        max_attempts: i32,
    ) -> Self {
        Self {
            registry,
            sender,
            validity: Duration::minutes(validity_minutes),
            max_attempts,
        }
    }

    /// Issue and deliver a passcode for a mobile number.
    ///
    /// The caller must already be a provisioned member: an unknown mobile,
    /// an inactive account, or an account with no memberships is rejected
    /// with [`ApiAuthError::NotAMember`] before any code is generated.
    /// Issuing supersedes any pending code for the same mobile.
    ///
    /// # Returns
    ///
    /// The passcode validity in minutes, for the response body.
    pub async fn request_code(&self, mobile: &str) -> Result<i64, ApiAuthError> {
        let user = User::find_by_mobile(&self.registry, mobile)
            .await?
            .filter(|u| u.is_active)
            .ok_or(ApiAuthError::NotAMember)?;

        let memberships = Membership::count_for_user(&self.registry, user.id).await?;
        if memberships == 0 {
            return Err(ApiAuthError::NotAMember);
        }

        let (code, code_hash) = Self::generate_passcode();
        let expires_at = Utc::now() + self.validity;

        OneTimePasscode::issue(&self.registry, user.id, mobile, &code_hash, expires_at).await?;

        self.sender.send_code(mobile, &code).await.map_err(|e| {
            tracing::error!(
                mobile = %mask_mobile(mobile),
                error = %e,
                "Failed to deliver one-time passcode"
            );
            ApiAuthError::DeliveryFailed(e.to_string())
        })?;

        Ok(self.validity.num_minutes())
    }

    /// Verify a passcode and return the authenticated user.
    ///
    /// Every failure (no pending code, expired, attempts exhausted, wrong
    /// code, lost consume race, inactive account) returns the same
    /// [`ApiAuthError::InvalidCredentials`] so callers cannot probe which
    /// check failed. A wrong code burns one attempt; the consume is a
    /// conditional update, so concurrent verifications of the same code
    /// succeed at most once.
    pub async fn verify_code(&self, mobile: &str, code: &str) -> Result<User, ApiAuthError> {
        let passcode = OneTimePasscode::find_pending_by_mobile(&self.registry, mobile)
            .await?
            .ok_or(ApiAuthError::InvalidCredentials)?;

        if passcode.is_expired() || passcode.is_exhausted(self.max_attempts) {
            return Err(ApiAuthError::InvalidCredentials);
        }

        if !verify_token_hash_constant_time(code, &passcode.code_hash) {
            let attempts =
                OneTimePasscode::record_failed_attempt(&self.registry, passcode.id).await?;
            tracing::warn!(
                mobile = %mask_mobile(mobile),
                attempts,
                "One-time passcode verification failed"
            );
            return Err(ApiAuthError::InvalidCredentials);
        }

        if !OneTimePasscode::consume(&self.registry, passcode.id).await? {
            return Err(ApiAuthError::InvalidCredentials);
        }

        User::find_by_id(&self.registry, passcode.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(ApiAuthError::InvalidCredentials)
    }

    /// Passcode validity in minutes.
    #[must_use]
    pub fn validity_minutes(&self) -> i64 {
        self.validity.num_minutes()
    }

    /// Generate a 6-digit passcode and its SHA-256 hex digest.
    fn generate_passcode() -> (String, String) {
        use rand::Rng;
        let code: u32 = rand::rng().random_range(0..1_000_000);
        let code_str = format!("{code:06}");
        let hash = hash_token(&code_str);
        (code_str, hash)
    }
}

/// Mask a mobile number for logs, keeping only the last four characters.
fn mask_mobile(mobile: &str) -> String {
    let chars: Vec<char> = mobile.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passcode_is_six_digits() {
        for _ in 0..20 {
            let (code, _) = OtpService::generate_passcode();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn passcode_hash_verifies() {
        let (code, hash) = OtpService::generate_passcode();
        assert_eq!(hash.len(), 64);
        assert!(verify_token_hash_constant_time(&code, &hash));

        let wrong = if code == "000000" { "000001" } else { "000000" };
        assert!(!verify_token_hash_constant_time(wrong, &hash));
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_mobile("+919876543210"), "*********3210");
    }

    #[test]
    fn mask_short_input_fully() {
        assert_eq!(mask_mobile("1234"), "****");
        assert_eq!(mask_mobile("12"), "**");
        assert_eq!(mask_mobile(""), "");
    }

    #[tokio::test]
    async fn mock_sender_captures_codes() {
        let sender = MockOtpSender::new();
        sender.send_code("+919800000001", "123456").await.unwrap();
        sender.send_code("+919800000001", "654321").await.unwrap();
        sender.send_code("+919800000002", "111111").await.unwrap();

        assert_eq!(sender.sent().len(), 3);
        assert_eq!(
            sender.last_code("+919800000001"),
            Some("654321".to_string())
        );
        assert_eq!(
            sender.last_code("+919800000002"),
            Some("111111".to_string())
        );
        assert_eq!(sender.last_code("+919800000003"), None);
    }

    #[tokio::test]
    async fn failing_sender_errors() {
        let sender = MockOtpSender::failing();
        let err = sender.send_code("+919800000001", "123456").await;
        assert!(err.is_err());
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn logging_sender_always_succeeds() {
        let sender = LoggingOtpSender;
        assert!(sender.send_code("+919800000001", "123456").await.is_ok());
    }
}
