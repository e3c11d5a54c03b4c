//! Error types for token operations.
//!
//! Provides explicit error variants for all token failures.

use thiserror::Error;

/// Authentication error types.
///
/// Each variant maps to a specific failure mode in token handling. At the
/// transport level the API crates collapse all of these into one generic
/// 401 so that forged, malformed and merely expired credentials are
/// indistinguishable to a caller.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Token has expired (exp claim is in the past).
    #[error("Token has expired")]
    TokenExpired,

    /// Token signature is invalid.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token format is malformed or invalid.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token uses an unsupported algorithm (only RS256 is allowed).
    #[error("Unsupported algorithm: only RS256 is allowed")]
    InvalidAlgorithm,

    /// Required claim is missing from token.
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// RSA key is invalid or malformed.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl AuthError {
    /// Check if this error indicates an expired token.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, AuthError::TokenExpired)
    }

    /// Check if this error indicates an invalid signature.
    #[must_use]
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, AuthError::InvalidSignature)
    }

    /// Check if this error came from validating a presented token, as
    /// opposed to a server-side key problem.
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        !matches!(self, AuthError::InvalidKey(_))
    }
}
