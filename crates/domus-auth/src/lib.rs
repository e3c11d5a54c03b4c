//! Domus Authentication Library
//!
//! JWT handling for the two-stage Domus token model:
//!
//! - **Base tokens** identify a user only, issued right after passcode
//!   verification and before a tenant is chosen.
//! - **Tenant access tokens** are scoped to a single tenant and carry the
//!   membership role plus a flattened permission snapshot taken at issuance.
//!
//! # Features
//!
//! - RS256 token encoding/decoding with configurable validation
//! - Claims builder with Domus-specific claims (`tid`, `role`, `perms`)
//! - Explicit error taxonomy for every validation failure mode
//!
//! # Example
//!
//! ```rust,ignore
//! use domus_auth::{decode_token, encode_token, JwtClaims, TokenKind};
//!
//! let claims = JwtClaims::builder()
//!     .subject(user_id.to_string())
//!     .issuer("domus")
//!     .expires_in_secs(900)
//!     .build();
//!
//! let token = encode_token(&claims, private_key_pem)?;
//! let decoded = decode_token(&token, public_key_pem)?;
//! assert_eq!(decoded.kind(), TokenKind::Base);
//! ```

mod claims;
mod error;
mod jwt;

pub use claims::{JwtClaims, JwtClaimsBuilder, TokenKind};
pub use error::AuthError;
pub use jwt::{decode_token, decode_token_with_config, encode_token, ValidationConfig};
