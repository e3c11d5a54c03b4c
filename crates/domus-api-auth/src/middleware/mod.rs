//! Middleware components for the authentication API.

pub mod jwt_auth;

pub use jwt_auth::{jwt_auth_middleware, JwtVerifier};
