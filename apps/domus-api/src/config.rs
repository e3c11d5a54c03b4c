//! Application configuration loaded from environment variables.
//!
//! Loading is fail-fast: required variables must be present and valid or
//! the process exits with a clear message before anything binds or
//! connects. Optional values carry defaults suitable for development.

use std::env;

use thiserror::Error;

/// Default tracing filter when `RUST_LOG` is unset.
const DEFAULT_RUST_LOG: &str = "info,domus=debug";

/// Default bind address.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
const DEFAULT_PORT: u16 = 8080;

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Registry database connection string. Tenant databases live on the
    /// same server; their locators replace only the database name.
    pub database_url: String,

    /// RS256 private key in PEM format for signing access tokens.
    pub jwt_private_key: String,

    /// RS256 public key in PEM format for verifying access tokens.
    pub jwt_public_key: String,

    /// Token issuer (`iss` claim).
    pub jwt_issuer: String,

    /// Token audience (`aud` claim).
    pub jwt_audience: String,

    /// Tracing filter directive (e.g. "info,domus=debug").
    pub rust_log: String,

    /// Allowed CORS origins (comma-separated URLs, or "*" for development).
    pub cors_origins: Vec<String>,

    /// Server bind address.
    pub host: String,

    /// Server listen port.
    pub port: u16,

    /// Display name for the seeded platform administrator.
    pub admin_name: String,

    /// Email for the seeded platform administrator.
    pub admin_email: String,

    /// Mobile number the platform administrator logs in with.
    pub admin_mobile: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value fails to parse; the caller should treat this as fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let jwt_private_key = require("JWT_PRIVATE_KEY")?;
        let jwt_public_key = require("JWT_PUBLIC_KEY")?;

        let jwt_issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "domus".to_string());
        let jwt_audience = env::var("JWT_AUDIENCE").unwrap_or_else(|_| "domus-api".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: format!("{e}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let admin_name =
            env::var("PLATFORM_ADMIN_NAME").unwrap_or_else(|_| "Platform Administrator".to_string());
        let admin_email = require("PLATFORM_ADMIN_EMAIL")?;
        let admin_mobile = require("PLATFORM_ADMIN_MOBILE")?;

        Ok(Self {
            database_url,
            jwt_private_key,
            jwt_public_key,
            jwt_issuer,
            jwt_audience,
            rust_log,
            cors_origins,
            host,
            port,
            admin_name,
            admin_email,
            admin_mobile,
        })
    }

    /// The address to bind the listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read a required environment variable, rejecting empty values.
fn require(var: &str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var.to_string())),
    }
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins("https://app.example.com, https://admin.example.com");
        assert_eq!(
            origins,
            vec![
                "https://app.example.com".to_string(),
                "https://admin.example.com".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_origins_drops_empty_entries() {
        assert_eq!(parse_origins("*,,"), vec!["*".to_string()]);
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_bind_address_joins_host_and_port() {
        let config = Config {
            database_url: String::new(),
            jwt_private_key: String::new(),
            jwt_public_key: String::new(),
            jwt_issuer: "domus".to_string(),
            jwt_audience: "domus-api".to_string(),
            rust_log: DEFAULT_RUST_LOG.to_string(),
            cors_origins: vec!["*".to_string()],
            host: "127.0.0.1".to_string(),
            port: 9000,
            admin_name: String::new(),
            admin_email: String::new(),
            admin_mobile: String::new(),
        };

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }
}
