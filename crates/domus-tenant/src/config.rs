//! Configuration for the tenant resolution middleware.

/// Default header carrying the tenant identifier.
pub const DEFAULT_TENANT_HEADER: &str = "X-Tenant-ID";

/// Configuration for tenant resolution.
#[derive(Debug, Clone)]
pub struct TenantConfig {
    /// Header name carrying the tenant identifier.
    pub header_name: String,

    /// Whether a resolvable tenant is mandatory. When `false`, requests
    /// without any tenant identifier proceed with an empty context.
    pub require_tenant: bool,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            header_name: DEFAULT_TENANT_HEADER.to_string(),
            require_tenant: true,
        }
    }
}

impl TenantConfig {
    /// Create a builder for custom configuration.
    #[must_use]
    pub fn builder() -> TenantConfigBuilder {
        TenantConfigBuilder::default()
    }
}

/// Builder for [`TenantConfig`].
#[derive(Debug, Default)]
pub struct TenantConfigBuilder {
    header_name: Option<String>,
    require_tenant: Option<bool>,
}

impl TenantConfigBuilder {
    /// Set the header name to read the tenant identifier from.
    #[must_use]
    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = Some(name.into());
        self
    }

    /// Set whether a resolvable tenant is mandatory.
    #[must_use]
    pub fn require_tenant(mut self, required: bool) -> Self {
        self.require_tenant = Some(required);
        self
    }

    /// Build the configuration, applying defaults for unset fields.
    #[must_use]
    pub fn build(self) -> TenantConfig {
        let defaults = TenantConfig::default();
        TenantConfig {
            header_name: self.header_name.unwrap_or(defaults.header_name),
            require_tenant: self.require_tenant.unwrap_or(defaults.require_tenant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TenantConfig::default();
        assert_eq!(config.header_name, "X-Tenant-ID");
        assert!(config.require_tenant);
    }

    #[test]
    fn test_builder_overrides() {
        let config = TenantConfig::builder()
            .header_name("X-Org-ID")
            .require_tenant(false)
            .build();

        assert_eq!(config.header_name, "X-Org-ID");
        assert!(!config.require_tenant);
    }

    #[test]
    fn test_builder_defaults_unset_fields() {
        let config = TenantConfig::builder().require_tenant(false).build();
        assert_eq!(config.header_name, "X-Tenant-ID");
    }
}
