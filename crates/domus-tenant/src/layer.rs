//! Tower Layer for the tenant resolution stage.

use std::sync::Arc;

use tower::Layer;

use crate::config::TenantConfig;
use crate::gate::TenantGate;
use crate::service::TenantResolutionService;

/// Tower Layer that adds tenant resolution to a service stack.
///
/// Wraps services to extract the requested tenant, verify it is live
/// against the registry, and insert the [`TenantContext`] extension.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use domus_tenant::{PgTenantGate, TenantResolutionLayer};
///
/// let gate = Arc::new(PgTenantGate::new(registry_pool.clone()));
/// let app = Router::new()
///     .route("/api/units", get(list_units))
///     .layer(TenantResolutionLayer::new(gate));
/// ```
///
/// [`TenantContext`]: crate::extract::TenantContext
#[derive(Clone)]
pub struct TenantResolutionLayer {
    config: Arc<TenantConfig>,
    gate: Arc<dyn TenantGate>,
}

impl TenantResolutionLayer {
    /// Create a layer with default configuration.
    #[must_use]
    pub fn new(gate: Arc<dyn TenantGate>) -> Self {
        Self::with_config(TenantConfig::default(), gate)
    }

    /// Create a layer with custom configuration.
    #[must_use]
    pub fn with_config(config: TenantConfig, gate: Arc<dyn TenantGate>) -> Self {
        Self {
            config: Arc::new(config),
            gate,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &TenantConfig {
        &self.config
    }
}

impl<S> Layer<S> for TenantResolutionLayer {
    type Service = TenantResolutionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TenantResolutionService::new(inner, Arc::clone(&self.config), Arc::clone(&self.gate))
    }
}
