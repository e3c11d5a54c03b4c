//! Application state shared across the routers.
//!
//! Built once at startup from the loaded [`Config`] and the registry pool;
//! the routers clone what they need out of it. Everything inside is
//! reference-counted, so cloning is cheap.

use std::sync::Arc;

use sqlx::PgPool;

use domus_api_auth::{
    AuthApiState, JwtVerifier, LoggingOtpSender, OtpService, TokenConfig, TokenService,
};
use domus_api_tenants::TenantAdminState;
use domus_db::TenantPools;
use domus_tenant::{PgTenantGate, TenantGate};

use crate::config::Config;

/// Shared resources the router composition draws from.
#[derive(Clone)]
pub struct AppState {
    /// Bearer token verifier for the authentication middleware.
    pub verifier: JwtVerifier,

    /// Liveness gate for the tenant resolution stage.
    pub tenant_gate: Arc<dyn TenantGate>,

    /// State for the authentication routers.
    pub auth: AuthApiState,

    /// State for the tenant administration router.
    pub admin: TenantAdminState,
}

impl AppState {
    /// Wire up services over the registry pool.
    #[must_use]
    pub fn new(config: &Config, db: PgPool) -> Self {
        let tenant_pools = TenantPools::new(db.clone(), config.database_url.clone());

        let token_service = TokenService::new(
            TokenConfig {
                private_key: config.jwt_private_key.as_bytes().to_vec(),
                issuer: config.jwt_issuer.clone(),
                audience: config.jwt_audience.clone(),
            },
            db.clone(),
            tenant_pools.clone(),
        );
        let otp_service = OtpService::new(db.clone(), Arc::new(LoggingOtpSender));

        let verifier = JwtVerifier::new(
            config.jwt_public_key.as_bytes().to_vec(),
            config.jwt_issuer.clone(),
            config.jwt_audience.clone(),
        );

        let tenant_gate: Arc<dyn TenantGate> = Arc::new(PgTenantGate::new(db.clone()));

        let auth = AuthApiState::new(db.clone(), token_service, otp_service);
        let admin = TenantAdminState::new(db, tenant_pools);

        Self {
            verifier,
            tenant_gate,
            auth,
            admin,
        }
    }
}
