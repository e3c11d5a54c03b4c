//! domus API server.
//!
//! Multi-tenant property-management backend: OTP authentication, two-stage
//! tokens, tenant resolution, permission gates, and tenant provisioning.

mod config;
mod logging;
mod openapi;
mod router;
mod state;

use std::net::SocketAddr;

use tokio::signal;
use tracing::info;

use domus_db::{run_registry_migrations, seed_platform_admin, DbPool};

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Load configuration (fail-fast on missing required values).
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting domus API"
    );

    let pool = match DbPool::connect(&config.database_url).await {
        Ok(pool) => {
            info!("Registry database connection established");
            pool
        }
        Err(e) => {
            eprintln!("Failed to connect to registry database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_registry_migrations(&pool).await {
        eprintln!("FATAL: Registry migrations failed: {e}");
        std::process::exit(1);
    }

    // Seed the platform administrator before accepting requests; every
    // tenant-administration route is gated on the role this grants.
    match seed_platform_admin(
        pool.inner(),
        &config.admin_name,
        &config.admin_email,
        &config.admin_mobile,
    )
    .await
    {
        Ok(report) => {
            info!(
                admin_user_id = %report.admin_user_id,
                user_created = report.user_created,
                role_granted = report.role_granted,
                "Platform administrator bootstrap completed"
            );
        }
        Err(e) => {
            eprintln!("FATAL: Platform administrator bootstrap failed: {e}");
            std::process::exit(1);
        }
    }

    let state = AppState::new(&config, pool.inner().clone());
    let app = router::build_app(&state, &config.cors_origins);

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(address = %addr, "domus API listening");

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Graceful shutdown on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
