//! Roleboard Server
//!
//! Serves the role postings API:
//! - Roles: POST/GET /roles, GET /roles/{id}, PUT /roles/{id}/approve
//! - Status: GET /status
//! - Probes: GET /healthz, /health, /health/live, /health/ready
//! - Docs: /swagger-ui, /openapi.json
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ROLEBOARD_CONFIG` | - | Path to a TOML config file |
//! | `ROLEBOARD_HTTP_HOST` | `0.0.0.0` | Bind host |
//! | `ROLEBOARD_HTTP_PORT` | `8080` | HTTP API port |
//! | `ROLEBOARD_ROLE_EXPIRATION_MONTHS` | `3` | Months until a role expires |
//! | `ROLEBOARD_FEATURE_*` | see rp-config | Feature flag toggles |
//! | `RUST_LOG` | `info` | Log level |
//! | `LOG_FORMAT` | `text` | `json` for JSON logs |

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;

use rp_config::AppConfig;
use rp_platform::feature::names;
use rp_platform::{build_app, AppServices, FeatureFlags, HealthState};

#[tokio::main]
async fn main() -> Result<()> {
    rp_common::logging::init_logging("rp-server");

    info!("Starting Roleboard Server");

    let config = AppConfig::load().context("failed to load configuration")?;
    let services = AppServices::from_config(&config)?;

    info!(
        expiration_months = services.store.expiration().months(),
        rate_limit_enabled = config.rate_limit.enabled,
        "Role store initialized"
    );
    for flag in names::ALL.iter().copied() {
        info!(flag, enabled = services.flags.is_enabled(flag), "Feature flag");
    }

    let health = HealthState::new(
        Some(services.store.clone()),
        Some(env!("CARGO_PKG_VERSION").to_string()),
    );
    let app = build_app(&config, &services, health.clone());

    let addr = config.http.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("API server listening on http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    health.set_ready();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Roleboard Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received...");
}
