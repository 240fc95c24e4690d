//! Car Insurance API Server Binary
//!
//! Starts the HTTP API and the policy expiration scanner.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin car-insurance-api
//!
//! # Run with environment variables
//! API_PORT=8080 API_DATABASE_URL=postgres://... cargo run --bin car-insurance-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_MIN_CONNECTIONS` - Connections kept open (default: 2)
//! * `API_ACQUIRE_TIMEOUT_SECS` - Wait for a free connection (default: 30)
//! * `API_IDLE_TIMEOUT_SECS` - Idle connection lifetime (default: 600)
//! * `API_MAX_LIFETIME_SECS` - Connection lifetime (default: 1800)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_TIMEZONE` - IANA zone used for "today" (default: UTC)
//! * `API_SCANNER__ENABLED` - Run the expiration scanner (default: true)
//! * `API_SCANNER__INTERVAL_SECS` - Seconds between scans (default: 1800)
//! * `API_SCANNER__ERROR_BACKOFF_SECS` - Seconds to wait after a failed scan (default: 300)
//! * `API_SCANNER__LOOKBACK_SECS` - Expiration lookback (default: 3600)
//! * `API_SCANNER__DEDUP_CAPACITY` - Notified-policy memory (default: 1000)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_policy::ExpirationScanner;
use infra_db::{
    create_pool, PostgresClaimAdapter, PostgresPolicyAdapter, PostgresVehicleAdapter,
};
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::{create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, establishes the database
/// connection, starts the expiration scanner and serves HTTP until a
/// shutdown signal arrives.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Car Insurance API Server"
    );

    let timezone = config.timezone()?;
    let scanner_config = config.scanner_config()?;

    let pool = create_pool(&config.database_config()).await?;

    let vehicles = Arc::new(PostgresVehicleAdapter::new(pool.clone()));
    let policies = Arc::new(PostgresPolicyAdapter::new(pool.clone()));
    let claims = Arc::new(PostgresClaimAdapter::new(pool));

    let cancel = CancellationToken::new();
    let scanner = if config.scanner.enabled {
        Some(ExpirationScanner::new(policies.clone(), scanner_config).spawn(cancel.clone()))
    } else {
        tracing::info!("Expiration scanner disabled");
        None
    };

    let app = create_router(AppState::new(vehicles, policies, claims, timezone));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel.cancel();
    if let Some(handle) = scanner {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Expiration scanner task failed");
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
