//! Amenity Cache - nearby-amenity lookup server
//!
//! Serves cached amenity lookups for property listings over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use amenity_cache::api::create_router;
use amenity_cache::listings::ListingDirectory;
use amenity_cache::places::MockPlaces;
use amenity_cache::{spawn_sweep_task, AmenityCache, AppState, Config};

/// Main entry point for the amenity server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the amenity cache, connecting to Redis if enabled
/// 4. Start the background local sweep task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amenity_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting amenity server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: amenity_ttl={}s, sweep_interval={}s, port={}, redis_enabled={}",
        config.amenity_ttl, config.sweep_interval, config.server_port, config.redis.enabled
    );

    let cache = Arc::new(AmenityCache::connect(&config).await);
    let stats = cache.stats().await;
    info!(
        "Amenity cache initialized (remote tier available: {})",
        stats.remote_available
    );

    let sweep_handle = spawn_sweep_task(cache.clone(), config.sweep_interval);

    let state = AppState::from_parts(
        &config,
        cache,
        Arc::new(MockPlaces::new()),
        Arc::new(ListingDirectory::seeded()),
    );
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    sweep_handle.abort();
    warn!("Sweep task aborted");
}
