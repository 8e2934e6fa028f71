use anyhow::{Context, Result};
use federation_portal::config::Config;
use federation_portal::db::Database;
use federation_portal::server::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("federation_portal=info".parse()?),
        )
        .init();

    info!("Starting federation portal");

    let config = Config::from_env()?;
    if config.admin_api_key.is_none() {
        warn!("ADMIN_API_KEY not set, admin endpoints will reject all requests");
    }

    let db = Arc::new(Database::new(&config.database_url, config.database_max_connections).await?);
    let state = AppState::new(db, config.translation_cache_ttl(), config.admin_api_key.clone());

    // A cold cache is fine; requests rebuild it lazily.
    if let Err(e) = state.cache.warm_all().await {
        warn!("Failed to warm translation cache: {}", e);
    }

    let app = server::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!("✓ Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
