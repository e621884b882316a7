//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, state wiring, and Axum server lifecycle.

use crate::application::services::RetryPolicy;
use crate::config::Config;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::store::{InMemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - URL store (Redis, or in-memory when Redis is not configured)
/// - Shortener service and shared state
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Redis is configured but unreachable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;

    let retry = RetryPolicy {
        max_salted_attempts: config.max_salted_attempts,
        base_delay: config.retry_base_delay(),
        ..RetryPolicy::default()
    };

    let state = AppState::new(store, retry, &config.base_url);

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the store backend selected by the configuration.
///
/// # Errors
///
/// Returns an error if a Redis URL is configured and the connection fails.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn UrlStore>> {
    match &config.redis_url {
        Some(redis_url) => {
            let store = RedisStore::connect(redis_url, &config.key_prefix, config.store_timeout())
                .await
                .context("Failed to connect to Redis store")?;
            tracing::info!("Store enabled (Redis)");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("Redis not configured; using in-memory store (mappings are lost on restart)");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
