pub mod error;
pub mod health;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::{AppConfig, HealthConfig};
use error::ApiError;

/// Path of the health endpoint, relative to the server root
pub const HEALTH_PATH: &str = "/api/health";

/// API server for the health service
pub struct ApiServer {
    config: AppConfig,
    started_at: Instant,
}

impl ApiServer {
    pub fn new(config: AppConfig, started_at: Instant) -> Self {
        Self { config, started_at }
    }

    /// Bind the configured address and serve until `shutdown` is cancelled.
    pub async fn start(&self, shutdown: CancellationToken) -> Result<()> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", bind_addr))?;

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(&self, listener: TcpListener, shutdown: CancellationToken) -> Result<()> {
        let app = router(&self.config, self.started_at)?;

        info!(
            "Starting API server on {} (environment: {}, allowed origin: {})",
            listener.local_addr()?,
            self.config.health.environment,
            self.config.cors.allowed_origin
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

/// Build the application router with CORS and request tracing applied.
pub fn router(config: &AppConfig, started_at: Instant) -> Result<Router> {
    let origin = HeaderValue::from_str(&config.cors.allowed_origin)
        .with_context(|| format!("Invalid allowed origin: {}", config.cors.allowed_origin))?;

    // `list` only echoes the header back to a matching request origin
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::OPTIONS]);

    let state = AppState {
        started_at,
        health: Arc::new(config.health.clone()),
    };

    Ok(Router::new()
        .route(HEALTH_PATH, get(health::health_check))
        .fallback(handler_404)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

async fn handler_404() -> ApiError {
    ApiError::NotFound
}

/// Application state for handlers
#[derive(Clone)]
pub struct AppState {
    pub started_at: Instant,
    pub health: Arc<HealthConfig>,
}
