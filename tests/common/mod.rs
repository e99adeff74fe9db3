#![allow(dead_code, unused_imports)]

mod request;

pub use request::*;

use axum::Router;
use healthgate::api::{ApiServer, router};
use healthgate::config::AppConfig;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub const ALLOWED_ORIGIN: &str = "https://dashboard.example.com";

/// Configuration used by every test: production label, one allowed origin
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.health.environment = "production".to_string();
    config.cors.allowed_origin = ALLOWED_ORIGIN.to_string();
    config
}

pub fn test_router() -> Router {
    router(&test_config(), Instant::now()).unwrap()
}

/// A running server bound to an ephemeral port
pub struct TestServer {
    pub base_url: String,
    pub shutdown: CancellationToken,
    pub handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let shutdown = CancellationToken::new();

        let server = ApiServer::new(test_config(), Instant::now());
        let token = shutdown.clone();
        let handle = tokio::spawn(async move { server.serve(listener, token).await });

        Self {
            base_url,
            shutdown,
            handle,
        }
    }

    pub async fn stop(self) {
        self.shutdown.cancel();
        self.handle.await.unwrap().unwrap();
    }
}

/// Address of a port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
