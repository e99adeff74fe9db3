use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::HEALTH_PATH;
use crate::types::HealthReport;

/// Default base URL of the health service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Failure of a single health check, as shown to the user
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckError {
    /// No response: refused, unreachable, timed out or denied by network policy
    #[error("{0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("{0}")]
    Malformed(String),
}

/// Source of health reports for the dashboard
#[async_trait]
pub trait HealthClient: Send + Sync {
    async fn fetch_health(&self) -> Result<HealthReport, CheckError>;
}

#[async_trait]
impl<C: HealthClient> HealthClient for Arc<C> {
    async fn fetch_health(&self) -> Result<HealthReport, CheckError> {
        self.as_ref().fetch_health().await
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// `HealthClient` over HTTP
#[derive(Debug, Clone)]
pub struct HttpHealthClient {
    url: String,
    client: reqwest::Client,
}

impl HttpHealthClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            url: health_url(&config.base_url),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl HealthClient for HttpHealthClient {
    async fn fetch_health(&self) -> Result<HealthReport, CheckError> {
        debug!("GET {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            warn!("Health check transport failure: {}", e);
            CheckError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Health check returned status {}", status.as_u16());
            return Err(CheckError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CheckError::Transport(e.to_string()))?;

        HealthReport::from_json(&body).map_err(|e| {
            warn!("Malformed health report: {}", e);
            CheckError::Malformed(e.to_string())
        })
    }
}

/// Join the base URL and the fixed health path.
pub fn health_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), HEALTH_PATH)
}
