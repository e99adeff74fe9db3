use anyhow::Result;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

use healthgate::api::ApiServer;
use healthgate::config::AppConfig;
use healthgate::init::{cancel_on_signal, setup_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let started_at = Instant::now();

    let config = AppConfig::load()?;
    setup_logging(&config.logging.level);

    info!("Starting healthgate server");
    info!("Configuration loaded successfully: {:?}", config);

    let shutdown = CancellationToken::new();
    cancel_on_signal(shutdown.clone());

    ApiServer::new(config, started_at).start(shutdown).await
}
