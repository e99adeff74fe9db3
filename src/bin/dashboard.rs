use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use healthgate::dashboard::{ClientConfig, DEFAULT_BASE_URL, Dashboard, HttpHealthClient, render};
use healthgate::init::setup_cli_logging;

/// Terminal dashboard for the healthgate backend
#[derive(Debug, Parser)]
#[command(name = "healthgate-dashboard", version, about)]
struct Args {
    /// Backend base URL; `/api/health` is appended
    #[arg(long, env = "HEALTHGATE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_cli_logging("warn");

    let client = HttpHealthClient::new(ClientConfig {
        base_url: args.base_url,
        timeout: Duration::from_secs(args.timeout),
    })?;
    info!("Dashboard targeting {}", client.url());

    let dashboard = Arc::new(Dashboard::new(client));

    let mut states = dashboard.subscribe();
    let printer = tokio::spawn(async move {
        println!("{}\n", render(&states.borrow_and_update()));
        while states.changed().await.is_ok() {
            let text = render(&states.borrow_and_update());
            println!("{}\n", text);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "q" | "quit" => break,
            "" | "c" | "check" => {
                let dashboard = Arc::clone(&dashboard);
                tokio::spawn(async move {
                    dashboard.check_health().await;
                });
            }
            other => println!("Unknown command '{}': press Enter to check, q to quit\n", other),
        }
    }

    printer.abort();
    Ok(())
}
