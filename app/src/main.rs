mod command;
mod config;
mod dashboard;
mod render;

use config::AppConfig;
use connectors::{coingecko::CoinGeckoConnector, MarketDataSource};
use dashboard::Dashboard;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the rendered views
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting coindash");

    let config = AppConfig::from_env()
        .map_err(|e| format!("Failed to load configuration: {}", e))?;

    let connector = CoinGeckoConnector::new(&config.connector)
        .map_err(|e| format!("Failed to create CoinGecko connector: {}", e))?;
    let source: Arc<dyn MarketDataSource> = Arc::new(connector);

    info!(
        "Using {} with start view {:?}",
        config.connector.base_url, config.start_view
    );
    println!("Type 'help' for the list of commands");

    Dashboard::new(source, config.start_view)
        .run(BufReader::new(tokio::io::stdin()))
        .await?;

    info!("Shutting down");
    Ok(())
}
