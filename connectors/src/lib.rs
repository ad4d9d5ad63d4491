pub mod coingecko;
pub mod config;

pub use config::ConnectorConfig;

use async_trait::async_trait;
use common::{
    models::{CoinDetails, CoinRecord, PriceSeries, TimeRange, TrendingCoin},
    Result,
};

/// Trait defining the interface for market-data API clients
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// List market snapshots for all coins, ordered as the API ranks them
    async fn list_markets(&self) -> Result<Vec<CoinRecord>>;

    /// Get descriptive metadata and price levels for a coin
    async fn get_coin_details(&self, coin_id: &str) -> Result<CoinDetails>;

    /// Get the price history for a coin over a time range
    async fn get_price_history(&self, coin_id: &str, range: TimeRange) -> Result<PriceSeries>;

    /// List currently trending coins
    async fn list_trending(&self) -> Result<Vec<TrendingCoin>>;
}
