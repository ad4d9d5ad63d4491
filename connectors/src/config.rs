use common::{Error, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_VS_CURRENCY: &str = "usd";

/// Configuration for the market-data connector
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Optional key sent as `x-cg-pro-api-key`
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Quote currency for market listings and charts
    pub vs_currency: String,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
        }
    }
}

impl ConnectorConfig {
    /// Create a new connector configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("COINGECKO_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_key = lookup("COINGECKO_API_KEY").filter(|key| !key.is_empty());
        let timeout = match lookup("COINGECKO_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    Error::ConfigError(format!(
                        "COINGECKO_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        let vs_currency = lookup("COINDASH_VS_CURRENCY")
            .map(|c| c.to_lowercase())
            .unwrap_or_else(|| DEFAULT_VS_CURRENCY.to_string());

        Ok(Self {
            base_url,
            api_key,
            timeout,
            vs_currency,
        })
    }
}
