use crate::{ConnectorConfig, MarketDataSource};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use common::{
    models::{
        CoinDetails, CoinImage, CoinRecord, MarketSnapshot, PricePoint, PriceSeries, TimeRange,
        TrendingCoin,
    },
    Error, Result,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Url,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::collections::HashMap;
use tracing::{debug, error, warn};

const API_KEY_HEADER: &str = "x-cg-pro-api-key";

pub struct CoinGeckoConnector {
    client: reqwest::Client,
    base_url: Url,
    vs_currency: String,
}

impl CoinGeckoConnector {
    pub fn new(config: &ConnectorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| {
                Error::ConfigError("COINGECKO_API_KEY contains invalid characters".to_string())
            })?;
            headers.insert(API_KEY_HEADER, value);
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::ConfigError(format!("Invalid COINGECKO_API_URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "COINGECKO_API_URL cannot be used as a base: {}",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            vs_currency: config.vs_currency.clone(),
        })
    }

    /// Appends `segments` to the base URL, percent-encoding each one so an id
    /// can never add path levels or a query.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        debug!("Fetching from CoinGecko: {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::HttpError)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("CoinGecko API error: {} - {}", status, error_text);
            return Err(Error::StatusError {
                status: status.as_u16(),
                body: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::ParseError(format!("Failed to parse CoinGecko response: {}", e)))
    }
}

// Price levels keyed by quote currency; the API sends null for unknown levels.
type Quotes = Option<HashMap<String, Option<f64>>>;

#[derive(Debug, Default, Deserialize)]
struct MarketDataWire {
    #[serde(default)]
    current_price: Quotes,
    #[serde(default)]
    high_24h: Quotes,
    #[serde(default)]
    low_24h: Quotes,
    #[serde(default)]
    high_52w: Quotes,
    #[serde(default)]
    low_52w: Quotes,
}

#[derive(Debug, Default, Deserialize)]
struct DescriptionWire {
    #[serde(default)]
    en: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoinDetailsWire {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<CoinImage>,
    #[serde(default)]
    description: Option<DescriptionWire>,
    #[serde(default)]
    market_data: Option<MarketDataWire>,
}

#[derive(Debug, Deserialize)]
struct MarketChartWire {
    #[serde(default)]
    prices: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct TrendingDataWire {
    #[serde(default)]
    price_change_percentage_24h: Quotes,
}

#[derive(Debug, Deserialize)]
struct TrendingItemWire {
    id: String,
    name: String,
    symbol: String,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default)]
    thumb: String,
    #[serde(default)]
    small: String,
    #[serde(default)]
    price_btc: Option<f64>,
    #[serde(default)]
    data: Option<TrendingDataWire>,
}

#[derive(Debug, Deserialize)]
struct TrendingEntryWire {
    item: TrendingItemWire,
}

#[derive(Debug, Deserialize)]
struct TrendingWire {
    #[serde(default)]
    coins: Vec<TrendingEntryWire>,
}

fn quote(quotes: &Quotes, vs_currency: &str) -> Option<f64> {
    quotes.as_ref()?.get(vs_currency).copied().flatten()
}

fn convert_details(wire: CoinDetailsWire, vs_currency: &str) -> CoinDetails {
    let market = wire.market_data.unwrap_or_default();
    CoinDetails {
        id: wire.id,
        symbol: wire.symbol,
        name: wire.name,
        image: wire.image.unwrap_or_default(),
        description: wire.description.and_then(|d| d.en).unwrap_or_default(),
        market_data: MarketSnapshot {
            current_price: quote(&market.current_price, vs_currency),
            high_24h: quote(&market.high_24h, vs_currency),
            low_24h: quote(&market.low_24h, vs_currency),
            high_52w: quote(&market.high_52w, vs_currency),
            low_52w: quote(&market.low_52w, vs_currency),
        },
    }
}

// The API returns an array of pairs: [timestamp_ms, price]
fn convert_market_chart(coin_id: &str, range: TimeRange, wire: MarketChartWire) -> PriceSeries {
    let mut points = Vec::with_capacity(wire.prices.len());
    let mut skipped = 0usize;

    for pair in wire.prices {
        if pair.len() < 2 {
            skipped += 1;
            continue;
        }

        let millis = match pair[0].as_i64().or_else(|| pair[0].as_f64().map(|ms| ms as i64)) {
            Some(ms) => ms,
            None => {
                skipped += 1;
                continue;
            }
        };

        let timestamp = match Utc.timestamp_millis_opt(millis).single() {
            Some(ts) => ts,
            None => {
                skipped += 1;
                continue;
            }
        };

        let price = match pair[1].as_f64() {
            Some(price) if price.is_finite() => price,
            _ => {
                skipped += 1;
                continue;
            }
        };

        points.push(PricePoint { timestamp, price });
    }

    if skipped > 0 {
        warn!("Skipped {} malformed price points for {}", skipped, coin_id);
    }

    PriceSeries {
        coin_id: coin_id.to_string(),
        range,
        points,
    }
}

fn convert_trending(wire: TrendingWire) -> Vec<TrendingCoin> {
    wire.coins
        .into_iter()
        .map(|entry| {
            let item = entry.item;
            let change = item
                .data
                .as_ref()
                .and_then(|data| quote(&data.price_change_percentage_24h, "usd"));
            TrendingCoin {
                id: item.id,
                name: item.name,
                symbol: item.symbol,
                market_cap_rank: item.market_cap_rank,
                thumb: item.thumb,
                small: item.small,
                price_btc: item.price_btc.unwrap_or_default(),
                price_change_percentage_24h: change,
            }
        })
        .collect()
}

/// Dot segments survive percent-encoding, so they are rejected outright.
fn check_coin_id(coin_id: &str) -> Result<()> {
    match coin_id.trim() {
        "" => Err(Error::NotFound("Coin id must not be empty".to_string())),
        "." | ".." => Err(Error::NotFound(format!("Invalid coin id: {}", coin_id))),
        _ => Ok(()),
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoConnector {
    async fn list_markets(&self) -> Result<Vec<CoinRecord>> {
        let url = self.endpoint(&["coins", "markets"]);
        let records: Vec<CoinRecord> = self
            .get_json(url, &[("vs_currency", self.vs_currency.clone())])
            .await?;
        debug!("Received {} market records", records.len());
        Ok(records)
    }

    async fn get_coin_details(&self, coin_id: &str) -> Result<CoinDetails> {
        check_coin_id(coin_id)?;
        let url = self.endpoint(&["coins", coin_id]);
        let wire: CoinDetailsWire = self.get_json(url, &[]).await?;
        Ok(convert_details(wire, &self.vs_currency))
    }

    async fn get_price_history(&self, coin_id: &str, range: TimeRange) -> Result<PriceSeries> {
        check_coin_id(coin_id)?;
        let url = self.endpoint(&["coins", coin_id, "market_chart"]);
        let wire: MarketChartWire = self
            .get_json(
                url,
                &[
                    ("vs_currency", self.vs_currency.clone()),
                    ("days", range.days().to_string()),
                ],
            )
            .await?;
        Ok(convert_market_chart(coin_id, range, wire))
    }

    async fn list_trending(&self) -> Result<Vec<TrendingCoin>> {
        let url = self.endpoint(&["search", "trending"]);
        let wire: TrendingWire = self.get_json(url, &[]).await?;
        Ok(convert_trending(wire))
    }
}
