use serde::{Deserialize, Serialize};

/// One market snapshot for a single coin, as listed by `/coins/markets`.
///
/// The numeric fields are optional: the upstream API sends `null` for coins
/// it has no data for, and formatting treats absence per field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinRecord {
    /// Unique identifier for the coin (e.g., "bitcoin", "ethereum")
    pub id: String,
    /// Ticker symbol as sent by the API (e.g., "btc")
    pub symbol: String,
    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

/// Coin image URLs in the three sizes the API provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoinImage {
    pub thumb: String,
    pub small: String,
    pub large: String,
}

/// USD price levels shown on the detail view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketSnapshot {
    pub current_price: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub high_52w: Option<f64>,
    pub low_52w: Option<f64>,
}

/// Descriptive metadata for a single coin, from `/coins/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinDetails {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: CoinImage,
    /// English description; may be empty
    pub description: String,
    pub market_data: MarketSnapshot,
}

/// Entry of the `/search/trending` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: String,
    pub small: String,
    /// Price denominated in BTC
    pub price_btc: f64,
    pub price_change_percentage_24h: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_record_accepts_null_and_missing_numbers() {
        let json = r#"{
            "id": "tether",
            "symbol": "usdt",
            "name": "Tether",
            "current_price": 1.0,
            "market_cap": null,
            "total_volume": 5000000
        }"#;
        let record: CoinRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "tether");
        assert_eq!(record.current_price, Some(1.0));
        assert_eq!(record.market_cap, None);
        assert_eq!(record.total_volume, Some(5_000_000.0));
        assert_eq!(record.price_change_percentage_24h, None);
    }

    #[test]
    fn coin_record_ignores_unknown_fields() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://example.invalid/btc.png",
            "market_cap_rank": 1,
            "current_price": 64000.5,
            "market_cap": 1260000000000,
            "total_volume": 31000000000,
            "price_change_percentage_24h": -1.25
        }"#;
        let record: CoinRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.price_change_percentage_24h, Some(-1.25));
    }
}
