//! Shared fixtures for the view integration tests.
//!
//! Provides `FakeSource`, an in-memory `MarketDataSource` whose listing can be
//! swapped between fetches, whose calls can fail with an HTTP status, and whose
//! history responses can be delayed per time range.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use common::{
    models::{
        CoinDetails, CoinImage, CoinRecord, MarketSnapshot, PricePoint, PriceSeries, TimeRange,
        TrendingCoin,
    },
    Error, Result,
};
use connectors::MarketDataSource;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeSource {
    markets: Mutex<Vec<CoinRecord>>,
    trending: Mutex<Vec<TrendingCoin>>,
    fail_status: Mutex<Option<u16>>,
    history_delays: Mutex<HashMap<TimeRange, Duration>>,
    market_calls: AtomicUsize,
    history_calls: AtomicUsize,
    trending_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_markets(count: usize) -> Self {
        let source = Self::default();
        source.set_markets(sample_records(count));
        source
    }

    pub fn set_markets(&self, records: Vec<CoinRecord>) {
        *self.markets.lock().unwrap() = records;
    }

    pub fn set_trending(&self, coins: Vec<TrendingCoin>) {
        *self.trending.lock().unwrap() = coins;
    }

    /// Every subsequent call fails with this HTTP status.
    pub fn fail_with(&self, status: Option<u16>) {
        *self.fail_status.lock().unwrap() = status;
    }

    pub fn delay_history(&self, range: TimeRange, delay: Duration) {
        self.history_delays.lock().unwrap().insert(range, delay);
    }

    pub fn market_calls(&self) -> usize {
        self.market_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn trending_calls(&self) -> usize {
        self.trending_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        match *self.fail_status.lock().unwrap() {
            Some(status) => Err(Error::StatusError {
                status,
                body: String::new(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MarketDataSource for FakeSource {
    async fn list_markets(&self) -> Result<Vec<CoinRecord>> {
        self.market_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.markets.lock().unwrap().clone())
    }

    async fn get_coin_details(&self, coin_id: &str) -> Result<CoinDetails> {
        self.check()?;
        Ok(sample_details(coin_id))
    }

    async fn get_price_history(&self, coin_id: &str, range: TimeRange) -> Result<PriceSeries> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.history_delays.lock().unwrap().get(&range).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check()?;
        Ok(sample_series(coin_id, range))
    }

    async fn list_trending(&self) -> Result<Vec<TrendingCoin>> {
        self.trending_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.trending.lock().unwrap().clone())
    }
}

pub fn sample_records(count: usize) -> Vec<CoinRecord> {
    (0..count)
        .map(|i| CoinRecord {
            id: format!("coin-{i}"),
            symbol: format!("c{i}"),
            name: format!("Coin {i}"),
            current_price: Some(1000.0 + i as f64),
            market_cap: Some(1_000_000.0 * (i + 1) as f64),
            total_volume: Some(50_000.0),
            price_change_percentage_24h: if i % 2 == 0 { Some(1.5) } else { None },
        })
        .collect()
}

pub fn sample_details(coin_id: &str) -> CoinDetails {
    CoinDetails {
        id: coin_id.to_string(),
        symbol: coin_id[..3.min(coin_id.len())].to_string(),
        name: coin_id.to_uppercase(),
        image: CoinImage {
            thumb: format!("{coin_id}-thumb.png"),
            small: format!("{coin_id}-small.png"),
            large: format!("{coin_id}-large.png"),
        },
        description: format!("About {coin_id}."),
        market_data: MarketSnapshot {
            current_price: Some(64000.0),
            high_24h: Some(65000.5),
            low_24h: Some(63000.0),
            high_52w: None,
            low_52w: None,
        },
    }
}

/// One point per day, one more point than the range has days.
pub fn sample_series(coin_id: &str, range: TimeRange) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let points = (0..=range.days())
        .map(|day| PricePoint {
            timestamp: start + ChronoDuration::days(day as i64),
            price: 100.0 + day as f64,
        })
        .collect();
    PriceSeries {
        coin_id: coin_id.to_string(),
        range,
        points,
    }
}

pub fn sample_trending() -> Vec<TrendingCoin> {
    vec![TrendingCoin {
        id: "pepe".to_string(),
        name: "Pepe".to_string(),
        symbol: "pepe".to_string(),
        market_cap_rank: Some(24),
        thumb: "pepe-thumb.png".to_string(),
        small: "pepe-small.png".to_string(),
        price_btc: 0.00000002,
        price_change_percentage_24h: Some(-4.2),
    }]
}
