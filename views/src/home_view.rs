//! Landing view: a comparison chart of featured coins plus trending cards.

use common::{
    format::{format_btc_price, format_percentage},
    models::{PriceSeries, TimeRange, TrendingCoin},
    Result,
};
use connectors::MarketDataSource;
use futures::future::{try_join_all, OptionFuture};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::{
    chart::LineChart,
    controls::{range_buttons, RangeButton},
    fetch::{FetchTracker, Ticket, ViewStatus},
    table::Trend,
};

pub const HOME_TITLE: &str = "Global Cryptocurrency Market Data";
pub const FEATURED_COINS: [&str; 3] = ["bitcoin", "ethereum", "solana"];
pub const NO_TRENDING_MESSAGE: &str = "No trending coins available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRequest {
    pub ticket: Ticket,
    pub range: TimeRange,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TrendingCard {
    pub key: String,
    pub title: String,
    pub image_url: String,
    pub price_btc: String,
    pub change_24h: String,
    pub trend: Trend,
}

impl TrendingCard {
    pub fn from_coin(coin: &TrendingCoin) -> Self {
        Self {
            key: coin.id.clone(),
            title: format!("{} ({})", coin.name, coin.symbol.to_uppercase()),
            image_url: coin.small.clone(),
            price_btc: format!("Price (BTC): {}", format_btc_price(coin.price_btc)),
            change_24h: format!(
                "24h Change: {}",
                format_percentage(coin.price_change_percentage_24h)
            ),
            trend: Trend::from_change(coin.price_change_percentage_24h),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HomeViewModel {
    pub title: &'static str,
    pub range_buttons: Vec<RangeButton>,
    pub chart_status: ViewStatus,
    pub chart: Option<LineChart>,
    pub trending_status: ViewStatus,
    pub trending: Vec<TrendingCard>,
    /// Shown when trending loaded but came back empty
    pub trending_empty_message: Option<&'static str>,
}

#[derive(Debug)]
pub struct HomeView {
    range: TimeRange,
    series: Vec<PriceSeries>,
    chart_status: ViewStatus,
    chart_tracker: FetchTracker,
    trending: Vec<TrendingCoin>,
    trending_status: ViewStatus,
    trending_tracker: FetchTracker,
}

impl Default for HomeView {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeView {
    pub fn new() -> Self {
        Self {
            range: TimeRange::SevenDays,
            series: Vec::new(),
            chart_status: ViewStatus::Loading,
            chart_tracker: FetchTracker::new(),
            trending: Vec::new(),
            trending_status: ViewStatus::Loading,
            trending_tracker: FetchTracker::new(),
        }
    }

    pub fn selected_range(&self) -> TimeRange {
        self.range
    }

    /// Starts a chart fetch for the selected range, or `None` while one is
    /// already in flight.
    pub fn begin_chart_load(&mut self) -> Option<ChartRequest> {
        if self.chart_tracker.in_flight() {
            debug!("Comparison chart ({}) already in flight", self.range);
            return None;
        }
        Some(self.issue_chart())
    }

    /// Supersedes any chart fetch in flight.
    fn issue_chart(&mut self) -> ChartRequest {
        self.chart_status = ViewStatus::Loading;
        ChartRequest {
            ticket: self.chart_tracker.issue(),
            range: self.range,
        }
    }

    pub fn select_range(&mut self, range: TimeRange) -> Option<ChartRequest> {
        if range == self.range {
            return None;
        }
        self.range = range;
        Some(self.issue_chart())
    }

    /// Histories for every featured coin; one failure fails the chart.
    pub async fn fetch_chart(
        source: &dyn MarketDataSource,
        request: &ChartRequest,
    ) -> Result<Vec<PriceSeries>> {
        try_join_all(
            FEATURED_COINS
                .iter()
                .map(|coin_id| source.get_price_history(coin_id, request.range)),
        )
        .await
    }

    pub fn complete_chart(
        &mut self,
        request: &ChartRequest,
        result: Result<Vec<PriceSeries>>,
    ) -> bool {
        if !self.chart_tracker.settle(request.ticket) {
            warn!(
                "Ignoring stale comparison chart ({}), version {}",
                request.range,
                request.ticket.version()
            );
            return false;
        }
        match result {
            Ok(series) => {
                debug!("Comparison chart loaded for {} coins", series.len());
                self.series = series;
                self.chart_status = ViewStatus::Ready;
            }
            Err(e) => {
                error!("Failed to load comparison chart: {}", e);
                self.chart_status = ViewStatus::Failed(e.user_message());
            }
        }
        true
    }

    /// Starts a trending fetch, or `None` while one is in flight.
    pub fn begin_trending_load(&mut self) -> Option<Ticket> {
        if self.trending_tracker.in_flight() {
            return None;
        }
        self.trending_status = ViewStatus::Loading;
        Some(self.trending_tracker.issue())
    }

    pub async fn fetch_trending(source: &dyn MarketDataSource) -> Result<Vec<TrendingCoin>> {
        source.list_trending().await
    }

    pub fn complete_trending(&mut self, ticket: Ticket, result: Result<Vec<TrendingCoin>>) -> bool {
        if !self.trending_tracker.settle(ticket) {
            warn!("Ignoring stale trending list, version {}", ticket.version());
            return false;
        }
        match result {
            Ok(coins) => {
                self.trending = coins;
                self.trending_status = ViewStatus::Ready;
            }
            Err(e) => {
                error!("Failed to load trending coins: {}", e);
                self.trending_status = ViewStatus::Failed(e.user_message());
            }
        }
        true
    }

    /// Loads the chart and the trending list concurrently. A section whose
    /// fetch is already in flight is skipped.
    pub async fn load(&mut self, source: &dyn MarketDataSource) {
        let chart_request = self.begin_chart_load();
        let trending_ticket = self.begin_trending_load();

        let chart: OptionFuture<_> = chart_request
            .as_ref()
            .map(|request| Self::fetch_chart(source, request))
            .into();
        let trending: OptionFuture<_> = trending_ticket
            .map(|_| Self::fetch_trending(source))
            .into();
        let (chart, trending) = futures::join!(chart, trending);

        if let (Some(request), Some(result)) = (chart_request, chart) {
            self.complete_chart(&request, result);
        }
        if let (Some(ticket), Some(result)) = (trending_ticket, trending) {
            self.complete_trending(ticket, result);
        }
    }

    pub fn render(&self) -> HomeViewModel {
        let chart = self
            .chart_status
            .is_ready()
            .then(|| LineChart::comparison(&self.series));

        let trending_ready = self.trending_status.is_ready();
        let trending = if trending_ready {
            self.trending.iter().map(TrendingCard::from_coin).collect()
        } else {
            Vec::new()
        };
        let trending_empty_message =
            (trending_ready && self.trending.is_empty()).then_some(NO_TRENDING_MESSAGE);

        HomeViewModel {
            title: HOME_TITLE,
            range_buttons: range_buttons(self.range),
            chart_status: self.chart_status.clone(),
            chart,
            trending_status: self.trending_status.clone(),
            trending,
            trending_empty_message,
        }
    }
}
