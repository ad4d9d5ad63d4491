//! Single-coin detail view with a selectable price-history range.
//!
//! The view re-fetches whenever `(coin_id, range)` changes. Each fetch carries
//! a [`Ticket`]; a response finishing after a newer request was issued is
//! dropped, so a slow earlier range can never replace a later one.

use common::{
    format::format_price,
    models::{CoinDetails, PriceSeries, TimeRange},
    Result,
};
use connectors::MarketDataSource;
use futures::future::try_join;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::{
    chart::LineChart,
    controls::{range_buttons, RangeButton},
    fetch::{FetchTracker, Ticket, ViewStatus},
};

/// Parameters of one in-flight detail fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub ticket: Ticket,
    pub coin_id: String,
    pub range: TimeRange,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailContent {
    pub name: String,
    pub image_url: String,
    pub current_price: String,
    pub description: String,
    pub chart_title: String,
    pub price_chart: LineChart,
    pub performance_chart: LineChart,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailViewModel {
    pub coin_id: String,
    pub status: ViewStatus,
    pub range_buttons: Vec<RangeButton>,
    /// Present only when both details and history have loaded
    pub content: Option<DetailContent>,
}

#[derive(Debug)]
pub struct DetailView {
    coin_id: String,
    selected_range: TimeRange,
    details: Option<CoinDetails>,
    series: Option<PriceSeries>,
    status: ViewStatus,
    tracker: FetchTracker,
}

impl DetailView {
    pub fn new(coin_id: impl Into<String>) -> Self {
        Self {
            coin_id: coin_id.into(),
            selected_range: TimeRange::default(),
            details: None,
            series: None,
            status: ViewStatus::Loading,
            tracker: FetchTracker::new(),
        }
    }

    pub fn coin_id(&self) -> &str {
        &self.coin_id
    }

    pub fn selected_range(&self) -> TimeRange {
        self.selected_range
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn details(&self) -> Option<&CoinDetails> {
        self.details.as_ref()
    }

    pub fn series(&self) -> Option<&PriceSeries> {
        self.series.as_ref()
    }

    /// Issues a request for the current `(coin_id, range)`, or `None` while
    /// one for the same parameters is already in flight.
    pub fn begin_load(&mut self) -> Option<DetailRequest> {
        if self.tracker.in_flight() {
            debug!(
                "Load of {} ({}) already in flight",
                self.coin_id, self.selected_range
            );
            return None;
        }
        Some(self.issue())
    }

    /// Supersedes whatever is in flight with a request for the current
    /// `(coin_id, range)`.
    fn issue(&mut self) -> DetailRequest {
        self.status = ViewStatus::Loading;
        let ticket = self.tracker.issue();
        debug!(
            "Loading {} ({}) as version {}",
            self.coin_id,
            self.selected_range,
            ticket.version()
        );
        DetailRequest {
            ticket,
            coin_id: self.coin_id.clone(),
            range: self.selected_range,
        }
    }

    /// Switches the history range; `None` when `range` is already selected.
    pub fn select_range(&mut self, range: TimeRange) -> Option<DetailRequest> {
        if range == self.selected_range {
            return None;
        }
        self.selected_range = range;
        Some(self.issue())
    }

    /// Points the view at another coin, keeping the selected range. Opening
    /// the coin already shown behaves like [`DetailView::begin_load`].
    pub fn open(&mut self, coin_id: impl Into<String>) -> Option<DetailRequest> {
        let coin_id = coin_id.into();
        if coin_id == self.coin_id {
            return self.begin_load();
        }
        self.coin_id = coin_id;
        self.details = None;
        self.series = None;
        Some(self.issue())
    }

    /// Fetches details and history concurrently; either failing fails both.
    pub async fn fetch(
        source: &dyn MarketDataSource,
        request: &DetailRequest,
    ) -> Result<(CoinDetails, PriceSeries)> {
        try_join(
            source.get_coin_details(&request.coin_id),
            source.get_price_history(&request.coin_id, request.range),
        )
        .await
    }

    /// Applies a finished fetch. Returns `false` if it was superseded or was
    /// issued for a different `(coin_id, range)` than the one now selected.
    pub fn complete(
        &mut self,
        request: &DetailRequest,
        result: Result<(CoinDetails, PriceSeries)>,
    ) -> bool {
        let for_this_view =
            request.coin_id == self.coin_id && request.range == self.selected_range;
        if !for_this_view || !self.tracker.settle(request.ticket) {
            warn!(
                "Ignoring stale detail response for {} ({}), version {}",
                request.coin_id,
                request.range,
                request.ticket.version()
            );
            return false;
        }

        match result {
            Ok((details, series)) => {
                debug!(
                    "Loaded {} with {} price points",
                    request.coin_id,
                    series.points.len()
                );
                self.details = Some(details);
                self.series = Some(series);
                self.status = ViewStatus::Ready;
            }
            Err(e) => {
                error!("Failed to load {}: {}", request.coin_id, e);
                self.status = ViewStatus::Failed(e.user_message());
            }
        }
        true
    }

    /// Loads the current `(coin_id, range)` and applies the result. Returns
    /// `false` without fetching while a load is already in flight.
    pub async fn load(&mut self, source: &dyn MarketDataSource) -> bool {
        let Some(request) = self.begin_load() else {
            return false;
        };
        let result = Self::fetch(source, &request).await;
        self.complete(&request, result)
    }

    pub fn render(&self) -> DetailViewModel {
        let content = match (&self.status, &self.details, &self.series) {
            (ViewStatus::Ready, Some(details), Some(series)) => {
                Some(self.content(details, series))
            }
            _ => None,
        };

        DetailViewModel {
            coin_id: self.coin_id.clone(),
            status: self.status.clone(),
            range_buttons: range_buttons(self.selected_range),
            content,
        }
    }

    fn content(&self, details: &CoinDetails, series: &PriceSeries) -> DetailContent {
        let market = &details.market_data;
        DetailContent {
            name: details.name.clone(),
            image_url: details.image.large.clone(),
            current_price: format_price(market.current_price),
            description: details.description.clone(),
            chart_title: format!("{} Price Chart", series.range.label().to_uppercase()),
            price_chart: LineChart::price(series),
            performance_chart: LineChart::performance(market),
            metrics: vec![
                Metric {
                    label: "Today's Low",
                    value: format_price(market.low_24h),
                },
                Metric {
                    label: "Today's High",
                    value: format_price(market.high_24h),
                },
                Metric {
                    label: "52W Low",
                    value: format_price(market.low_52w),
                },
                Metric {
                    label: "52W High",
                    value: format_price(market.high_52w),
                },
            ],
        }
    }
}
