//! Paged market table view.

use common::{models::CoinRecord, Result};
use connectors::MarketDataSource;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, error, warn};

use crate::{
    controls::Pager,
    fetch::{FetchTracker, Ticket, ViewStatus},
    paginator::{PageState, ITEMS_PER_PAGE},
    table::{project_table, Table},
};

pub const LIST_TITLE: &str = "Cryptocurrency Data";

/// Everything the host needs to draw the list view.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListViewModel {
    pub title: &'static str,
    pub status: ViewStatus,
    /// Present only once data has loaded without error
    pub table: Option<Table>,
    pub pager: Option<Pager>,
}

/// State of one mounted list view.
#[derive(Debug)]
pub struct ListView {
    records: Vec<CoinRecord>,
    page: PageState,
    status: ViewStatus,
    tracker: FetchTracker,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}

impl ListView {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            records: Vec::new(),
            page: PageState::new(items_per_page),
            status: ViewStatus::Loading,
            tracker: FetchTracker::new(),
        }
    }

    pub fn records(&self) -> &[CoinRecord] {
        &self.records
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Starts a refresh, or returns `None` while one is already in flight.
    pub fn begin_refresh(&mut self) -> Option<Ticket> {
        if self.tracker.in_flight() {
            debug!("Market listing refresh already in flight");
            return None;
        }
        self.status = ViewStatus::Loading;
        Some(self.tracker.issue())
    }

    pub async fn fetch(source: &dyn MarketDataSource) -> Result<Vec<CoinRecord>> {
        source.list_markets().await
    }

    /// Applies a finished fetch. Records and item count are replaced together.
    /// Returns `false` if the ticket was stale and the result was dropped.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Vec<CoinRecord>>) -> bool {
        if !self.tracker.settle(ticket) {
            warn!(
                "Ignoring stale market listing (version {})",
                ticket.version()
            );
            return false;
        }

        match result {
            Ok(records) => {
                let records = dedupe_by_id(records);
                debug!("Market listing loaded: {} records", records.len());
                self.page.set_total_items(records.len());
                self.records = records;
                self.status = ViewStatus::Ready;
            }
            Err(e) => {
                error!("Failed to load market listing: {}", e);
                self.status = ViewStatus::Failed(e.user_message());
            }
        }
        true
    }

    /// Runs a full refresh cycle against `source`.
    pub async fn refresh(&mut self, source: &dyn MarketDataSource) -> bool {
        let Some(ticket) = self.begin_refresh() else {
            return false;
        };
        let result = Self::fetch(source).await;
        self.complete(ticket, result)
    }

    pub fn next_page(&mut self) -> usize {
        self.page.next()
    }

    pub fn previous_page(&mut self) -> usize {
        self.page.previous()
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.page.go_to(page)
    }

    pub fn render(&self) -> ListViewModel {
        let ready = self.status.is_ready();
        ListViewModel {
            title: LIST_TITLE,
            status: self.status.clone(),
            table: ready.then(|| project_table(&self.records, &self.page)),
            pager: ready.then(|| Pager::from(&self.page)),
        }
    }
}

/// Keeps the first record for each id so row keys stay unique.
fn dedupe_by_id(records: Vec<CoinRecord>) -> Vec<CoinRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let total = records.len();
    let unique: Vec<CoinRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect();
    if unique.len() < total {
        warn!(
            "Dropped {} market records with duplicate ids",
            total - unique.len()
        );
    }
    unique
}
