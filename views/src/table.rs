//! Projects the visible window of coin records into table rows.

use common::{
    format::{format_amount, format_percentage, format_price},
    models::CoinRecord,
};
use serde::Serialize;

use crate::paginator::PageState;

pub const COLUMNS: [&str; 7] = [
    "ID",
    "Symbol",
    "Name",
    "Current Price",
    "Market Cap",
    "Volume",
    "Change 24h",
];

pub const EMPTY_MESSAGE: &str = "No data available";

/// Records on `current_page`, clipped to what is available.
///
/// A page past the end of the data yields an empty slice; re-clamping the
/// page is the caller's job.
///
/// # Panics
///
/// Panics if `items_per_page` is zero.
pub fn window_for(
    records: &[CoinRecord],
    current_page: usize,
    items_per_page: usize,
) -> &[CoinRecord] {
    assert!(items_per_page > 0, "items_per_page must be greater than zero");
    let start = current_page
        .saturating_sub(1)
        .saturating_mul(items_per_page);
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(items_per_page).min(records.len());
    &records[start..end]
}

/// Direction of the 24h change, used to colour the cell.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
    Unknown,
}

impl Trend {
    pub fn from_change(change: Option<f64>) -> Self {
        match change.filter(|c| c.is_finite()) {
            Some(c) if c > 0.0 => Trend::Up,
            Some(c) if c < 0.0 => Trend::Down,
            Some(_) => Trend::Flat,
            None => Trend::Unknown,
        }
    }
}

/// One rendered coin row, keyed by the coin id.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CoinRow {
    pub key: String,
    /// Detail view link for the ID cell
    pub href: String,
    pub symbol: String,
    pub name: String,
    pub current_price: String,
    pub market_cap: String,
    pub volume: String,
    pub change_24h: String,
    pub trend: Trend,
}

impl CoinRow {
    pub fn from_record(record: &CoinRecord) -> Self {
        Self {
            key: record.id.clone(),
            href: format!("/trending/{}", record.id),
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            current_price: format_price(record.current_price),
            market_cap: format_amount(record.market_cap),
            volume: format_amount(record.total_volume),
            change_24h: format_percentage(record.price_change_percentage_24h),
            trend: Trend::from_change(record.price_change_percentage_24h),
        }
    }

    /// Cell text in column order.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.key.as_str(),
            self.symbol.as_str(),
            self.name.as_str(),
            self.current_price.as_str(),
            self.market_cap.as_str(),
            self.volume.as_str(),
            self.change_24h.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TableRow {
    Coin(CoinRow),
    /// Single cell spanning `colspan` columns
    Placeholder { message: String, colspan: usize },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Table {
    pub headers: [&'static str; 7],
    pub rows: Vec<TableRow>,
}

/// Rows for a window; an empty window becomes one placeholder row.
pub fn project_rows(window: &[CoinRecord]) -> Vec<TableRow> {
    if window.is_empty() {
        return vec![TableRow::Placeholder {
            message: EMPTY_MESSAGE.to_string(),
            colspan: COLUMNS.len(),
        }];
    }
    window
        .iter()
        .map(|record| TableRow::Coin(CoinRow::from_record(record)))
        .collect()
}

pub fn project_table(records: &[CoinRecord], page: &PageState) -> Table {
    let window = window_for(records, page.current_page(), page.items_per_page());
    Table {
        headers: COLUMNS,
        rows: project_rows(window),
    }
}
