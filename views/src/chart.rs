//! Chart-ready series for the line chart collaborator.

use common::{
    format::format_chart_date,
    models::{MarketSnapshot, PriceSeries},
};
use serde::Serialize;

pub const PRICE_LABEL: &str = "Price in USD";
pub const PERFORMANCE_LABEL: &str = "Performance";
pub const PERFORMANCE_LABELS: [&str; 5] =
    ["Current Price", "24h High", "24h Low", "52w High", "52w Low"];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

// (border, background) per dataset
const PRICE_COLORS: (&str, &str) = ("rgba(255, 99, 132, 1)", "rgba(255, 99, 132, 0.2)");
const PERFORMANCE_COLORS: (&str, &str) = ("rgba(75, 192, 192, 1)", "rgba(75, 192, 192, 0.2)");

fn coin_colors(coin_id: &str, index: usize) -> (&'static str, &'static str) {
    const PALETTE: [(&str, &str); 3] = [
        ("rgba(255, 0, 0, 1)", "rgba(255, 0, 0, 0.2)"),
        ("rgba(54, 162, 235, 1)", "rgba(54, 162, 235, 0.2)"),
        ("rgba(255, 206, 86, 1)", "rgba(255, 206, 86, 0.2)"),
    ];
    match coin_id {
        "bitcoin" => PALETTE[0],
        "ethereum" => PALETTE[1],
        "solana" => PALETTE[2],
        _ => PALETTE[index % PALETTE.len()],
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl LineChart {
    /// Single-dataset price history chart.
    pub fn price(series: &PriceSeries) -> Self {
        let (border_color, background_color) = PRICE_COLORS;
        Self {
            labels: series
                .points
                .iter()
                .map(|p| format_chart_date(p.timestamp))
                .collect(),
            datasets: vec![Dataset {
                label: PRICE_LABEL.to_string(),
                data: series.points.iter().map(|p| p.price).collect(),
                border_color,
                background_color,
            }],
        }
    }

    /// Current price against the 24h and 52w extremes; missing levels plot as 0.
    pub fn performance(market: &MarketSnapshot) -> Self {
        let (border_color, background_color) = PERFORMANCE_COLORS;
        let levels = [
            market.current_price,
            market.high_24h,
            market.low_24h,
            market.high_52w,
            market.low_52w,
        ];
        Self {
            labels: PERFORMANCE_LABELS.iter().map(|l| l.to_string()).collect(),
            datasets: vec![Dataset {
                label: PERFORMANCE_LABEL.to_string(),
                data: levels.iter().map(|v| v.unwrap_or(0.0)).collect(),
                border_color,
                background_color,
            }],
        }
    }

    /// One dataset per coin; axis labels come from the first series.
    pub fn comparison(series: &[PriceSeries]) -> Self {
        let labels = series
            .first()
            .map(|s| {
                s.points
                    .iter()
                    .map(|p| format_chart_date(p.timestamp))
                    .collect()
            })
            .unwrap_or_default();

        let datasets = series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let (border_color, background_color) = coin_colors(&s.coin_id, i);
                Dataset {
                    label: capitalize(&s.coin_id),
                    data: s.points.iter().map(|p| p.price).collect(),
                    border_color,
                    background_color,
                }
            })
            .collect();

        Self { labels, datasets }
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.iter().all(|d| d.data.is_empty())
    }
}
