use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Price history point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    /// Timestamp for this price point
    pub timestamp: DateTime<Utc>,
    /// USD price at this point in time
    pub price: f64,
}

/// Historical price data for one coin over one time range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSeries {
    pub coin_id: String,
    pub range: TimeRange,
    /// Oldest first, as returned by the API
    pub points: Vec<PricePoint>,
}

/// Selectable duration buckets for a historical series
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
}

impl TimeRange {
    /// Every range in button order.
    pub const ALL: [TimeRange; 4] = [
        TimeRange::OneDay,
        TimeRange::SevenDays,
        TimeRange::ThirtyDays,
        TimeRange::OneYear,
    ];

    /// Value of the `days` query parameter.
    pub fn days(self) -> u32 {
        match self {
            TimeRange::OneDay => 1,
            TimeRange::SevenDays => 7,
            TimeRange::ThirtyDays => 30,
            TimeRange::OneYear => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::OneDay => "1d",
            TimeRange::SevenDays => "7d",
            TimeRange::ThirtyDays => "30d",
            TimeRange::OneYear => "1y",
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|range| range.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::ParseError(format!(
                    "Unknown time range: {}. Supported ranges: 1d, 7d, 30d, 1y",
                    s
                ))
            })
    }
}
