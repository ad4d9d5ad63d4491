//! Display formatting for table cells, cards and chart labels.
//!
//! Every function here is total: absent or non-finite inputs fall back to a
//! fixed placeholder instead of failing.

use chrono::{DateTime, Utc};

/// Rendered for any currency field with no usable value.
pub const MISSING_CURRENCY: &str = "$0.00";
/// Rendered for any percentage field with no usable value.
pub const MISSING_PERCENTAGE: &str = "N/A";

/// Inserts `,` every three digits into the integer part of an already
/// formatted, unsigned decimal string.
fn group_thousands(digits: &str) -> String {
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 4);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(fraction) => format!("{}.{}", grouped, fraction),
        None => grouped,
    }
}

/// Prefixes `$` (and a leading `-` for negatives) to a formatted magnitude.
/// A magnitude that rounds to zero never carries a sign.
fn dollars(value: f64, magnitude: String) -> String {
    let is_zero = magnitude.chars().all(|c| matches!(c, '0' | '.' | ','));
    if value.is_sign_negative() && !is_zero {
        format!("-${}", magnitude)
    } else {
        format!("${}", magnitude)
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Two-decimal fixed dollar amount for price fields: `$1,234,567.50`.
pub fn format_price(value: Option<f64>) -> String {
    match usable(value) {
        Some(v) => dollars(v, group_thousands(&format!("{:.2}", v.abs()))),
        None => MISSING_CURRENCY.to_string(),
    }
}

/// Grouped dollar amount for market cap and volume fields.
///
/// Keeps at most three fraction digits and trims trailing zeros, so whole
/// amounts render as `$1,260,000,000,000`.
pub fn format_amount(value: Option<f64>) -> String {
    match usable(value) {
        Some(v) => {
            let fixed = format!("{:.3}", v.abs());
            let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
            dollars(v, group_thousands(trimmed))
        }
        None => MISSING_CURRENCY.to_string(),
    }
}

/// Two-decimal fixed percentage with its sign preserved: `-3.46%`.
pub fn format_percentage(value: Option<f64>) -> String {
    match usable(value) {
        Some(v) => {
            let fixed = format!("{:.2}", v);
            if fixed == "-0.00" {
                "0.00%".to_string()
            } else {
                format!("{}%", fixed)
            }
        }
        None => MISSING_PERCENTAGE.to_string(),
    }
}

/// Eight-decimal BTC price used on trending cards.
pub fn format_btc_price(value: f64) -> String {
    if value.is_finite() {
        format!("{:.8}", value)
    } else {
        format!("{:.8}", 0.0)
    }
}

/// Short `M/D/YYYY` date used for chart axis labels.
pub fn format_chart_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-m/%-d/%Y").to_string()
}
