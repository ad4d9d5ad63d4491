//! Plain-text rendering of the view models for the terminal host.

use std::fmt::Write;
use views::{
    DetailViewModel, HomeViewModel, LineChart, ListViewModel, RangeButton, Table, TableRow,
    ViewStatus,
};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 60;

fn status_line(status: &ViewStatus) -> Option<String> {
    match status {
        ViewStatus::Loading => Some("Loading...".to_string()),
        ViewStatus::Failed(message) => Some(format!("Error: {}", message)),
        ViewStatus::Ready => None,
    }
}

pub fn render_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        if let TableRow::Coin(coin) = row {
            for (width, cell) in widths.iter_mut().zip(coin.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | ").trim_end());
    let rule_width = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    let _ = writeln!(out, "{}", "-".repeat(rule_width));

    for row in &table.rows {
        match row {
            TableRow::Coin(coin) => {
                let cells: Vec<String> = coin
                    .cells()
                    .iter()
                    .zip(&widths)
                    .enumerate()
                    .map(|(i, (cell, w))| {
                        // Numeric columns are right-aligned.
                        if i >= 3 {
                            format!("{:>w$}", cell, w = *w)
                        } else {
                            format!("{:<w$}", cell, w = *w)
                        }
                    })
                    .collect();
                let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
            }
            TableRow::Placeholder { message, .. } => {
                let _ = writeln!(out, "{:^width$}", message, width = rule_width);
            }
        }
    }
    out
}

pub fn render_list(model: &ListViewModel) -> String {
    let mut out = format!("{}\n\n", model.title);
    if let Some(line) = status_line(&model.status) {
        let _ = writeln!(out, "{}", line);
    }
    if let Some(table) = &model.table {
        out.push_str(&render_table(table));
    }
    if let Some(pager) = &model.pager {
        let previous = if pager.previous_enabled { "[Previous]" } else { " Previous " };
        let next = if pager.next_enabled { "[Next]" } else { " Next " };
        let _ = writeln!(out, "\n{}  {}  {}", previous, pager.indicator, next);
    }
    out
}

fn render_range_buttons(buttons: &[RangeButton]) -> String {
    buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.label)
            } else {
                format!(" {} ", b.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line sparkline of a dataset, downsampled to a fixed width.
fn sparkline(data: &[f64]) -> String {
    if data.is_empty() {
        return String::new();
    }
    let step = data.len().div_ceil(SPARK_WIDTH);
    let samples: Vec<f64> = data.iter().step_by(step).copied().collect();
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    samples
        .iter()
        .map(|v| {
            let level = if span > 0.0 {
                (((v - min) / span) * (SPARK_LEVELS.len() - 1) as f64).round() as usize
            } else {
                0
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

pub fn render_chart(chart: &LineChart) -> String {
    let mut out = String::new();
    if chart.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }
    if let (Some(first), Some(last)) = (chart.labels.first(), chart.labels.last()) {
        let _ = writeln!(out, "  {} → {}", first, last);
    }
    for dataset in &chart.datasets {
        let _ = writeln!(out, "  {:<12} {}", dataset.label, sparkline(&dataset.data));
    }
    out
}

pub fn render_detail(model: &DetailViewModel) -> String {
    let mut out = String::new();
    if let Some(line) = status_line(&model.status) {
        let _ = writeln!(out, "{}: {}", model.coin_id, line);
    }
    if let Some(content) = &model.content {
        let _ = writeln!(out, "{}", content.name);
        let _ = writeln!(out, "Current Price: {}", content.current_price);
        let _ = writeln!(out, "Image: {}\n", content.image_url);
        if !content.description.is_empty() {
            let _ = writeln!(out, "Description\n{}\n", content.description);
        }
        let _ = writeln!(out, "{}", content.chart_title);
        out.push_str(&render_chart(&content.price_chart));
        let _ = writeln!(out, "\nPerformance");
        for metric in &content.metrics {
            let _ = writeln!(out, "  {}: {}", metric.label, metric.value);
        }
    }
    let _ = writeln!(out, "\n{}", render_range_buttons(&model.range_buttons));
    out
}

pub fn render_home(model: &HomeViewModel) -> String {
    let mut out = format!("{}\n\n", model.title);
    if let Some(line) = status_line(&model.chart_status) {
        let _ = writeln!(out, "{}", line);
    }
    if let Some(chart) = &model.chart {
        out.push_str(&render_chart(chart));
    }
    let _ = writeln!(out, "{}\n", render_range_buttons(&model.range_buttons));

    let _ = writeln!(out, "Trending Coins");
    if let Some(line) = status_line(&model.trending_status) {
        let _ = writeln!(out, "{}", line);
    }
    for card in &model.trending {
        let _ = writeln!(
            out,
            "  {}  {}  {}",
            card.title, card.price_btc, card.change_24h
        );
    }
    if let Some(message) = model.trending_empty_message {
        let _ = writeln!(out, "{}", message);
    }
    out
}
