//! Detail and home view integration tests against an in-memory market source.

mod support;

use common::models::TimeRange;
use std::sync::Arc;
use std::time::Duration;
use support::{sample_trending, FakeSource};
use tokio::sync::mpsc;
use views::{DetailView, HomeView, ViewStatus};

// ---------------------------------------------------------------------------
// detail view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_renders_details_and_chart() {
    let source = FakeSource::default();
    let mut view = DetailView::new("bitcoin");

    assert!(view.load(&source).await);

    let model = view.render();
    assert_eq!(model.status, ViewStatus::Ready);
    let content = model.content.unwrap();
    assert_eq!(content.name, "BITCOIN");
    assert_eq!(content.image_url, "bitcoin-large.png");
    assert_eq!(content.current_price, "$64,000.00");
    assert_eq!(content.chart_title, "1Y Price Chart");
    assert_eq!(content.price_chart.labels.len(), 366);
    assert_eq!(content.price_chart.labels[0], "1/1/2024");
    assert_eq!(
        content.performance_chart.datasets[0].data,
        vec![64000.0, 65000.5, 63000.0, 0.0, 0.0]
    );

    let metrics: Vec<_> = content
        .metrics
        .iter()
        .map(|m| (m.label, m.value.as_str()))
        .collect();
    assert_eq!(
        metrics,
        vec![
            ("Today's Low", "$63,000.00"),
            ("Today's High", "$65,000.50"),
            ("52W Low", "$0.00"),
            ("52W High", "$0.00"),
        ]
    );
}

#[tokio::test]
async fn selecting_a_range_refetches_history() {
    let source = FakeSource::default();
    let mut view = DetailView::new("ethereum");
    view.load(&source).await;

    let request = view.select_range(TimeRange::SevenDays).unwrap();
    assert_eq!(view.render().status, ViewStatus::Loading);

    let result = DetailView::fetch(&source, &request).await;
    assert!(view.complete(&request, result));

    let content = view.render().content.unwrap();
    assert_eq!(content.chart_title, "7D Price Chart");
    assert_eq!(content.price_chart.labels.len(), 8);
    assert_eq!(view.series().unwrap().range, TimeRange::SevenDays);
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_one() {
    let source = FakeSource::default();
    let mut view = DetailView::new("bitcoin");

    let first = view.begin_load().unwrap();
    let second = view.select_range(TimeRange::ThirtyDays).unwrap();

    let second_result = DetailView::fetch(&source, &second).await;
    assert!(view.complete(&second, second_result));

    let first_result = DetailView::fetch(&source, &first).await;
    assert!(!view.complete(&first, first_result));

    assert_eq!(view.series().unwrap().range, TimeRange::ThirtyDays);
    assert_eq!(view.render().status, ViewStatus::Ready);
}

#[tokio::test]
async fn slow_spawned_request_loses_to_fast_later_one() {
    let source = Arc::new(FakeSource::default());
    source.delay_history(TimeRange::OneYear, Duration::from_millis(200));

    let mut view = DetailView::new("solana");
    let (tx, mut rx) = mpsc::unbounded_channel();

    for request in [view.begin_load(), view.select_range(TimeRange::OneDay)]
        .into_iter()
        .flatten()
    {
        let source = Arc::clone(&source);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = DetailView::fetch(source.as_ref(), &request).await;
            let _ = tx.send((request, result));
        });
    }
    drop(tx);

    let mut applied = Vec::new();
    while let Some((request, result)) = rx.recv().await {
        applied.push((request.range, view.complete(&request, result)));
    }

    assert_eq!(
        applied,
        vec![(TimeRange::OneDay, true), (TimeRange::OneYear, false)]
    );
    assert_eq!(view.series().unwrap().range, TimeRange::OneDay);
}

#[tokio::test]
async fn fetch_error_blocks_content() {
    let source = FakeSource::default();
    source.fail_with(Some(404));
    let mut view = DetailView::new("no-such-coin");
    view.load(&source).await;

    let model = view.render();
    assert_eq!(model.status, ViewStatus::Failed("Coin not found".to_string()));
    assert!(model.content.is_none());
    assert_eq!(model.range_buttons.len(), 4);
}

#[tokio::test]
async fn open_switches_to_another_coin() {
    let source = FakeSource::default();
    let mut view = DetailView::new("bitcoin");
    view.load(&source).await;

    let request = view.open("ethereum").unwrap();
    assert!(view.render().content.is_none());
    let result = DetailView::fetch(&source, &request).await;
    view.complete(&request, result);

    assert_eq!(view.details().unwrap().id, "ethereum");
    assert_eq!(view.render().coin_id, "ethereum");
}

// ---------------------------------------------------------------------------
// home view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn home_loads_comparison_chart_and_trending() {
    let source = FakeSource::default();
    source.set_trending(sample_trending());
    let mut view = HomeView::new();

    view.load(&source).await;

    let model = view.render();
    assert_eq!(model.chart_status, ViewStatus::Ready);
    let chart = model.chart.unwrap();
    let labels: Vec<_> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["Bitcoin", "Ethereum", "Solana"]);
    assert_eq!(chart.labels.len(), 8);

    assert_eq!(model.trending_status, ViewStatus::Ready);
    assert_eq!(model.trending.len(), 1);
    assert_eq!(model.trending[0].title, "Pepe (PEPE)");
    assert_eq!(model.trending[0].change_24h, "24h Change: -4.20%");
    assert!(model.trending_empty_message.is_none());
}

#[tokio::test]
async fn home_failure_is_shown_per_section() {
    let source = FakeSource::default();
    source.fail_with(Some(500));
    let mut view = HomeView::new();

    view.load(&source).await;

    let model = view.render();
    assert!(matches!(model.chart_status, ViewStatus::Failed(_)));
    assert!(matches!(model.trending_status, ViewStatus::Failed(_)));
    assert!(model.chart.is_none());
    assert!(model.trending.is_empty());
    assert!(model.trending_empty_message.is_none());
}

#[tokio::test]
async fn home_load_skips_sections_already_in_flight() {
    let source = FakeSource::default();
    source.set_trending(sample_trending());
    let mut view = HomeView::new();
    let pending = view.begin_trending_load().unwrap();

    view.load(&source).await;

    assert_eq!(source.trending_calls(), 0);
    assert_eq!(source.history_calls(), 3);
    let model = view.render();
    assert_eq!(model.chart_status, ViewStatus::Ready);
    assert_eq!(model.trending_status, ViewStatus::Loading);

    assert!(view.complete_trending(pending, Ok(sample_trending())));
    assert_eq!(view.render().trending.len(), 1);
}
