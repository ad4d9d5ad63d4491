//! List view integration tests against an in-memory market source.

mod support;

use support::{sample_records, FakeSource};
use views::{ListView, TableRow, ViewStatus, ITEMS_PER_PAGE};

fn coin_keys(rows: &[TableRow]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| match row {
            TableRow::Coin(coin) => Some(coin.key.clone()),
            TableRow::Placeholder { .. } => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// loading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_loads_first_page() {
    let source = FakeSource::with_markets(45);
    let mut view = ListView::default();

    assert!(view.refresh(&source).await);

    let model = view.render();
    assert_eq!(model.status, ViewStatus::Ready);
    let table = model.table.unwrap();
    assert_eq!(table.rows.len(), ITEMS_PER_PAGE);
    assert_eq!(coin_keys(&table.rows)[0], "coin-0");

    let pager = model.pager.unwrap();
    assert_eq!(pager.indicator, "1 / 3");
    assert!(!pager.previous_enabled);
    assert!(pager.next_enabled);
}

#[tokio::test]
async fn last_page_has_remaining_records() {
    let source = FakeSource::with_markets(45);
    let mut view = ListView::default();
    view.refresh(&source).await;

    view.next_page();
    view.next_page();
    let model = view.render();
    let table = model.table.unwrap();
    assert_eq!(table.rows.len(), 5);
    assert_eq!(coin_keys(&table.rows).last().unwrap(), "coin-44");

    let pager = model.pager.unwrap();
    assert_eq!(pager.indicator, "3 / 3");
    assert!(!pager.next_enabled);
    assert!(pager.previous_enabled);
}

#[tokio::test]
async fn next_on_last_page_stays_put() {
    let source = FakeSource::with_markets(45);
    let mut view = ListView::default();
    view.refresh(&source).await;

    assert_eq!(view.go_to_page(3), 3);
    assert_eq!(view.next_page(), 3);
    assert_eq!(view.go_to_page(1), 1);
    assert_eq!(view.previous_page(), 1);
}

#[tokio::test]
async fn empty_listing_renders_placeholder() {
    let source = FakeSource::default();
    let mut view = ListView::default();
    view.refresh(&source).await;

    let model = view.render();
    let table = model.table.unwrap();
    assert_eq!(table.rows.len(), 1);
    assert!(matches!(
        &table.rows[0],
        TableRow::Placeholder { colspan: 7, message } if message == "No data available"
    ));
    assert_eq!(model.pager.unwrap().indicator, "1 / 1");
}

#[tokio::test]
async fn missing_change_renders_not_available() {
    let source = FakeSource::with_markets(2);
    let mut view = ListView::default();
    view.refresh(&source).await;

    let table = view.render().table.unwrap();
    match &table.rows[1] {
        TableRow::Coin(row) => {
            assert_eq!(row.change_24h, "N/A");
            assert_eq!(row.current_price, "$1,001.00");
            assert_eq!(row.market_cap, "$2,000,000");
        }
        other => panic!("expected coin row, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// refetch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shrinking_refetch_reclamps_page() {
    let source = FakeSource::with_markets(100);
    let mut view = ListView::default();
    view.refresh(&source).await;
    view.go_to_page(5);

    source.set_markets(sample_records(25));
    view.refresh(&source).await;

    assert_eq!(view.page().current_page(), 2);
    let model = view.render();
    assert_eq!(model.table.unwrap().rows.len(), 5);
    assert_eq!(model.pager.unwrap().indicator, "2 / 2");
}

#[tokio::test]
async fn duplicate_ids_are_dropped() {
    let source = FakeSource::default();
    let mut records = sample_records(3);
    records.push(records[0].clone());
    source.set_markets(records);

    let mut view = ListView::default();
    view.refresh(&source).await;

    assert_eq!(view.records().len(), 3);
    assert_eq!(view.page().total_items(), 3);
}

#[tokio::test]
async fn refresh_is_refused_while_one_is_in_flight() {
    let source = FakeSource::with_markets(5);
    let mut view = ListView::default();

    let ticket = view.begin_refresh().unwrap();
    assert!(!view.refresh(&source).await);
    assert_eq!(source.market_calls(), 0);

    let result = ListView::fetch(&source).await;
    assert!(view.complete(ticket, result));
    assert_eq!(source.market_calls(), 1);
    assert_eq!(view.records().len(), 5);
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_error_replaces_table_with_message() {
    let source = FakeSource::with_markets(10);
    source.fail_with(Some(503));
    let mut view = ListView::default();
    view.refresh(&source).await;

    let model = view.render();
    assert_eq!(
        model.status,
        ViewStatus::Failed("HTTP error! Status: 503".to_string())
    );
    assert!(model.table.is_none());
    assert!(model.pager.is_none());
}

#[tokio::test]
async fn manual_refetch_recovers_from_error() {
    let source = FakeSource::with_markets(10);
    source.fail_with(Some(429));
    let mut view = ListView::default();
    view.refresh(&source).await;
    assert!(matches!(view.status(), ViewStatus::Failed(_)));

    source.fail_with(None);
    view.refresh(&source).await;
    assert_eq!(view.status(), &ViewStatus::Ready);
    assert_eq!(view.render().table.unwrap().rows.len(), 10);
}
