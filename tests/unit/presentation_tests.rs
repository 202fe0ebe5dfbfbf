//! Integration tests for the explorer view.

use super::common::{provider, today};
use option_income::config::DisplayConfig;
use option_income::presentation::{
    ExpirySection, ExplorerRequest, ExplorerView, NoticeLevel, TopN,
};
use option_income::quotes::{FetchErrorCode, QuoteFetcher, Strategy};
use std::sync::Arc;

fn fetcher() -> QuoteFetcher {
    QuoteFetcher::new(Arc::new(provider())).with_today(today())
}

fn request(pairs: &[(&str, &str)]) -> ExplorerRequest {
    ExplorerRequest::from_pairs(pairs.iter().copied(), &DisplayConfig::default())
}

#[tokio::test]
async fn test_default_view_loads_first_expiries() {
    let display = DisplayConfig::default();
    let view = ExplorerView::load(&fetcher(), request(&[]), &display).await;

    assert_eq!(view.request.symbol, "AAPL");
    assert_eq!(view.request.expiries, vec!["2026-11-17", "2026-12-18"]);
    assert_eq!(view.expiry_options.len(), 2);
    assert_eq!(view.expiry_options[0].label, "2026-11-17 (30 days)");
    assert!(view.expiry_options.iter().all(|o| o.selected));

    assert_eq!(view.underlying_price_label().as_deref(), Some("$100.00"));
    assert!(view.apr_caption.is_some());
    assert!(view.notices.is_empty());

    let tables: Vec<_> = view.tables().collect();
    assert_eq!(tables.len(), 2);
    assert_eq!(
        tables[0].title(),
        "Covered Call - Expiry: 2026-11-17 - 30 days remaining"
    );
    assert_eq!(tables[0].cells()[0][0], "105.00 (+5.00%)");
    assert_eq!(tables[0].cells()[0][2], "24.33");
    assert_eq!(tables[1].days_to_expiry, 61);
}

#[tokio::test]
async fn test_explicit_selection_and_top_n() {
    let view = ExplorerView::load(
        &fetcher(),
        request(&[
            ("strategy", "cash_secured_put"),
            ("symbol", " aapl "),
            ("top_n", "1"),
            ("expiries", "2026-11-17"),
        ]),
        &DisplayConfig::default(),
    )
    .await;

    assert_eq!(view.request.strategy, Strategy::CashSecuredPut);
    assert_eq!(view.request.top_n, TopN::new(5));
    assert_eq!(view.sections.len(), 1);
    let table = view.tables().next().unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cells()[0][0], "95.00 (-5.00%)");
    assert!(!view.expiry_options[1].selected);
}

#[tokio::test]
async fn test_blank_symbol_asks_for_input() {
    let view = ExplorerView::load(
        &fetcher(),
        request(&[("symbol", "  ")]),
        &DisplayConfig::default(),
    )
    .await;

    assert!(view.expiry_options.is_empty());
    assert_eq!(view.notices.len(), 1);
    assert_eq!(view.notices[0].level, NoticeLevel::Info);
}

#[tokio::test]
async fn test_unknown_symbol_warns() {
    let view = ExplorerView::load(
        &fetcher(),
        request(&[("symbol", "ZZZZ")]),
        &DisplayConfig::default(),
    )
    .await;

    assert_eq!(view.notices.len(), 1);
    assert_eq!(view.notices[0].level, NoticeLevel::Warning);
    assert!(view.sections.is_empty());
}

#[tokio::test]
async fn test_failed_fetch_yields_empty_section() {
    let view = ExplorerView::load(
        &fetcher(),
        request(&[("symbol", "noprice")]),
        &DisplayConfig::default(),
    )
    .await;

    assert!(!view.has_results());
    assert!(view.apr_caption.is_none());
    match &view.sections[0] {
        ExpirySection::Empty { expiry, stats, .. } => {
            assert_eq!(expiry, "2026-11-17");
            assert_eq!(stats.error, Some(FetchErrorCode::MissingUnderlyingPrice));
        }
        ExpirySection::Table(_) => panic!("expected an empty section"),
    }
    assert!(
        view.notices
            .iter()
            .any(|n| n.level == NoticeLevel::Warning)
    );
}

#[tokio::test]
async fn test_submitted_empty_selection_asks_for_expiry() {
    let view = ExplorerView::load(
        &fetcher(),
        request(&[("symbol", "AAPL"), ("submitted", "AAPL")]),
        &DisplayConfig::default(),
    )
    .await;

    assert!(view.request.expiries.is_empty());
    assert!(view.sections.is_empty());
    assert_eq!(view.expiry_options.len(), 2);
    assert!(view.expiry_options.iter().all(|o| !o.selected));
    assert_eq!(view.notices.len(), 1);
    assert_eq!(view.notices[0].level, NoticeLevel::Info);
    assert_eq!(
        view.notices[0].message,
        "Select at least one expiry to view option income data."
    );
}

#[tokio::test]
async fn test_new_symbol_after_submit_uses_defaults() {
    let view = ExplorerView::load(
        &fetcher(),
        request(&[("symbol", "aapl"), ("submitted", "MSFT")]),
        &DisplayConfig::default(),
    )
    .await;

    assert_eq!(view.request.expiries, vec!["2026-11-17", "2026-12-18"]);
    assert!(view.has_results());
}
