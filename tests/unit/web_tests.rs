//! Integration tests for the HTTP surface.

use super::common::{provider, today};
use option_income::config::DisplayConfig;
use option_income::quotes::{
    FetchErrorCode, FetchOutcome, FetchStats, QuoteFetcher, StatsRegistry,
};
use option_income::web::{self, AppState, ExpiriesResponse};
use reqwest::StatusCode;
use std::sync::Arc;

/// Starts the app on an ephemeral port and returns its base URL.
async fn spawn_app() -> String {
    let registry = Arc::new(StatsRegistry::new());
    let fetcher = QuoteFetcher::new(Arc::new(provider()))
        .with_today(today())
        .with_stats_sink(registry.clone());
    let state = AppState::new(fetcher, registry, DisplayConfig::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, web::router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_health() {
    let base = spawn_app().await;
    let body = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_expiries_endpoint() {
    let base = spawn_app().await;
    let response: ExpiriesResponse = reqwest::get(format!("{base}/api/expiries/aapl"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(response.symbol, "AAPL");
    assert_eq!(response.expiries, vec!["2026-11-17", "2026-12-18"]);
}

#[tokio::test]
async fn test_quotes_endpoint_and_stats() {
    let base = spawn_app().await;
    let outcome: FetchOutcome = reqwest::get(format!(
        "{base}/api/quotes?symbol=AAPL&expiry=2026-11-17&strategy=csp"
    ))
    .await
    .unwrap()
    .json()
    .await
    .unwrap();

    assert_eq!(outcome.quotes.len(), 2);
    assert_eq!(outcome.stats.kept, 2);
    assert_eq!(outcome.stats.error, None);

    let bad: FetchOutcome = reqwest::get(format!("{base}/api/quotes?symbol=AAPL&expiry=soon"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bad.stats.error, Some(FetchErrorCode::InvalidExpiry));

    let stats: Vec<FetchStats> = reqwest::get(format!("{base}/api/stats"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats.len(), 2);
}

#[tokio::test]
async fn test_quotes_endpoint_rejects_unknown_strategy() {
    let base = spawn_app().await;
    let response = reqwest::get(format!(
        "{base}/api/quotes?symbol=AAPL&expiry=2026-11-17&strategy=straddle"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_renders_tables() {
    let base = spawn_app().await;
    let response = reqwest::get(format!(
        "{base}/?symbol=aapl&strategy=covered_call&expiries=2026-11-17&top_n=10"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = response.text().await.unwrap();
    assert!(html.contains("Covered Call - Expiry: 2026-11-17 - 30 days remaining"));
    assert!(html.contains("105.00 (+5.00%)"));
    assert!(html.contains("<td title=\"from bid\">2.00</td>"));
    assert!(html.contains("<td title=\"from last\">1.00</td>"));
    assert!(html.contains("$100.00"));
    assert!(html.contains("<option value=\"2026-12-18\">"));
}

#[tokio::test]
async fn test_index_form_round_trip_keeps_empty_selection() {
    let base = spawn_app().await;

    let first = reqwest::get(format!("{base}/?symbol=AAPL"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(first.contains("<input type=\"hidden\" name=\"submitted\" value=\"AAPL\">"));
    assert!(first.contains("<option value=\"2026-11-17\" selected>"));

    let cleared = reqwest::get(format!("{base}/?symbol=AAPL&submitted=AAPL"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(cleared.contains("Select at least one expiry to view option income data."));
    assert!(!cleared.contains("<table>"));
}

#[tokio::test]
async fn test_quotes_endpoint_missing_params_is_json_error() {
    let base = spawn_app().await;
    let response = reqwest::get(format!("{base}/api/quotes?symbol=AAPL"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "expiry is required");

    let response = reqwest::get(format!("{base}/api/quotes?expiry=2026-11-17"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "symbol is required");
}
