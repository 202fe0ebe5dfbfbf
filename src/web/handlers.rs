//! Route handlers.

use super::AppState;
use super::error::ApiError;
use super::render::render_page;
use crate::presentation::{ExplorerRequest, ExplorerView};
use crate::quotes::{FetchOutcome, FetchStats, Strategy};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use serde::{Deserialize, Serialize};

/// `GET /` — the explorer page.
pub async fn index(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Html<String> {
    let request = ExplorerRequest::from_pairs(
        pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        &state.display,
    );
    let view = ExplorerView::load(&state.fetcher, request, &state.display).await;
    Html(render_page(&view))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpiriesResponse {
    pub symbol: String,
    pub expiries: Vec<String>,
}

/// `GET /api/expiries/{symbol}`
pub async fn expiries(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<ExpiriesResponse> {
    let expiries = state.fetcher.list_expiries(&symbol).await;
    Json(ExpiriesResponse {
        symbol: symbol.trim().to_uppercase(),
        expiries,
    })
}

#[derive(Debug, Deserialize)]
pub struct QuotesParams {
    pub symbol: Option<String>,
    pub expiry: Option<String>,
    pub strategy: Option<String>,
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{name} is required")))
}

/// `GET /api/quotes?symbol=&expiry=&strategy=`
pub async fn quotes(
    State(state): State<AppState>,
    Query(params): Query<QuotesParams>,
) -> Result<Json<FetchOutcome>, ApiError> {
    let strategy = match params.strategy.as_deref() {
        Some(raw) => raw.parse::<Strategy>()?,
        None => Strategy::default(),
    };
    let symbol = required(params.symbol, "symbol")?;
    let expiry = required(params.expiry, "expiry")?;

    let outcome = state.fetcher.fetch_quotes(strategy, &symbol, &expiry).await;
    Ok(Json(outcome))
}

/// `GET /api/stats` — latest diagnostics per fetch key.
pub async fn stats(State(state): State<AppState>) -> Json<Vec<FetchStats>> {
    Json(state.stats.snapshot())
}
