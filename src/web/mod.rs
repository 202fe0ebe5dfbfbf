//! Web UI and JSON endpoints.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /` | Explorer page |
//! | `GET /api/expiries/{symbol}` | Listed expiries |
//! | `GET /api/quotes?symbol=&expiry=&strategy=` | Ranked quotes and diagnostics |
//! | `GET /api/stats` | Latest diagnostics per fetch |
//! | `GET /health` | Liveness |

mod error;
mod handlers;
mod render;

pub use error::ApiError;
pub use handlers::ExpiriesResponse;
pub use render::{escape, render_page};

use crate::config::{DisplayConfig, ServerConfig};
use crate::quotes::{QuoteFetcher, StatsRegistry};
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Fetcher used by every request.
    pub fetcher: Arc<QuoteFetcher>,
    /// Registry the fetcher publishes diagnostics to.
    pub stats: Arc<StatsRegistry>,
    /// UI defaults.
    pub display: Arc<DisplayConfig>,
}

impl AppState {
    /// Creates the state. `fetcher` should publish to `stats` for
    /// `/api/stats` to show anything.
    #[must_use]
    pub fn new(fetcher: QuoteFetcher, stats: Arc<StatsRegistry>, display: DisplayConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            stats,
            display: Arc::new(display),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(|| async { "ok" }))
        .route("/api/expiries/{symbol}", get(handlers::expiries))
        .route("/api/quotes", get(handlers::quotes))
        .route("/api/stats", get(handlers::stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serves the UI until Ctrl-C.
///
/// # Errors
///
/// Fails if the address cannot be bound or the server stops with an error.
pub async fn serve(server: &ServerConfig, state: AppState) -> Result<()> {
    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    info!(
        provider = state.fetcher.provider().name(),
        "option income explorer listening on http://{addr}"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
