//! # Option Income - Covered Call and Cash-Secured Put APR Explorer
//!
//! Fetches option chains for an equity ticker and ranks out-of-the-money
//! contracts by the annualized return of selling them, either as covered calls
//! or as cash-secured puts. A small web UI and a CLI sit on top.
//!
//! ## Key Features
//!
//! - **Premium Cascade**: Bid first, then last traded price, then ask.
//!
//! - **Linear APR**: `premium / basis * 365 / days * 100`, where the basis is the
//!   underlying price for calls and the strike for puts. No pricing model.
//!
//! - **Non-Fatal Fetches**: Provider failures degrade to an empty result with a
//!   typed [`quotes::FetchErrorCode`]; nothing is raised to the UI.
//!
//! - **Explicit Diagnostics**: Every fetch returns its [`quotes::FetchStats`];
//!   a [`quotes::StatsSink`] can collect them process-wide.
//!
//! - **Pluggable Provider**: [`provider::MarketDataProvider`] with a Yahoo
//!   Finance HTTP implementation and an in-memory snapshot provider.
//!
//! ## Architecture
//!
//! ```text
//! ExplorerRequest (strategy, symbol, top N, expiries)
//!   └── ExplorerView::load
//!         └── QuoteFetcher (per expiry, sequential)
//!               ├── MarketDataProvider (underlying price, option chain)
//!               └── price_rows → Vec<OptionQuote> (ranked by APR)
//!         └── ExpiryTable (formatted, top N)
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`quotes`] | Quote fetching, premium derivation, APR, diagnostics |
//! | [`provider`] | Market-data provider trait and implementations |
//! | [`presentation`] | Formatting, top-N tables, page view model |
//! | [`web`] | axum router and HTML rendering |
//! | [`config`] | Configuration with environment overrides |
//! | [`error`] | Error types and `Result` type alias |
//! | [`utils`] | Expiry date helpers |
//!
//! ## Example Usage
//!
//! ```rust
//! use option_income::provider::{StaticProvider, SymbolSnapshot};
//! use option_income::quotes::{OptionChain, OptionRow, QuoteFetcher};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let expiry = NaiveDate::from_ymd_opt(2026, 11, 17).unwrap();
//! let chain = OptionChain::new(
//!     vec![OptionRow::new(dec!(105)).with_bid(dec!(2))],
//!     vec![],
//! );
//! let provider = StaticProvider::new().with_symbol(
//!     "AAPL",
//!     SymbolSnapshot::with_last_price(dec!(100)).with_chain(expiry, chain),
//! );
//!
//! let fetcher = QuoteFetcher::new(Arc::new(provider))
//!     .with_today(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
//! let outcome = fetcher.fetch_covered_call_quotes("AAPL", "2026-11-17").await;
//!
//! assert_eq!(outcome.quotes.len(), 1);
//! assert_eq!(outcome.quotes[0].days_to_expiry, 30);
//! # });
//! ```
//!
//! ## Dependencies
//!
//! - **rust_decimal** (1.39): Exact decimal prices and APR
//! - **optionstratlib** (0.13): `OptionStyle` for call/put
//! - **dashmap** (6): Concurrent diagnostics registry
//! - **reqwest** (0.12): Yahoo Finance HTTP client
//! - **axum** (0.8): Web UI
//! - **thiserror** (2.0): Error handling

pub mod config;
pub mod error;
pub mod presentation;
pub mod provider;
pub mod quotes;
pub mod utils;
pub mod web;

pub use error::{Error, Result};
