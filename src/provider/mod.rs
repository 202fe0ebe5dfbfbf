//! Market-data providers.
//!
//! The fetcher only talks to [`MarketDataProvider`]. Every call returns a
//! typed [`Result`] and the fetcher decides what a failure means; providers
//! never swallow errors themselves.
//!
//! - [`YahooProvider`]: Yahoo Finance public query endpoints over HTTP
//! - [`StaticProvider`]: in-memory snapshot, loadable from JSON

mod memory;
mod yahoo;

pub use memory::{StaticProvider, SymbolSnapshot};
pub use yahoo::YahooProvider;

use crate::error::Result;
use crate::quotes::OptionChain;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Source of underlying prices, expirations and option chains.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Latest traded price of the underlying, if the provider has one.
    async fn last_price(&self, symbol: &str) -> Result<Option<Decimal>>;

    /// Most recent daily close of the underlying, if any.
    async fn recent_daily_close(&self, symbol: &str) -> Result<Option<Decimal>>;

    /// Listed option expirations.
    async fn list_expiries(&self, symbol: &str) -> Result<Vec<NaiveDate>>;

    /// Calls and puts for one expiration.
    async fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> Result<OptionChain>;
}
