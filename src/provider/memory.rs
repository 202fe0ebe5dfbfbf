//! In-memory provider backed by a fixed snapshot.
//!
//! Useful to run the explorer offline from a JSON file and to drive the
//! fetcher deterministically in tests.

use super::MarketDataProvider;
use crate::error::{Error, Result};
use crate::quotes::OptionChain;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Everything known about one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolSnapshot {
    /// Value returned by `last_price`.
    #[serde(default)]
    pub last_price: Option<Decimal>,
    /// Value returned by `recent_daily_close`.
    #[serde(default)]
    pub daily_close: Option<Decimal>,
    /// Chains by expiry.
    #[serde(default)]
    pub chains: BTreeMap<NaiveDate, OptionChain>,
}

/// Provider answering from a fixed snapshot keyed by upper-cased symbol.
///
/// Unknown symbols behave like an unknown ticker upstream: every call fails
/// with `Error::NoDataAvailable`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticProvider {
    symbols: HashMap<String, SymbolSnapshot>,
}

impl StaticProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot from a JSON file shaped as
    /// `{"AAPL": {"last_price": 187.4, "chains": {"2026-11-20": {"calls": [...], "puts": [...]}}}}`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read and `Error::Parse`
    /// if it is not a valid snapshot.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("reading {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the JSON is not a valid snapshot.
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: Self =
            serde_json::from_str(raw).map_err(|e| Error::parse(format!("snapshot: {e}")))?;
        Ok(Self {
            symbols: parsed
                .symbols
                .into_iter()
                .map(|(symbol, snapshot)| (symbol.to_uppercase(), snapshot))
                .collect(),
        })
    }

    /// Adds or replaces a symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: &str, snapshot: SymbolSnapshot) -> Self {
        self.symbols.insert(symbol.to_uppercase(), snapshot);
        self
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if no symbol is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn snapshot(&self, symbol: &str) -> Result<&SymbolSnapshot> {
        self.symbols
            .get(&symbol.to_uppercase())
            .ok_or_else(|| Error::no_data(format!("unknown symbol {symbol}")))
    }
}

impl SymbolSnapshot {
    /// Creates a snapshot with a last price.
    #[must_use]
    pub fn with_last_price(price: Decimal) -> Self {
        Self {
            last_price: Some(price),
            ..Self::default()
        }
    }

    /// Adds a chain for an expiry.
    #[must_use]
    pub fn with_chain(mut self, expiry: NaiveDate, chain: OptionChain) -> Self {
        self.chains.insert(expiry, chain);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn last_price(&self, symbol: &str) -> Result<Option<Decimal>> {
        Ok(self.snapshot(symbol)?.last_price)
    }

    async fn recent_daily_close(&self, symbol: &str) -> Result<Option<Decimal>> {
        Ok(self.snapshot(symbol)?.daily_close)
    }

    async fn list_expiries(&self, symbol: &str) -> Result<Vec<NaiveDate>> {
        Ok(self.snapshot(symbol)?.chains.keys().copied().collect())
    }

    async fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> Result<OptionChain> {
        self.snapshot(symbol)?
            .chains
            .get(&expiry)
            .cloned()
            .ok_or_else(|| Error::no_data(format!("no chain for {symbol} {expiry}")))
    }
}
