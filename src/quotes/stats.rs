//! Fetch diagnostics.
//!
//! Every fetch returns a [`FetchStats`] alongside its quotes. A [`StatsSink`]
//! can additionally be handed to the fetcher to publish those records, e.g. to
//! the process-wide [`StatsRegistry`] served by the web UI. Diagnostics are
//! observational only and never feed back into quote selection.

use super::quote::Strategy;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why a whole fetch came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorCode {
    /// Neither last price nor recent close gave a positive underlying price.
    MissingUnderlyingPrice,
    /// The option chain could not be retrieved.
    OptionChainError,
    /// The expiry is today or in the past.
    NonPositiveDaysToExpiry,
    /// The expiry string could not be parsed.
    InvalidExpiry,
}

impl FetchErrorCode {
    /// Snake-case code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FetchErrorCode::MissingUnderlyingPrice => "missing_underlying_price",
            FetchErrorCode::OptionChainError => "option_chain_error",
            FetchErrorCode::NonPositiveDaysToExpiry => "non_positive_days_to_expiry",
            FetchErrorCode::InvalidExpiry => "invalid_expiry",
        }
    }
}

impl std::fmt::Display for FetchErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// No positive bid, last or ask.
    MissingBid,
    /// Strike on the wrong side of the underlying.
    NotOtm,
    /// Strike missing or not strictly positive, or an APR that overflows.
    InvalidStrike,
}

impl DropReason {
    /// Snake-case code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DropReason::MissingBid => "missing_bid",
            DropReason::NotOtm => "not_otm",
            DropReason::InvalidStrike => "invalid_strike",
        }
    }
}

/// Identity of a fetch: strategy, symbol and expiry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsKey {
    /// Strategy fetched.
    pub strategy: Strategy,
    /// Upper-cased symbol.
    pub symbol: String,
    /// Expiry exactly as requested.
    pub expiry: String,
}

impl StatsKey {
    /// Creates a key, upper-casing the symbol.
    #[must_use]
    pub fn new(strategy: Strategy, symbol: &str, expiry: impl Into<String>) -> Self {
        Self {
            strategy,
            symbol: symbol.trim().to_uppercase(),
            expiry: expiry.into(),
        }
    }
}

impl std::fmt::Display for StatsKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.strategy.side_label(),
            self.symbol,
            self.expiry
        )
    }
}

/// Counters describing one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchStats {
    /// Which fetch these counters belong to.
    pub key: StatsKey,
    /// Rows received from the provider for the requested side.
    pub total_rows: usize,
    /// Rows turned into quotes.
    pub kept: usize,
    /// Rows without a usable premium.
    pub dropped_missing_bid: usize,
    /// Rows that were not out of the money.
    pub dropped_not_otm: usize,
    /// Rows with a missing or non-positive strike, or prices too extreme to
    /// compute an APR from.
    pub dropped_invalid_strike: usize,
    /// Set when the whole fetch degraded to an empty result.
    pub error: Option<FetchErrorCode>,
    /// Underlying price used, once resolved.
    pub underlying_price: Option<Decimal>,
    /// Days to expiry used, once computed.
    pub days_to_expiry: Option<i64>,
    /// When the fetch ran.
    pub fetched_at: DateTime<Utc>,
}

impl FetchStats {
    /// Creates empty counters for a key.
    #[must_use]
    pub fn new(key: StatsKey) -> Self {
        Self {
            key,
            total_rows: 0,
            kept: 0,
            dropped_missing_bid: 0,
            dropped_not_otm: 0,
            dropped_invalid_strike: 0,
            error: None,
            underlying_price: None,
            days_to_expiry: None,
            fetched_at: Utc::now(),
        }
    }

    /// Counts a dropped row.
    pub fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::MissingBid => self.dropped_missing_bid += 1,
            DropReason::NotOtm => self.dropped_not_otm += 1,
            DropReason::InvalidStrike => self.dropped_invalid_strike += 1,
        }
    }

    /// Number of rows dropped for any reason.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped_missing_bid + self.dropped_not_otm + self.dropped_invalid_strike
    }

    /// Count for one drop reason.
    #[must_use]
    pub const fn dropped_for(&self, reason: DropReason) -> usize {
        match reason {
            DropReason::MissingBid => self.dropped_missing_bid,
            DropReason::NotOtm => self.dropped_not_otm,
            DropReason::InvalidStrike => self.dropped_invalid_strike,
        }
    }

    /// Returns true if the fetch failed as a whole.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl std::fmt::Display for FetchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} rows, {} kept, {} missing_bid, {} not_otm, {} invalid_strike",
            self.key,
            self.total_rows,
            self.kept,
            self.dropped_missing_bid,
            self.dropped_not_otm,
            self.dropped_invalid_strike
        )?;
        if let Some(code) = self.error {
            write!(f, " [{code}]")?;
        }
        Ok(())
    }
}

/// Receives the diagnostics of every completed fetch.
pub trait StatsSink: Send + Sync {
    /// Records the stats of one fetch.
    fn record(&self, stats: &FetchStats);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStats;

impl StatsSink for NoopStats {
    fn record(&self, _stats: &FetchStats) {}
}

/// Keeps the latest [`FetchStats`] per [`StatsKey`].
///
/// Uses `DashMap` for thread-safe concurrent access. Concurrent fetches for the
/// same key race; the last write wins.
#[derive(Debug, Default)]
pub struct StatsRegistry {
    entries: DashMap<StatsKey, FetchStats>,
}

impl StatsRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of keys recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest stats for a key.
    #[must_use]
    pub fn get(&self, key: &StatsKey) -> Option<FetchStats> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    /// All recorded stats, sorted by strategy, symbol and expiry.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FetchStats> {
        let mut all: Vec<FetchStats> = self.entries.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| {
            (a.key.strategy.as_str(), &a.key.symbol, &a.key.expiry).cmp(&(
                b.key.strategy.as_str(),
                &b.key.symbol,
                &b.key.expiry,
            ))
        });
        all
    }

    /// Removes everything.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl StatsSink for StatsRegistry {
    fn record(&self, stats: &FetchStats) {
        self.entries.insert(stats.key.clone(), stats.clone());
    }
}
