//! Quote fetcher.
//!
//! Resolves the underlying price, pulls one side of the option chain and turns
//! the raw rows into ranked [`OptionQuote`]s. Nothing here returns an error:
//! every failure degrades to an empty quote list and is reported through
//! [`FetchStats::error`].

use super::premium::{PremiumSource, derive_premium};
use super::quote::{OptionQuote, Strategy};
use super::row::OptionRow;
use super::stats::{DropReason, FetchErrorCode, FetchStats, NoopStats, StatsKey, StatsSink};
use crate::provider::MarketDataProvider;
use crate::utils::{days_to_expiry, format_expiry, parse_expiry, today_utc};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DAYS_PER_YEAR: i64 = 365;

/// Quotes of one fetch together with its diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Quotes ranked by descending APR.
    pub quotes: Vec<OptionQuote>,
    /// What happened while producing them.
    pub stats: FetchStats,
}

impl FetchOutcome {
    fn failed(mut stats: FetchStats, code: FetchErrorCode) -> Self {
        stats.error = Some(code);
        Self {
            quotes: Vec::new(),
            stats,
        }
    }

    /// Returns true if no quote survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Drops the diagnostics and keeps the quotes.
    #[must_use]
    pub fn into_quotes(self) -> Vec<OptionQuote> {
        self.quotes
    }
}

/// Prices raw rows for one strategy.
///
/// `underlying` must be positive and `days` at least one; callers go through
/// [`QuoteFetcher`] which guarantees both. Rows are filtered in this order:
/// premium (`missing_bid`), strike presence (`invalid_strike`), moneyness
/// (`not_otm`), and for puts a strictly positive strike (`invalid_strike`).
/// Rows whose APR or break-even overflows `Decimal` also count as
/// `invalid_strike`.
/// Survivors are sorted by descending APR with a stable sort, so equal APRs
/// keep their row order.
#[must_use]
pub fn price_rows(
    strategy: Strategy,
    key: StatsKey,
    expiry: NaiveDate,
    underlying: Decimal,
    days: i64,
    rows: &[OptionRow],
) -> FetchOutcome {
    let mut stats = FetchStats::new(key);
    stats.total_rows = rows.len();
    stats.underlying_price = Some(underlying);
    stats.days_to_expiry = Some(days);

    let annualize = Decimal::from(DAYS_PER_YEAR) / Decimal::from(days);
    let mut quotes = Vec::with_capacity(rows.len());

    for row in rows {
        match price_row(strategy, row, underlying, annualize) {
            Ok(priced) => quotes.push(OptionQuote {
                ticker: stats.key.symbol.clone(),
                option_type: strategy.option_style(),
                expiry,
                strike: priced.strike,
                premium: priced.premium,
                premium_source: priced.source,
                underlying_price: underlying,
                days_to_expiry: days,
                apr: priced.apr,
                break_even_price: priced.break_even,
                bid: row.bid,
                ask: row.ask,
                implied_vol: row.implied_volatility,
            }),
            Err(reason) => stats.record_drop(reason),
        }
    }

    quotes.sort_by(|a, b| b.apr.cmp(&a.apr));
    stats.kept = quotes.len();

    FetchOutcome { quotes, stats }
}

struct Priced {
    strike: Decimal,
    premium: Decimal,
    source: PremiumSource,
    apr: Decimal,
    break_even: Decimal,
}

fn price_row(
    strategy: Strategy,
    row: &OptionRow,
    underlying: Decimal,
    annualize: Decimal,
) -> Result<Priced, DropReason> {
    let (premium, source) = derive_premium(row).ok_or(DropReason::MissingBid)?;
    let strike = row.strike.ok_or(DropReason::InvalidStrike)?;

    let (basis, break_even) = match strategy {
        Strategy::CoveredCall => {
            if strike <= underlying {
                return Err(DropReason::NotOtm);
            }
            let break_even = underlying
                .checked_sub(premium)
                .ok_or(DropReason::InvalidStrike)?;
            (underlying, break_even)
        }
        Strategy::CashSecuredPut => {
            if strike >= underlying {
                return Err(DropReason::NotOtm);
            }
            if strike <= Decimal::ZERO {
                return Err(DropReason::InvalidStrike);
            }
            let break_even = strike
                .checked_sub(premium)
                .ok_or(DropReason::InvalidStrike)?;
            (strike, break_even)
        }
    };

    // Extreme provider values can overflow Decimal; such rows are unusable.
    let apr = premium
        .checked_div(basis)
        .and_then(|ratio| ratio.checked_mul(annualize))
        .and_then(|yearly| yearly.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(DropReason::InvalidStrike)?;

    Ok(Priced {
        strike,
        premium,
        source,
        apr,
        break_even,
    })
}

/// Fetches and ranks option-income quotes from a [`MarketDataProvider`].
///
/// Each call talks to the provider afresh; nothing is cached between calls.
pub struct QuoteFetcher {
    provider: Arc<dyn MarketDataProvider>,
    stats_sink: Arc<dyn StatsSink>,
    today: Option<NaiveDate>,
}

impl QuoteFetcher {
    /// Creates a fetcher that discards diagnostics.
    #[must_use]
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            stats_sink: Arc::new(NoopStats),
            today: None,
        }
    }

    /// Publishes the stats of every fetch to `sink`.
    #[must_use]
    pub fn with_stats_sink(mut self, sink: Arc<dyn StatsSink>) -> Self {
        self.stats_sink = sink;
        self
    }

    /// Pins the date used for days-to-expiry instead of the current UTC date.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The provider quotes are fetched from.
    #[must_use]
    pub fn provider(&self) -> &dyn MarketDataProvider {
        self.provider.as_ref()
    }

    /// Date days-to-expiry is counted from.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(today_utc)
    }

    /// Lists expiries as ascending `YYYY-MM-DD` strings.
    ///
    /// Provider failures are logged and yield an empty list.
    pub async fn list_expiries(&self, symbol: &str) -> Vec<String> {
        let symbol = normalize_symbol(symbol);
        match self.provider.list_expiries(&symbol).await {
            Ok(mut dates) => {
                dates.sort_unstable();
                dates.dedup();
                dates.into_iter().map(format_expiry).collect()
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    %symbol,
                    error = %e,
                    "failed to list expiries"
                );
                Vec::new()
            }
        }
    }

    /// Covered-call quotes for one expiry, ranked by descending APR.
    pub async fn fetch_covered_call_quotes(&self, symbol: &str, expiry: &str) -> FetchOutcome {
        self.fetch_quotes(Strategy::CoveredCall, symbol, expiry).await
    }

    /// Cash-secured-put quotes for one expiry, ranked by descending APR.
    pub async fn fetch_cash_secured_put_quotes(&self, symbol: &str, expiry: &str) -> FetchOutcome {
        self.fetch_quotes(Strategy::CashSecuredPut, symbol, expiry)
            .await
    }

    /// Quotes for `strategy`; the stats are also published to the sink.
    pub async fn fetch_quotes(
        &self,
        strategy: Strategy,
        symbol: &str,
        expiry: &str,
    ) -> FetchOutcome {
        let outcome = self.run_fetch(strategy, symbol, expiry).await;
        match outcome.stats.error {
            Some(code) => info!(stats = %outcome.stats, %code, "fetch returned no quotes"),
            None => info!(stats = %outcome.stats, "fetch complete"),
        }
        self.stats_sink.record(&outcome.stats);
        outcome
    }

    async fn run_fetch(&self, strategy: Strategy, symbol: &str, expiry: &str) -> FetchOutcome {
        let key = StatsKey::new(strategy, symbol, expiry);
        let symbol = key.symbol.clone();

        let Ok(expiry_date) = parse_expiry(expiry) else {
            warn!(%symbol, expiry, "unparseable expiry");
            return FetchOutcome::failed(FetchStats::new(key), FetchErrorCode::InvalidExpiry);
        };

        let Some(underlying) = self.resolve_underlying_price(&symbol).await else {
            return FetchOutcome::failed(
                FetchStats::new(key),
                FetchErrorCode::MissingUnderlyingPrice,
            );
        };

        let chain = match self.provider.option_chain(&symbol, expiry_date).await {
            Ok(chain) => chain,
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    %symbol,
                    %expiry_date,
                    error = %e,
                    "failed to load option chain"
                );
                let mut stats = FetchStats::new(key);
                stats.underlying_price = Some(underlying);
                return FetchOutcome::failed(stats, FetchErrorCode::OptionChainError);
            }
        };
        let rows = match strategy {
            Strategy::CoveredCall => &chain.calls,
            Strategy::CashSecuredPut => &chain.puts,
        };

        let days = days_to_expiry(expiry_date, self.today());
        if days == 0 {
            debug!(%symbol, %expiry_date, "expiry is not in the future");
            let mut stats = FetchStats::new(key);
            stats.total_rows = rows.len();
            stats.underlying_price = Some(underlying);
            stats.days_to_expiry = Some(0);
            return FetchOutcome::failed(stats, FetchErrorCode::NonPositiveDaysToExpiry);
        }

        let outcome = price_rows(strategy, key, expiry_date, underlying, days, rows);
        debug!(
            missing_bid = outcome.stats.dropped_missing_bid,
            not_otm = outcome.stats.dropped_not_otm,
            invalid_strike = outcome.stats.dropped_invalid_strike,
            "rows dropped"
        );
        outcome
    }

    /// Last price if positive, else the most recent positive daily close.
    async fn resolve_underlying_price(&self, symbol: &str) -> Option<Decimal> {
        match self.provider.last_price(symbol).await {
            Ok(Some(price)) if is_positive(price) => return Some(price),
            Ok(_) => debug!(%symbol, "no last price, falling back to daily close"),
            Err(e) => debug!(%symbol, error = %e, "last price lookup failed"),
        }

        match self.provider.recent_daily_close(symbol).await {
            Ok(Some(price)) if is_positive(price) => Some(price),
            Ok(_) => {
                warn!(%symbol, "no underlying price available");
                None
            }
            Err(e) => {
                warn!(%symbol, error = %e, "daily close lookup failed");
                None
            }
        }
    }
}

fn is_positive(value: Decimal) -> bool {
    value > Decimal::ZERO
}

fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
