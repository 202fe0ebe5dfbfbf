//! Raw option-chain rows as handed over by a market-data provider.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One unfiltered option-chain row. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionRow {
    /// Strike price.
    pub strike: Option<Decimal>,
    /// Best bid.
    pub bid: Option<Decimal>,
    /// Best ask.
    pub ask: Option<Decimal>,
    /// Last traded price.
    pub last_price: Option<Decimal>,
    /// Implied volatility as a fraction (0.25 = 25%).
    pub implied_volatility: Option<f64>,
}

impl OptionRow {
    /// Creates a row with only a strike set.
    #[must_use]
    pub fn new(strike: Decimal) -> Self {
        Self {
            strike: Some(strike),
            ..Self::default()
        }
    }

    /// Sets the bid.
    #[must_use]
    pub fn with_bid(mut self, bid: Decimal) -> Self {
        self.bid = Some(bid);
        self
    }

    /// Sets the ask.
    #[must_use]
    pub fn with_ask(mut self, ask: Decimal) -> Self {
        self.ask = Some(ask);
        self
    }

    /// Sets the last traded price.
    #[must_use]
    pub fn with_last_price(mut self, last_price: Decimal) -> Self {
        self.last_price = Some(last_price);
        self
    }

    /// Sets the implied volatility.
    #[must_use]
    pub fn with_implied_volatility(mut self, iv: f64) -> Self {
        self.implied_volatility = Some(iv);
        self
    }
}

/// Call and put rows for a single expiration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Call rows.
    pub calls: Vec<OptionRow>,
    /// Put rows.
    pub puts: Vec<OptionRow>,
}

impl OptionChain {
    /// Creates a chain from call and put rows.
    #[must_use]
    pub fn new(calls: Vec<OptionRow>, puts: Vec<OptionRow>) -> Self {
        Self { calls, puts }
    }

    /// Total number of rows on both sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len() + self.puts.len()
    }

    /// Returns true if the chain has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}
