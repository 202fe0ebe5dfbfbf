//! Priced quote records and the strategies that produce them.

use super::premium::PremiumSource;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use optionstratlib::OptionStyle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Option-selling strategy whose annualized return is being ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Sell calls against held shares. APR basis is the underlying price.
    #[default]
    CoveredCall,
    /// Sell puts against held cash. APR basis is the strike.
    CashSecuredPut,
}

impl Strategy {
    /// All strategies, in UI order.
    pub const ALL: [Strategy; 2] = [Strategy::CoveredCall, Strategy::CashSecuredPut];

    /// The option side this strategy sells.
    #[must_use]
    pub const fn option_style(self) -> OptionStyle {
        match self {
            Strategy::CoveredCall => OptionStyle::Call,
            Strategy::CashSecuredPut => OptionStyle::Put,
        }
    }

    /// Human readable name ("Covered Call").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::CoveredCall => "Covered Call",
            Strategy::CashSecuredPut => "Cash-Secured Put",
        }
    }

    /// Stable identifier used in query strings and JSON ("covered_call").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::CoveredCall => "covered_call",
            Strategy::CashSecuredPut => "cash_secured_put",
        }
    }

    /// Short side label ("call" / "put").
    #[must_use]
    pub const fn side_label(self) -> &'static str {
        match self {
            Strategy::CoveredCall => "call",
            Strategy::CashSecuredPut => "put",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "covered_call" | "cc" | "call" | "calls" => Ok(Strategy::CoveredCall),
            "cash_secured_put" | "csp" | "put" | "puts" => Ok(Strategy::CashSecuredPut),
            _ => Err(Error::invalid_input(format!("unknown strategy '{s}'"))),
        }
    }
}

/// One priced, out-of-the-money contract.
///
/// Built once per fetch and never mutated afterwards. For calls the strike is
/// strictly above `underlying_price`; for puts it lies strictly between zero
/// and `underlying_price`. `premium` is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Upper-cased ticker symbol.
    pub ticker: String,
    /// Call or put.
    pub option_type: OptionStyle,
    /// Expiration date.
    pub expiry: NaiveDate,
    /// Strike price.
    pub strike: Decimal,
    /// Premium received for selling one contract unit.
    pub premium: Decimal,
    /// Which quote field supplied the premium.
    pub premium_source: PremiumSource,
    /// Underlying price snapshot used for the computation.
    pub underlying_price: Decimal,
    /// Calendar days until expiry, always positive for emitted quotes.
    pub days_to_expiry: i64,
    /// Annualized return in percent.
    pub apr: Decimal,
    /// Price at which the position neither gains nor loses.
    pub break_even_price: Decimal,
    /// Raw bid, as reported by the provider.
    pub bid: Option<Decimal>,
    /// Raw ask, as reported by the provider.
    pub ask: Option<Decimal>,
    /// Raw implied volatility, as reported by the provider.
    pub implied_vol: Option<f64>,
}

impl OptionQuote {
    /// Returns true for call quotes.
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self.option_type, OptionStyle::Call)
    }

    /// Strike distance from the underlying, in percent of the underlying.
    ///
    /// Returns `None` when the underlying price is zero.
    #[must_use]
    pub fn strike_percent_diff(&self) -> Option<Decimal> {
        if self.underlying_price.is_zero() {
            return None;
        }
        Some((self.strike - self.underlying_price) / self.underlying_price * Decimal::ONE_HUNDRED)
    }
}
