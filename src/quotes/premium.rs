//! Premium derivation.
//!
//! The bid is what a seller can realistically get filled at. When a row has no
//! live bid the last traded price is used, and failing that the ask.

use super::row::OptionRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quote field the premium was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumSource {
    /// Best bid.
    Bid,
    /// Last traded price.
    Last,
    /// Best ask.
    Ask,
}

impl std::fmt::Display for PremiumSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PremiumSource {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PremiumSource::Bid => "bid",
            PremiumSource::Last => "last",
            PremiumSource::Ask => "ask",
        }
    }
}

type Extractor = fn(&OptionRow) -> Option<Decimal>;

fn bid(row: &OptionRow) -> Option<Decimal> {
    row.bid
}

fn last(row: &OptionRow) -> Option<Decimal> {
    row.last_price
}

fn ask(row: &OptionRow) -> Option<Decimal> {
    row.ask
}

/// Extractors in priority order.
const PREMIUM_CASCADE: [(PremiumSource, Extractor); 3] = [
    (PremiumSource::Bid, bid),
    (PremiumSource::Last, last),
    (PremiumSource::Ask, ask),
];

/// Returns the first present, strictly positive price among bid, last and ask.
///
/// # Examples
///
/// ```rust
/// use option_income::quotes::{derive_premium, OptionRow, PremiumSource};
/// use rust_decimal_macros::dec;
///
/// let row = OptionRow::new(dec!(110))
///     .with_bid(dec!(0))
///     .with_last_price(dec!(5))
///     .with_ask(dec!(6));
/// assert_eq!(derive_premium(&row), Some((dec!(5), PremiumSource::Last)));
/// ```
#[must_use]
pub fn derive_premium(row: &OptionRow) -> Option<(Decimal, PremiumSource)> {
    PREMIUM_CASCADE.iter().find_map(|(source, extract)| {
        extract(row)
            .filter(|price| price.is_sign_positive() && !price.is_zero())
            .map(|price| (price, *source))
    })
}
