//! Ranked per-expiry tables.

use super::format::{fixed2, format_strike_with_percent, round2};
use crate::config::{MAX_TOP_N, MIN_TOP_N};
use crate::quotes::{OptionQuote, PremiumSource, Strategy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of rows shown per table, clamped to `[5, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopN(usize);

impl TopN {
    /// Default row count.
    pub const DEFAULT: usize = 25;

    /// Creates a bound, clamping out-of-range values.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self(n.clamp(MIN_TOP_N, MAX_TOP_N))
    }

    /// The row count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// One display row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    /// Strike with percent distance from the underlying.
    pub strike: String,
    /// Premium rounded to cents.
    pub premium: Decimal,
    /// Quote field the premium was taken from.
    pub premium_source: PremiumSource,
    /// APR rounded to two decimals.
    pub apr: Decimal,
    /// Break-even rounded to cents.
    pub break_even: Decimal,
    /// Days to expiry.
    pub days_to_expiry: i64,
}

impl QuoteRow {
    /// Formats one quote.
    #[must_use]
    pub fn from_quote(quote: &OptionQuote) -> Self {
        Self {
            strike: format_strike_with_percent(quote.strike, Some(quote.underlying_price)),
            premium: round2(quote.premium),
            premium_source: quote.premium_source,
            apr: round2(quote.apr),
            break_even: round2(quote.break_even_price),
            days_to_expiry: quote.days_to_expiry,
        }
    }
}

/// Top rows of one expiry's ranked quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryTable {
    /// Strategy the quotes were priced for.
    pub strategy: Strategy,
    /// Expiry as `YYYY-MM-DD`.
    pub expiry: String,
    /// Days to expiry shared by all rows.
    pub days_to_expiry: i64,
    /// Rows in ranked order, at most top N.
    pub rows: Vec<QuoteRow>,
    /// Quotes available before truncation.
    pub total_quotes: usize,
}

impl ExpiryTable {
    /// Column headers.
    pub const HEADERS: [&'static str; 4] =
        ["Strike ($)", "Premium ($)", "APR (%)", "Days to Expiry"];

    /// Builds a table from already ranked quotes, keeping their order.
    ///
    /// Returns `None` for an empty quote list.
    #[must_use]
    pub fn build(
        strategy: Strategy,
        expiry: impl Into<String>,
        quotes: &[OptionQuote],
        top_n: TopN,
    ) -> Option<Self> {
        let first = quotes.first()?;
        Some(Self {
            strategy,
            expiry: expiry.into(),
            days_to_expiry: first.days_to_expiry,
            rows: quotes
                .iter()
                .take(top_n.get())
                .map(QuoteRow::from_quote)
                .collect(),
            total_quotes: quotes.len(),
        })
    }

    /// Table heading.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "{} - Expiry: {} - {} days remaining",
            self.strategy.name(),
            self.expiry,
            self.days_to_expiry
        )
    }

    /// Cell text per row, matching [`Self::HEADERS`].
    #[must_use]
    pub fn cells(&self) -> Vec<[String; 4]> {
        self.rows
            .iter()
            .map(|row| {
                [
                    row.strike.clone(),
                    fixed2(row.premium),
                    fixed2(row.apr),
                    row.days_to_expiry.to_string(),
                ]
            })
            .collect()
    }
}

impl std::fmt::Display for ExpiryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self.cells();
        let mut widths = Self::HEADERS.map(str::len);
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        writeln!(f, "{}", self.title())?;
        for (i, header) in Self::HEADERS.iter().enumerate() {
            write!(f, "{:>width$}  ", header, width = widths[i])?;
        }
        writeln!(f)?;
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                write!(f, "{:>width$}  ", cell, width = widths[i])?;
            }
            writeln!(f)?;
        }
        if self.total_quotes > self.rows.len() {
            writeln!(f, "({} of {} quotes shown)", self.rows.len(), self.total_quotes)?;
        }
        Ok(())
    }
}
