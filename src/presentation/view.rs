//! Page-level view model of the explorer.
//!
//! Mirrors one interaction of the UI: read the user's choices, list expiries,
//! fetch every selected expiry one after the other, then lay out one table (or
//! notice) per expiry. Rendering to HTML or text happens elsewhere.

use super::format::format_currency;
use super::table::{ExpiryTable, TopN};
use crate::config::DisplayConfig;
use crate::quotes::{FetchStats, QuoteFetcher, Strategy};
use crate::utils::{days_to_expiry, parse_expiry};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Informational.
    Info,
    /// Something the user should fix or know about.
    Warning,
}

/// Message shown instead of, or next to, results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text.
    pub message: String,
}

impl Notice {
    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// User input for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerRequest {
    /// Selected strategy.
    pub strategy: Strategy,
    /// Trimmed, upper-cased ticker; may be empty.
    pub symbol: String,
    /// Rows per table.
    pub top_n: TopN,
    /// Explicitly selected expiries.
    pub expiries: Vec<String>,
    /// Symbol whose expiry multi-select was on the submitted form.
    ///
    /// When it matches `symbol`, `expiries` is the user's own selection and an
    /// empty one stays empty. Otherwise an empty selection means "use the
    /// defaults".
    #[serde(default)]
    pub submitted_symbol: Option<String>,
}

impl ExplorerRequest {
    /// Request with configured defaults.
    #[must_use]
    pub fn with_defaults(display: &DisplayConfig) -> Self {
        Self {
            strategy: Strategy::default(),
            symbol: display.default_symbol.clone(),
            top_n: TopN::new(display.default_top_n),
            expiries: Vec::new(),
            submitted_symbol: None,
        }
    }

    /// Builds a request from decoded query pairs.
    ///
    /// Recognized keys are `strategy`, `symbol`, `top_n`, the repeatable
    /// `expiries` and the form marker `submitted`. Unknown keys are ignored
    /// and unparseable values fall back to the defaults. A present but blank
    /// `symbol` stays blank.
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I, display: &DisplayConfig) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self::with_defaults(display);
        for (key, value) in pairs {
            match key {
                "strategy" => {
                    if let Ok(strategy) = value.parse() {
                        request.strategy = strategy;
                    }
                }
                "symbol" => request.symbol = value.trim().to_uppercase(),
                "top_n" => {
                    if let Ok(n) = value.trim().parse::<usize>() {
                        request.top_n = TopN::new(n);
                    }
                }
                "expiries" | "expiry" => {
                    let expiry = value.trim();
                    if !expiry.is_empty() && !request.expiries.iter().any(|e| e == expiry) {
                        request.expiries.push(expiry.to_string());
                    }
                }
                "submitted" => {
                    let symbol = value.trim().to_uppercase();
                    if !symbol.is_empty() {
                        request.submitted_symbol = Some(symbol);
                    }
                }
                _ => {}
            }
        }
        request
    }

    /// Returns true if `expiries` was chosen by the user for this symbol.
    #[must_use]
    pub fn has_user_selection(&self) -> bool {
        self.submitted_symbol.as_deref() == Some(self.symbol.as_str())
    }
}

/// One entry of the expiry multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryOption {
    /// Expiry as `YYYY-MM-DD`.
    pub value: String,
    /// `"2026-11-20 (33 days)"`.
    pub label: String,
    /// Whether it is part of the current selection.
    pub selected: bool,
}

/// What to show for one selected expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpirySection {
    /// Ranked quotes.
    Table(ExpiryTable),
    /// No quotes for this expiry.
    Empty {
        /// Expiry as requested.
        expiry: String,
        /// Message shown in place of the table.
        notice: Notice,
        /// Diagnostics of the fetch.
        stats: FetchStats,
    },
}

/// Everything the page needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerView {
    /// The input the view was built from, with defaults applied.
    pub request: ExplorerRequest,
    /// Expiry multi-select entries.
    pub expiry_options: Vec<ExpiryOption>,
    /// Underlying price of the first expiry that produced quotes.
    pub underlying_price: Option<Decimal>,
    /// How APR is computed for the selected strategy.
    pub apr_caption: Option<String>,
    /// One section per selected expiry, in selection order.
    pub sections: Vec<ExpirySection>,
    /// Page-level notices.
    pub notices: Vec<Notice>,
}

impl ExplorerView {
    fn empty(request: ExplorerRequest) -> Self {
        Self {
            request,
            expiry_options: Vec::new(),
            underlying_price: None,
            apr_caption: None,
            sections: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    /// Runs one interaction against `fetcher`.
    ///
    /// Selected expiries are fetched sequentially. On a first load for a
    /// symbol without a selection the first `display.default_expiry_count`
    /// listed expiries are used; a submitted empty selection is kept and
    /// answered with a notice.
    pub async fn load(
        fetcher: &QuoteFetcher,
        mut request: ExplorerRequest,
        display: &DisplayConfig,
    ) -> Self {
        if request.symbol.is_empty() {
            return Self::empty(request).with_notice(Notice::info(
                "Provide a ticker symbol to load available expirations.",
            ));
        }

        let expiries = fetcher.list_expiries(&request.symbol).await;
        if expiries.is_empty() {
            return Self::empty(request).with_notice(Notice::warning(
                "No options expirations found. Check the symbol and try again.",
            ));
        }

        if request.expiries.is_empty() && !request.has_user_selection() {
            request.expiries = default_expiries(&expiries, display.default_expiry_count);
        }

        let today = fetcher.today();
        let expiry_options = expiries
            .iter()
            .map(|expiry| ExpiryOption {
                value: expiry.clone(),
                label: expiry_label(expiry, today),
                selected: request.expiries.contains(expiry),
            })
            .collect();

        let mut view = Self::empty(request);
        view.expiry_options = expiry_options;

        if view.request.expiries.is_empty() {
            return view.with_notice(Notice::info(
                "Select at least one expiry to view option income data.",
            ));
        }

        let strategy = view.request.strategy;
        for expiry in &view.request.expiries {
            let outcome = fetcher
                .fetch_quotes(strategy, &view.request.symbol, expiry)
                .await;
            if view.underlying_price.is_none() {
                view.underlying_price = outcome.quotes.first().map(|q| q.underlying_price);
            }
            let table = ExpiryTable::build(
                strategy,
                expiry.as_str(),
                &outcome.quotes,
                view.request.top_n,
            );
            let section = match table {
                Some(table) => ExpirySection::Table(table),
                None => ExpirySection::Empty {
                    expiry: expiry.clone(),
                    notice: Notice::info(format!(
                        "No {} quotes found for {expiry}.",
                        strategy.name().to_lowercase()
                    )),
                    stats: outcome.stats,
                },
            };
            view.sections.push(section);
        }

        if view.underlying_price.is_none() {
            view.notices.push(Notice::warning(
                "No option quotes available for the selected expiries.",
            ));
        } else {
            view.apr_caption = Some(apr_caption(strategy).to_string());
        }
        view
    }

    /// Underlying price formatted as currency.
    #[must_use]
    pub fn underlying_price_label(&self) -> Option<String> {
        self.underlying_price.map(format_currency)
    }

    /// Tables only, skipping empty sections.
    pub fn tables(&self) -> impl Iterator<Item = &ExpiryTable> {
        self.sections.iter().filter_map(|section| match section {
            ExpirySection::Table(table) => Some(table),
            ExpirySection::Empty { .. } => None,
        })
    }

    /// Returns true if at least one expiry produced quotes.
    #[must_use]
    pub fn has_results(&self) -> bool {
        self.tables().next().is_some()
    }
}

/// How APR is computed for `strategy`.
#[must_use]
pub const fn apr_caption(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::CoveredCall => "APR = (premium / underlying price) * (365 / days to expiry).",
        Strategy::CashSecuredPut => "APR = (premium / strike price) * (365 / days to expiry).",
    }
}

/// First `count` expiries.
#[must_use]
pub fn default_expiries(expiries: &[String], count: usize) -> Vec<String> {
    expiries.iter().take(count).cloned().collect()
}

/// `"2026-11-20 (33 days)"`, or the bare expiry if it does not parse.
#[must_use]
pub fn expiry_label(expiry: &str, today: NaiveDate) -> String {
    match parse_expiry(expiry) {
        Ok(date) => format!("{expiry} ({} days)", days_to_expiry(date, today)),
        Err(_) => expiry.to_string(),
    }
}
