//! Quote fetching and APR computation.
//!
//! ## Flow
//!
//! ```text
//! QuoteFetcher::fetch_quotes(strategy, symbol, expiry)
//!   ├── MarketDataProvider::last_price / recent_daily_close  (underlying)
//!   ├── MarketDataProvider::option_chain                     (raw rows)
//!   └── price_rows
//!         ├── derive_premium   (bid → last → ask)
//!         ├── OTM filter       (calls: strike > spot, puts: 0 < strike < spot)
//!         └── stable sort by descending APR
//! ```
//!
//! ## APR
//!
//! - Covered call: `premium / underlying * 365 / days * 100`, break-even
//!   `underlying - premium`
//! - Cash-secured put: `premium / strike * 365 / days * 100`, break-even
//!   `strike - premium`
//!
//! ## Components
//!
//! - [`QuoteFetcher`]: Provider-backed fetch operations
//! - [`OptionQuote`]: One priced contract
//! - [`OptionRow`] / [`OptionChain`]: Raw provider rows
//! - [`FetchStats`] / [`StatsRegistry`]: Per-fetch diagnostics

mod fetcher;
mod premium;
mod quote;
mod row;
mod stats;

// Re-export all public types
pub use fetcher::{FetchOutcome, QuoteFetcher, price_rows};
pub use premium::{PremiumSource, derive_premium};
pub use quote::{OptionQuote, Strategy};
pub use row::{OptionChain, OptionRow};
pub use stats::{
    DropReason, FetchErrorCode, FetchStats, NoopStats, StatsKey, StatsRegistry, StatsSink,
};
