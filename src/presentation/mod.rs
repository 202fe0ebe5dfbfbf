//! Presentation layer.
//!
//! Formatting and truncation only; quotes arrive already filtered and ranked.
//!
//! - [`format_strike_with_percent`], [`format_currency`]: Cell formatting
//! - [`ExpiryTable`]: Top-N rows of one expiry
//! - [`ExplorerView`]: Everything one page render needs

mod format;
mod table;
mod view;

pub use format::{fixed2, format_currency, format_strike_with_percent, round2};
pub use table::{ExpiryTable, QuoteRow, TopN};
pub use view::{
    ExpiryOption, ExpirySection, ExplorerRequest, ExplorerView, Notice, NoticeLevel, apr_caption,
    default_expiries, expiry_label,
};
