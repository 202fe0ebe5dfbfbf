//! Date utilities shared by the fetcher and the presentation layer.

use crate::error::{Error, Result};
use chrono::{NaiveDate, Utc};

/// Format used for expiry strings everywhere in the crate.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d";

/// Parses an expiry string in `YYYY-MM-DD` format.
///
/// # Errors
///
/// Returns `Error::InvalidExpiry` if the string is not a calendar date.
///
/// # Examples
///
/// ```rust
/// use option_income::utils::parse_expiry;
///
/// let date = parse_expiry("2026-11-20").unwrap();
/// assert_eq!(date.to_string(), "2026-11-20");
/// assert!(parse_expiry("20261120").is_err());
/// ```
pub fn parse_expiry(expiry: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(expiry.trim(), EXPIRY_FORMAT)
        .map_err(|_| Error::invalid_expiry(expiry))
}

/// Formats an expiry date as `YYYY-MM-DD`.
#[must_use]
pub fn format_expiry(expiry: NaiveDate) -> String {
    expiry.format(EXPIRY_FORMAT).to_string()
}

/// Whole calendar days from `today` until `expiry`, floored at zero.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use option_income::utils::days_to_expiry;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let expiry = NaiveDate::from_ymd_opt(2026, 11, 17).unwrap();
/// assert_eq!(days_to_expiry(expiry, today), 30);
/// assert_eq!(days_to_expiry(today.pred_opt().unwrap(), today), 0);
/// ```
#[must_use]
pub fn days_to_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days().max(0)
}

/// Current calendar date in UTC.
#[must_use]
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
