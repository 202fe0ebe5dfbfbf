//! Error types for the option income library.
//!
//! Quote fetching itself never fails: every failure there degrades to an empty
//! result plus a [`crate::quotes::FetchErrorCode`]. The [`Error`] type below is
//! what the provider, configuration and date helpers return so that the
//! fetcher can match on typed failures instead of swallowing them.

use thiserror::Error;

/// Result type alias for option income operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the option income library.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure talking to the market-data provider.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered, but not with what was asked for.
    #[error("provider error: {0}")]
    Provider(String),

    /// A provider response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Expiry string is not a `YYYY-MM-DD` date.
    #[error("invalid expiry: {0}")]
    InvalidExpiry(String),

    /// No data available for the request.
    #[error("no data available: {0}")]
    NoDataAvailable(String),

    /// Configuration value could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Creates a network error.
    #[must_use]
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Creates a provider error.
    #[must_use]
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates an invalid expiry error.
    #[must_use]
    pub fn invalid_expiry(expiry: impl Into<String>) -> Self {
        Self::InvalidExpiry(expiry.into())
    }

    /// Creates a no data available error.
    #[must_use]
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoDataAvailable(msg.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else if err.is_status() {
            Self::Provider(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
