//! Yahoo Finance provider.
//!
//! Uses the unofficial query endpoints. Data is delayed and intended for
//! personal use.

use super::MarketDataProvider;
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::quotes::{OptionChain, OptionRow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Yahoo Finance HTTP client.
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    /// Creates a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "yahoo request");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn options_result(&self, symbol: &str, date: Option<i64>) -> Result<OptionsResult> {
        let mut url = format!("{}/v7/finance/options/{}", self.base_url, symbol);
        if let Some(ts) = date {
            url.push_str(&format!("?date={ts}"));
        }
        let response: OptionsResponse = self.get_json(&url).await?;
        response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| Error::no_data(format!("no options data for {symbol}")))
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn last_price(&self, symbol: &str) -> Result<Option<Decimal>> {
        let url = format!("{}/v7/finance/quote?symbols={}", self.base_url, symbol);
        let response: QuoteResponse = self.get_json(&url).await?;

        Ok(response
            .quote_response
            .result
            .into_iter()
            .next()
            .and_then(|q| q.regular_market_price)
            .and_then(to_decimal))
    }

    async fn recent_daily_close(&self, symbol: &str) -> Result<Option<Decimal>> {
        let url = format!(
            "{}/v8/finance/chart/{}?range=5d&interval=1d",
            self.base_url, symbol
        );
        let response: ChartResponse = self.get_json(&url).await?;

        let closes = response
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|r| r.indicators.quote.into_iter().next())
            .map(|q| q.close)
            .unwrap_or_default();

        Ok(closes.into_iter().rev().flatten().find_map(to_decimal))
    }

    async fn list_expiries(&self, symbol: &str) -> Result<Vec<NaiveDate>> {
        let result = self.options_result(symbol, None).await?;
        Ok(result
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect())
    }

    async fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> Result<OptionChain> {
        let ts = expiry
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| Error::invalid_expiry(expiry.to_string()))?
            .and_utc()
            .timestamp();

        let result = self.options_result(symbol, Some(ts)).await?;
        let options = result
            .options
            .into_iter()
            .next()
            .ok_or_else(|| Error::no_data(format!("no option chain for {symbol} {expiry}")))?;

        Ok(OptionChain::new(
            options.calls.iter().map(convert_row).collect(),
            options.puts.iter().map(convert_row).collect(),
        ))
    }
}

fn to_decimal(value: f64) -> Option<Decimal> {
    if value.is_finite() {
        Decimal::from_f64(value)
    } else {
        None
    }
}

fn convert_row(data: &OptionData) -> OptionRow {
    OptionRow {
        strike: data.strike.and_then(to_decimal),
        bid: data.bid.and_then(to_decimal),
        ask: data.ask.and_then(to_decimal),
        last_price: data.last_price.and_then(to_decimal),
        implied_volatility: data.implied_volatility.filter(|iv| iv.is_finite()),
    }
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResult,
}

#[derive(Debug, Deserialize)]
struct QuoteResult {
    #[serde(default)]
    result: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: OptionsBody,
}

#[derive(Debug, Deserialize)]
struct OptionsBody {
    #[serde(default)]
    result: Vec<OptionsResult>,
}

#[derive(Debug, Deserialize)]
struct OptionsResult {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<OptionsBlock>,
}

#[derive(Debug, Deserialize)]
struct OptionsBlock {
    #[serde(default)]
    calls: Vec<OptionData>,
    #[serde(default)]
    puts: Vec<OptionData>,
}

#[derive(Debug, Deserialize)]
struct OptionData {
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}
