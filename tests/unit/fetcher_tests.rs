//! Integration tests for quote fetching against a snapshot provider.

use super::common::{provider, today};
use option_income::provider::{StaticProvider, SymbolSnapshot};
use option_income::quotes::{
    FetchErrorCode, OptionChain, OptionRow, PremiumSource, QuoteFetcher, StatsKey,
    StatsRegistry, Strategy,
};
use optionstratlib::OptionStyle;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn fetcher() -> QuoteFetcher {
    QuoteFetcher::new(Arc::new(provider())).with_today(today())
}

#[tokio::test]
async fn test_list_expiries_sorted() {
    let fetcher = fetcher();
    assert_eq!(
        fetcher.list_expiries("aapl").await,
        vec!["2026-11-17".to_string(), "2026-12-18".to_string()]
    );
    assert!(fetcher.list_expiries("MSFT").await.is_empty());
}

#[tokio::test]
async fn test_covered_calls_end_to_end() {
    let outcome = fetcher().fetch_covered_call_quotes("aapl", "2026-11-17").await;

    assert_eq!(outcome.quotes.len(), 2);
    let first = &outcome.quotes[0];
    assert_eq!(first.ticker, "AAPL");
    assert_eq!(first.option_type, OptionStyle::Call);
    assert_eq!(first.strike, dec!(105));
    assert_eq!(first.premium_source, PremiumSource::Bid);
    assert_eq!(first.days_to_expiry, 30);
    assert_eq!(first.break_even_price, dec!(98));
    assert_eq!(first.apr.round_dp(4), dec!(24.3333));

    let second = &outcome.quotes[1];
    assert_eq!(second.strike, dec!(110));
    assert_eq!(second.premium, dec!(1));
    assert_eq!(second.premium_source, PremiumSource::Last);

    let stats = &outcome.stats;
    assert_eq!(stats.total_rows, 5);
    assert_eq!(stats.kept, 2);
    assert_eq!(stats.dropped_missing_bid, 1);
    assert_eq!(stats.dropped_not_otm, 1);
    assert_eq!(stats.dropped_invalid_strike, 1);
    assert_eq!(stats.error, None);
    assert_eq!(stats.underlying_price, Some(dec!(100)));
}

#[tokio::test]
async fn test_cash_secured_puts_end_to_end() {
    let outcome = fetcher()
        .fetch_cash_secured_put_quotes("AAPL", "2026-11-17")
        .await;

    let strikes: Vec<Decimal> = outcome.quotes.iter().map(|q| q.strike).collect();
    assert_eq!(strikes, vec![dec!(95), dec!(90)]);
    assert!(outcome.quotes.iter().all(|q| q.option_type == OptionStyle::Put));
    assert_eq!(outcome.quotes[1].apr.round_dp(4), dec!(13.5185));
    assert_eq!(outcome.quotes[1].break_even_price, dec!(89));
    assert_eq!(outcome.stats.dropped_not_otm, 1);
}

#[tokio::test]
async fn test_quotes_are_ranked_by_apr() {
    let outcome = fetcher().fetch_covered_call_quotes("AAPL", "2026-11-17").await;
    assert!(outcome.quotes.windows(2).all(|w| w[0].apr >= w[1].apr));
}

#[tokio::test]
async fn test_missing_underlying_price_degrades() {
    let outcome = fetcher().fetch_covered_call_quotes("NOPRICE", "2026-11-17").await;
    assert!(outcome.is_empty());
    assert_eq!(
        outcome.stats.error,
        Some(FetchErrorCode::MissingUnderlyingPrice)
    );
}

#[tokio::test]
async fn test_unknown_expiry_is_chain_error() {
    let outcome = fetcher().fetch_covered_call_quotes("AAPL", "2027-01-15").await;
    assert!(outcome.is_empty());
    assert_eq!(outcome.stats.error, Some(FetchErrorCode::OptionChainError));
}

#[tokio::test]
async fn test_expiry_today_is_rejected() {
    let outcome = QuoteFetcher::new(Arc::new(provider()))
        .with_today(chrono::NaiveDate::from_ymd_opt(2026, 11, 17).unwrap())
        .fetch_covered_call_quotes("AAPL", "2026-11-17")
        .await;
    assert!(outcome.is_empty());
    assert_eq!(
        outcome.stats.error,
        Some(FetchErrorCode::NonPositiveDaysToExpiry)
    );
}

#[tokio::test]
async fn test_registry_keeps_latest_per_key() {
    let registry = Arc::new(StatsRegistry::new());
    let fetcher = fetcher().with_stats_sink(registry.clone());

    fetcher.fetch_covered_call_quotes("AAPL", "2026-11-17").await;
    fetcher.fetch_cash_secured_put_quotes("AAPL", "2026-11-17").await;
    fetcher.fetch_covered_call_quotes("aapl", "2026-11-17").await;

    assert_eq!(registry.len(), 2);
    let calls = registry
        .get(&StatsKey::new(Strategy::CoveredCall, "AAPL", "2026-11-17"))
        .unwrap();
    assert_eq!(calls.kept, 2);
}

#[tokio::test]
async fn test_repeated_fetches_are_identical() {
    let fetcher = fetcher();

    let first_calls = fetcher.fetch_covered_call_quotes("AAPL", "2026-11-17").await;
    let second_calls = fetcher.fetch_covered_call_quotes("AAPL", "2026-11-17").await;
    assert_eq!(first_calls.quotes, second_calls.quotes);
    assert_eq!(first_calls.stats.kept, second_calls.stats.kept);

    let first_puts = fetcher
        .fetch_cash_secured_put_quotes("AAPL", "2026-11-17")
        .await;
    let second_puts = fetcher
        .fetch_cash_secured_put_quotes("AAPL", "2026-11-17")
        .await;
    assert_eq!(first_puts.quotes, second_puts.quotes);
}

#[tokio::test]
async fn test_extreme_prices_do_not_abort_the_fetch() {
    let expiry = chrono::NaiveDate::from_ymd_opt(2026, 11, 17).unwrap();
    let chain = OptionChain::new(
        vec![
            OptionRow::new(Decimal::MAX).with_bid(Decimal::MAX / dec!(2)),
            OptionRow::new(dec!(2)).with_bid(dec!(0.1)),
        ],
        vec![],
    );
    let provider = StaticProvider::new().with_symbol(
        "TINY",
        SymbolSnapshot::with_last_price(dec!(1)).with_chain(expiry, chain),
    );

    let outcome = QuoteFetcher::new(Arc::new(provider))
        .with_today(today())
        .fetch_covered_call_quotes("TINY", "2026-11-17")
        .await;

    assert_eq!(outcome.quotes.len(), 1);
    assert_eq!(outcome.quotes[0].strike, dec!(2));
    assert_eq!(outcome.stats.dropped_invalid_strike, 1);
    assert_eq!(outcome.stats.error, None);
}
