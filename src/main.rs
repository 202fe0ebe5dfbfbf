//! Option income explorer CLI.
//!
//! Run with: `cargo run -- serve` and open http://127.0.0.1:8501

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use option_income::config::Config;
use option_income::presentation::{ExpiryTable, TopN, apr_caption, format_currency};
use option_income::provider::{MarketDataProvider, StaticProvider, YahooProvider};
use option_income::quotes::{QuoteFetcher, StatsRegistry, Strategy};
use option_income::web::{self, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Rank covered calls and cash-secured puts by annualized return.
#[derive(Parser)]
#[command(name = "option-income", version, about)]
struct Cli {
    /// Market-data base URL (overrides OPTION_INCOME_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// HTTP timeout in seconds (overrides OPTION_INCOME_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Serve data from a JSON snapshot instead of Yahoo Finance
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web UI
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// List option expiries for a symbol
    Expiries {
        /// Ticker symbol
        symbol: String,
    },

    /// Print ranked quotes for one or more expiries
    Quotes {
        /// Ticker symbol
        symbol: String,

        /// covered_call or cash_secured_put
        #[arg(long, short = 's', default_value = "covered_call")]
        strategy: Strategy,

        /// Expiry (YYYY-MM-DD); repeat for several. Defaults to the first three.
        #[arg(long, short = 'e')]
        expiry: Vec<String>,

        /// Rows per expiry (5-100)
        #[arg(long, short = 'n', default_value_t = TopN::DEFAULT)]
        top_n: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(url) = cli.base_url {
        config.provider.base_url = url;
    }
    if let Some(secs) = cli.timeout_secs {
        config.provider.timeout_secs = secs;
    }

    let provider: Arc<dyn MarketDataProvider> = match &cli.fixture {
        Some(path) => Arc::new(
            StaticProvider::from_json_file(path)
                .with_context(|| format!("loading fixture {}", path.display()))?,
        ),
        None => Arc::new(YahooProvider::new(&config.provider).context("creating provider")?),
    };

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate().context("validating configuration")?;

            let registry = Arc::new(StatsRegistry::new());
            let fetcher = QuoteFetcher::new(provider).with_stats_sink(registry.clone());
            let state = AppState::new(fetcher, registry, config.display.clone());
            web::serve(&config.server, state).await
        }
        Command::Expiries { symbol } => {
            let fetcher = QuoteFetcher::new(provider);
            let expiries = fetcher.list_expiries(&symbol).await;
            if expiries.is_empty() {
                println!("No options expirations found for {}.", symbol.to_uppercase());
            }
            for expiry in expiries {
                println!("{expiry}");
            }
            Ok(())
        }
        Command::Quotes {
            symbol,
            strategy,
            expiry,
            top_n,
        } => {
            let fetcher = QuoteFetcher::new(provider);
            let expiries = if expiry.is_empty() {
                let listed = fetcher.list_expiries(&symbol).await;
                listed
                    .into_iter()
                    .take(config.display.default_expiry_count)
                    .collect()
            } else {
                expiry
            };
            print_quotes(&fetcher, strategy, &symbol, &expiries, TopN::new(top_n)).await;
            Ok(())
        }
    }
}

async fn print_quotes(
    fetcher: &QuoteFetcher,
    strategy: Strategy,
    symbol: &str,
    expiries: &[String],
    top_n: TopN,
) {
    if expiries.is_empty() {
        println!("No options expirations found. Check the symbol and try again.");
        return;
    }

    let mut printed_header = false;
    for expiry in expiries {
        let outcome = fetcher.fetch_quotes(strategy, symbol, expiry).await;
        match ExpiryTable::build(strategy, expiry.as_str(), &outcome.quotes, top_n) {
            Some(table) => {
                if !printed_header {
                    println!(
                        "Underlying Price: {}",
                        format_currency(outcome.quotes[0].underlying_price)
                    );
                    println!("{}\n", apr_caption(strategy));
                    printed_header = true;
                }
                println!("{table}");
            }
            None => {
                let reason = outcome
                    .stats
                    .error
                    .map(|code| format!(" ({code})"))
                    .unwrap_or_default();
                println!(
                    "No {} quotes found for {expiry}{reason}.\n",
                    strategy.name().to_lowercase()
                );
            }
        }
    }
}
