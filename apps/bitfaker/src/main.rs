//! Bitfaker Binary
//!
//! Hosts the synthetic feed driver: starts it with a market list from
//! the environment and prints each emitted trade as a JSON line.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p bitfaker
//! ```
//!
//! # Environment Variables
//!
//! - `BITFAKER_MARKETS`: Comma-separated `BASE/QUOTE` pairs (default: BTC/USD)
//! - `BITFAKER_TICK_MS`: Tick period in milliseconds (default: 5000)
//! - `BITFAKER_PRICE`: Base price reported per trade (default: 2.213)
//! - `BITFAKER_JITTER_BPS`: Price jitter half-width in basis points (default: 0)
//! - `RUST_LOG`: Log level (default: info)

use anyhow::Context;
use bitfaker::infrastructure::telemetry;
use bitfaker::{DriverConfig, FeedDriver, Market, TradeEvent};
use tokio::signal;
use tokio::sync::mpsc;

/// Capacity of the outbox between the driver and the consumer.
const OUTBOX_CAPACITY: usize = 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    telemetry::init();

    tracing::info!("Starting bitfaker");

    let config = DriverConfig::from_env()?;
    let markets = markets_from_env()?;
    log_config(&config, &markets);

    let (outbox, events) = mpsc::channel::<TradeEvent>(OUTBOX_CAPACITY);

    let driver = FeedDriver::new(config, outbox);
    driver.start(markets)?;

    let consumer = tokio::spawn(print_events(events));

    await_shutdown().await;

    driver.stop().await;
    // Dropping the driver releases the last outbox sender so the
    // consumer drains the channel and exits.
    drop(driver);
    consumer.await.context("event consumer panicked")?;

    tracing::info!("Bitfaker stopped");
    Ok(())
}

/// Print each trade event as a JSON line on stdout.
async fn print_events(mut events: mpsc::Receiver<TradeEvent>) {
    while let Some(event) = events.recv().await {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!(error = %e, "Failed to serialize trade event"),
        }
    }
}

/// Parse the market list from `BITFAKER_MARKETS`.
fn markets_from_env() -> anyhow::Result<Vec<Market>> {
    let raw = std::env::var("BITFAKER_MARKETS").unwrap_or_else(|_| "BTC/USD".to_string());

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Market>()
                .with_context(|| format!("BITFAKER_MARKETS entry '{s}'"))
        })
        .collect()
}

/// Log the parsed configuration.
fn log_config(config: &DriverConfig, markets: &[Market]) {
    tracing::info!(
        markets = markets.len(),
        period = ?config.feed.tick_period,
        price = %config.sampler.base_price,
        jitter_bps = config.sampler.jitter_bps,
        "Configuration loaded"
    );
}

/// Load a .env file when present.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Wait for a shutdown signal (SIGTERM or Ctrl+C).
#[allow(clippy::expect_used)]
async fn await_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
