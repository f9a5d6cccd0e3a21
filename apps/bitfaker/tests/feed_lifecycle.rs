//! Feed Driver Integration Tests
//!
//! Drives the public facade end to end: lifecycle, tick emission, and
//! subscription changes concurrent with a running loop.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::timeout;

use bitfaker::{
    DRIVER_SOURCE, DriverConfig, FeedDriver, FeedError, FeedSettings, Market, SamplerSettings,
    SubscriptionError, TradeEvent,
};

const TICK: Duration = Duration::from_millis(25);
const RECV_TIMEOUT: Duration = Duration::from_millis(500);

fn fast_config() -> DriverConfig {
    DriverConfig {
        feed: FeedSettings { tick_period: TICK },
        sampler: SamplerSettings::default(),
    }
}

fn setup_driver() -> (FeedDriver, mpsc::Receiver<TradeEvent>) {
    let (outbox, events) = mpsc::channel(256);
    (FeedDriver::new(fast_config(), outbox), events)
}

async fn recv_event(events: &mut mpsc::Receiver<TradeEvent>) -> TradeEvent {
    timeout(RECV_TIMEOUT, events.recv())
        .await
        .expect("timed out waiting for trade event")
        .expect("outbox closed unexpectedly")
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn start_registers_every_market() {
    let (driver, _events) = setup_driver();
    let markets = vec![Market::new("BTC", "USD"), Market::new("ETH", "USD")];

    driver.start(markets.clone()).unwrap();

    assert_eq!(driver.markets(), markets);
    assert!(driver.is_running());

    driver.stop().await;
}

#[tokio::test]
async fn start_with_no_markets_fails_and_emits_nothing() {
    let (driver, mut events) = setup_driver();

    let err = driver.start(vec![]).unwrap_err();
    assert!(matches!(err, FeedError::NoMarkets));

    // No loop was launched: several tick periods pass without an event.
    let received = timeout(TICK * 4, events.recv()).await;
    assert!(received.is_err());
}

#[tokio::test]
async fn second_start_does_not_launch_a_second_loop() {
    // Tick far in the future: only a second loop's immediate first
    // tick could produce a second event.
    let (outbox, mut events) = mpsc::channel(256);
    let config = DriverConfig {
        feed: FeedSettings {
            tick_period: Duration::from_secs(60),
        },
        sampler: SamplerSettings::default(),
    };
    let driver = FeedDriver::new(config, outbox);
    driver.start(vec![Market::new("BTC", "USD")]).unwrap();

    let err = driver.start(vec![Market::new("BTC", "USD")]).unwrap_err();
    assert!(matches!(err, FeedError::AlreadyStarted));

    recv_event(&mut events).await;
    let extra = timeout(Duration::from_millis(200), events.recv()).await;
    assert!(extra.is_err(), "only one emission loop may run");

    driver.stop().await;
}

#[tokio::test]
async fn stop_halts_emission() {
    let (driver, mut events) = setup_driver();
    driver.start(vec![Market::new("BTC", "USD")]).unwrap();

    recv_event(&mut events).await;
    driver.stop().await;
    assert!(!driver.is_running());

    // Drain whatever was buffered before the loop observed the cancel.
    while events.try_recv().is_ok() {}

    tokio::time::sleep(TICK * 4).await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

// =============================================================================
// Emission
// =============================================================================

#[tokio::test]
async fn reference_scenario_single_market_tick() {
    let (driver, mut events) = setup_driver();
    driver.start(vec![Market::new("BTC", "USD")]).unwrap();

    let event = recv_event(&mut events).await;

    assert_eq!(event.symbol, "BTCUSD");
    assert_eq!(event.price, Decimal::new(2213, 3)); // 2.213
    assert_eq!(event.source, DRIVER_SOURCE);

    driver.stop().await;
}

#[tokio::test]
async fn tick_covers_all_markets_in_subscription_order() {
    let (driver, mut events) = setup_driver();
    driver
        .start(vec![
            Market::new("BTC", "USD"),
            Market::new("ETH", "USD"),
            Market::new("SOL", "USDT"),
        ])
        .unwrap();

    let symbols = [
        recv_event(&mut events).await.symbol,
        recv_event(&mut events).await.symbol,
        recv_event(&mut events).await.symbol,
    ];

    assert_eq!(symbols, ["BTCUSD", "ETHUSD", "SOLUSDT"]);

    driver.stop().await;
}

#[tokio::test]
async fn custom_sampler_price_is_reported() {
    let (outbox, mut events) = mpsc::channel(256);
    let config = DriverConfig {
        feed: FeedSettings { tick_period: TICK },
        sampler: SamplerSettings {
            base_price: Decimal::new(421_50, 2), // 421.50
            jitter_bps: 0,
        },
    };
    let driver = FeedDriver::new(config, outbox);
    driver.start(vec![Market::new("ETH", "EUR")]).unwrap();

    let event = recv_event(&mut events).await;

    assert_eq!(event.symbol, "ETHEUR");
    assert_eq!(event.price, Decimal::new(421_50, 2));

    driver.stop().await;
}

// =============================================================================
// Concurrent subscription changes
// =============================================================================

#[tokio::test]
async fn subscribe_while_running_lands_in_a_later_tick() {
    let (driver, mut events) = setup_driver();
    driver.start(vec![Market::new("BTC", "USD")]).unwrap();

    // The first tick was snapshotted before this subscription.
    let first = recv_event(&mut events).await;
    assert_eq!(first.symbol, "BTCUSD");

    driver.subscribe(Market::new("ETH", "USD"));

    // The new market shows up on a following tick and is never lost.
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    loop {
        assert!(
            tokio::time::Instant::now() < deadline,
            "subscription was never picked up by the loop"
        );
        if recv_event(&mut events).await.symbol == "ETHUSD" {
            break;
        }
    }

    driver.stop().await;
}

#[tokio::test]
async fn unsubscribe_while_running_drops_the_market_from_later_ticks() {
    let (driver, mut events) = setup_driver();
    driver
        .start(vec![Market::new("BTC", "USD"), Market::new("ETH", "USD")])
        .unwrap();

    recv_event(&mut events).await;
    driver.unsubscribe(&Market::new("ETH", "USD")).unwrap();

    // Drain in-flight events, then expect BTC only.
    tokio::time::sleep(TICK * 2).await;
    while events.try_recv().is_ok() {}

    for _ in 0..3 {
        let event = recv_event(&mut events).await;
        assert_eq!(event.symbol, "BTCUSD");
    }

    driver.stop().await;
}

#[tokio::test]
async fn unsubscribe_unknown_market_reports_not_found() {
    let (driver, _events) = setup_driver();
    driver.start(vec![Market::new("BTC", "USD")]).unwrap();

    let err = driver.unsubscribe(&Market::new("XRP", "USD")).unwrap_err();

    assert!(matches!(
        err,
        FeedError::Subscription(SubscriptionError::NotSubscribed(ref m))
            if *m == Market::new("XRP", "USD")
    ));
    assert_eq!(driver.markets(), vec![Market::new("BTC", "USD")]);

    driver.stop().await;
}
