//! Feed Driver
//!
//! The public lifecycle surface of the synthetic feed. The driver owns
//! the market registry and the sampler, and manages the emission loop
//! task: `start` launches it exactly once, `stop` cancels it and waits
//! for it to wind down.
//!
//! # Lifecycle
//!
//! The driver is single-shot: one `start`, one `stop`. A second `start`
//! is rejected rather than silently launching a second loop. Stopping a
//! driver that was never started is a no-op.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::market::Market;
use crate::domain::subscription::{MarketRegistry, SubscriptionError};
use crate::domain::trade::TradeEvent;
use crate::infrastructure::config::DriverConfig;
use crate::infrastructure::sampler::TradeSampler;

mod emitter;

pub use emitter::TradeEmitter;

// =============================================================================
// Errors
// =============================================================================

/// Errors returned by the driver facade.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// `start` was called with an empty market set.
    #[error("no markets specified")]
    NoMarkets,

    /// `start` was called while the emission loop is already running.
    #[error("feed already started")]
    AlreadyStarted,

    /// A registry mutation failed.
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
}

// =============================================================================
// Feed Driver
// =============================================================================

/// Synthetic exchange feed driver.
///
/// # Example
///
/// ```rust,no_run
/// use bitfaker::{DriverConfig, FeedDriver, Market};
/// use tokio::sync::mpsc;
///
/// # async fn example() -> Result<(), bitfaker::FeedError> {
/// let (outbox, mut events) = mpsc::channel(64);
/// let driver = FeedDriver::new(DriverConfig::default(), outbox);
///
/// driver.start(vec![Market::new("BTC", "USD")])?;
/// let trade = events.recv().await;
/// driver.stop().await;
/// # Ok(())
/// # }
/// ```
pub struct FeedDriver {
    registry: Arc<MarketRegistry>,
    sampler: TradeSampler,
    config: DriverConfig,
    outbox: mpsc::Sender<TradeEvent>,
    cancel: CancellationToken,
    started: AtomicBool,
    emitter_handle: Mutex<Option<JoinHandle<()>>>,
}

impl FeedDriver {
    /// Create a driver that emits into `outbox`.
    #[must_use]
    pub fn new(config: DriverConfig, outbox: mpsc::Sender<TradeEvent>) -> Self {
        let sampler = TradeSampler::new(config.sampler.clone());

        Self {
            registry: Arc::new(MarketRegistry::new()),
            sampler,
            config,
            outbox,
            cancel: CancellationToken::new(),
            started: AtomicBool::new(false),
            emitter_handle: Mutex::new(None),
        }
    }

    /// Register `markets` and launch the emission loop.
    ///
    /// Every market is subscribed before the loop task is spawned, so
    /// the registry holds the full set when this returns. The call does
    /// not block on emission; the first tick runs on the spawned task.
    ///
    /// # Errors
    ///
    /// [`FeedError::NoMarkets`] if `markets` is empty and
    /// [`FeedError::AlreadyStarted`] on any second call. No loop is
    /// launched in either case.
    pub fn start(&self, markets: Vec<Market>) -> Result<(), FeedError> {
        if markets.is_empty() {
            return Err(FeedError::NoMarkets);
        }

        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(FeedError::AlreadyStarted);
        }

        for market in markets {
            self.subscribe(market);
        }

        let emitter = TradeEmitter::new(
            self.config.feed.clone(),
            Arc::clone(&self.registry),
            self.sampler.clone(),
            self.outbox.clone(),
            self.cancel.clone(),
        );
        *self.emitter_handle.lock() = Some(tokio::spawn(emitter.run()));

        tracing::info!(
            markets = self.registry.len(),
            period = ?self.config.feed.tick_period,
            "Feed driver started"
        );
        Ok(())
    }

    /// Stop the emission loop and wait for it to wind down.
    ///
    /// Cancellation is observed at tick boundaries and around each
    /// in-flight send, so termination is prompt even with a stalled
    /// consumer. The registry keeps its subscriptions, so callers can
    /// still inspect what was being quoted.
    pub async fn stop(&self) {
        if !self.started.load(Ordering::SeqCst) {
            return;
        }

        self.cancel.cancel();

        let handle = self.emitter_handle.lock().take();
        let Some(handle) = handle else { return };

        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "Emission loop did not shut down cleanly");
        }
        tracing::info!("Feed driver stopped");
    }

    /// Subscribe `market` for quoting.
    ///
    /// Usable before or after `start`; visible to the next tick of the
    /// emission loop. Duplicates are permitted and quoted independently.
    pub fn subscribe(&self, market: Market) {
        tracing::debug!(market = %market, "Market subscribed");
        self.registry.subscribe(market);
    }

    /// Remove the first subscription entry equal to `market`.
    ///
    /// # Errors
    ///
    /// [`SubscriptionError::NotSubscribed`] if no entry matches; the
    /// registry is left unchanged.
    pub fn unsubscribe(&self, market: &Market) -> Result<(), FeedError> {
        self.registry.unsubscribe(market)?;
        tracing::debug!(market = %market, "Market unsubscribed");
        Ok(())
    }

    /// Whether the emission loop has been started and not yet stopped.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::SeqCst) && !self.cancel.is_cancelled()
    }

    /// Markets currently registered, in subscription order.
    #[must_use]
    pub fn markets(&self) -> Vec<Market> {
        self.registry.snapshot()
    }
}

impl std::fmt::Debug for FeedDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedDriver")
            .field("is_running", &self.is_running())
            .field("markets", &self.registry.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
