//! Emission Loop
//!
//! The single background task of the driver. Each tick it snapshots the
//! registry, samples a price per market, and pushes one trade event per
//! market into the outbox. The pause between ticks is measured from the
//! end of a tick's processing, so cadence drifts by processing time
//! rather than holding a wall-clock schedule.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::subscription::MarketRegistry;
use crate::domain::trade::TradeEvent;
use crate::infrastructure::config::FeedSettings;
use crate::infrastructure::sampler::TradeSampler;

/// The driver's periodic emission task.
///
/// Runs until cancelled or until the outbox loses its receiver. Sends
/// apply backpressure: a slow consumer delays the tick, never the
/// registry (the snapshot lock is released before the first send).
pub struct TradeEmitter {
    settings: FeedSettings,
    registry: Arc<MarketRegistry>,
    sampler: TradeSampler,
    outbox: mpsc::Sender<TradeEvent>,
    cancel: CancellationToken,
}

impl TradeEmitter {
    /// Create an emitter over the given registry and outbox.
    #[must_use]
    pub const fn new(
        settings: FeedSettings,
        registry: Arc<MarketRegistry>,
        sampler: TradeSampler,
        outbox: mpsc::Sender<TradeEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            settings,
            registry,
            sampler,
            outbox,
            cancel,
        }
    }

    /// Run until cancelled or the outbox closes.
    ///
    /// The first tick runs immediately; every later tick starts one
    /// period after the previous tick finished processing.
    pub async fn run(self) {
        while !self.cancel.is_cancelled() {
            if self.emit_tick().await.is_err() {
                break;
            }

            tokio::select! {
                () = self.cancel.cancelled() => {
                    tracing::debug!("Emission loop cancelled");
                    break;
                }
                () = tokio::time::sleep(self.settings.tick_period) => {}
            }
        }
    }

    /// Emit one trade per currently-registered market, in registry order.
    ///
    /// Returns `Err(())` when the loop should exit: cancellation was
    /// requested mid-tick or the outbox has no receiver left.
    async fn emit_tick(&self) -> Result<(), ()> {
        let markets = self.registry.snapshot();
        tracing::trace!(markets = markets.len(), "Emission tick");

        for market in markets {
            let price = self.sampler.sample(&market);
            let event = TradeEvent::new(&market, price);

            tokio::select! {
                // A pending cancellation wins over a ready send.
                biased;

                () = self.cancel.cancelled() => {
                    tracing::debug!("Emission loop cancelled mid-tick");
                    return Err(());
                }
                sent = self.outbox.send(event) => {
                    if sent.is_err() {
                        tracing::warn!("Outbox closed, stopping emission loop");
                        return Err(());
                    }
                }
            }
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
