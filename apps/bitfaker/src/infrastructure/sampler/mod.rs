//! Synthetic Price Sampling
//!
//! Produces the price reported for each market on a tick. The sampler
//! is infallible: every call yields a price. With jitter disabled (the
//! default) it reports the configured base price unchanged, which keeps
//! test runs reproducible.

use rand::Rng;
use rust_decimal::Decimal;

use crate::domain::market::Market;
use crate::infrastructure::config::SamplerSettings;

/// Synthetic price source for the feed driver.
#[derive(Debug, Clone)]
pub struct TradeSampler {
    settings: SamplerSettings,
}

impl TradeSampler {
    /// Create a sampler from its settings.
    #[must_use]
    pub const fn new(settings: SamplerSettings) -> Self {
        Self { settings }
    }

    /// Produce a price for `market`.
    #[must_use]
    pub fn sample(&self, _market: &Market) -> Decimal {
        if self.settings.jitter_bps == 0 {
            return self.settings.base_price;
        }

        let half_width = i64::from(self.settings.jitter_bps);
        let offset_bps = rand::rng().random_range(-half_width..=half_width);

        // 1 basis point = 1e-4, so a scale-4 factor keeps the product exact.
        let factor = Decimal::new(10_000 + offset_bps, 4);
        (self.settings.base_price * factor).normalize()
    }
}

// =============================================================================
// Tests
// =============================================================================
