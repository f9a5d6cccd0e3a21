//! Synthetic Trade Events
//!
//! The outbound message type of the driver. One event is created per
//! subscribed market per tick and handed to the consumer over the
//! outbox channel; the consumer owns it once sent.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::market::Market;

/// Source tag identifying this driver as the origin of an event.
pub const DRIVER_SOURCE: &str = "bitfaker";

/// One synthetic trade reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Concatenated market symbol (e.g. `BTCUSD`).
    pub symbol: String,
    /// Synthetic trade price.
    pub price: Decimal,
    /// Origin tag, always [`DRIVER_SOURCE`].
    pub source: String,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
}

impl TradeEvent {
    /// Build a fresh event for `market` at `price`.
    #[must_use]
    pub fn new(market: &Market, price: Decimal) -> Self {
        Self {
            symbol: market.symbol(),
            price,
            source: DRIVER_SOURCE.to_string(),
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
