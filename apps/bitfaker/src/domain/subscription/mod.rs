//! Market Registry
//!
//! Ordered subscription state for the feed driver. The registry keeps
//! markets in subscription order and permits duplicates; each entry
//! independently produces one trade per tick. Callers that need
//! idempotent subscription check [`MarketRegistry::contains`] first.
//!
//! # Design
//!
//! Writers (`subscribe`/`unsubscribe`) take the write lock; the emission
//! loop takes the read lock only long enough to clone a snapshot, so a
//! slow consumer never blocks subscription changes. A snapshot reflects
//! the registry exactly as of lock acquisition: a concurrent subscribe
//! lands in the next snapshot, never the in-progress one.

use parking_lot::RwLock;

use super::market::Market;

/// Error returned for registry mutations that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionError {
    /// The market to remove is not currently subscribed.
    #[error("market {0} not found")]
    NotSubscribed(Market),
}

/// Ordered, thread-safe collection of subscribed markets.
#[derive(Debug, Default)]
pub struct MarketRegistry {
    markets: RwLock<Vec<Market>>,
}

impl MarketRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            markets: RwLock::new(Vec::new()),
        }
    }

    /// Append a market to the subscription order.
    ///
    /// Duplicates are permitted; each occurrence is quoted independently.
    pub fn subscribe(&self, market: Market) {
        self.markets.write().push(market);
    }

    /// Remove the first occurrence structurally equal to `market`,
    /// preserving the relative order of the remaining entries.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::NotSubscribed`] if no entry matches;
    /// the registry is left unchanged.
    pub fn unsubscribe(&self, market: &Market) -> Result<(), SubscriptionError> {
        let mut markets = self.markets.write();

        let Some(index) = markets.iter().position(|m| m == market) else {
            return Err(SubscriptionError::NotSubscribed(market.clone()));
        };

        markets.remove(index);
        Ok(())
    }

    /// Clone the current subscription order.
    ///
    /// The read lock is held only for the clone, never across sends.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Market> {
        self.markets.read().clone()
    }

    /// Whether `market` currently has at least one subscription entry.
    #[must_use]
    pub fn contains(&self, market: &Market) -> bool {
        self.markets.read().iter().any(|m| m == market)
    }

    /// Number of subscription entries (duplicates counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.markets.read().len()
    }

    /// Whether the registry has no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markets.read().is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
