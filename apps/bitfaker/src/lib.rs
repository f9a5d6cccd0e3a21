#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::default_trait_access
    )
)]

//! Bitfaker - Synthetic Market Data Driver
//!
//! A local stand-in for a real exchange price feed, for testing and
//! development. The driver keeps an ordered registry of subscribed
//! markets and, on a fixed tick, emits one synthetic trade per market
//! into a caller-supplied channel. It never touches a network; with
//! jitter disabled (the default) prices are deterministic.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Core market data types and subscription state
//!   - `market`: base/quote market identifiers
//!   - `trade`: synthetic trade events
//!   - `subscription`: the ordered market registry
//!
//! - **Infrastructure**: Configuration and the feed driver
//!   - `config`: environment-driven settings
//!   - `sampler`: synthetic price generation
//!   - `feed`: driver facade and the emission loop
//!   - `telemetry`: tracing subscriber setup
//!
//! # Data Flow
//!
//! ```text
//! Registry ──snapshot──┐
//!                      │    ┌─────────────┐     ┌──────────────┐
//!                      ├───►│  Emission   │────►│ mpsc outbox  │──► consumer
//! Sampler ──prices─────┘    │    Loop     │     └──────────────┘
//!                           └─────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Core market data types and subscription state.
pub mod domain;

/// Infrastructure layer - Configuration, sampling, and the feed driver.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::market::{Market, MarketParseError};
pub use domain::subscription::{MarketRegistry, SubscriptionError};
pub use domain::trade::{DRIVER_SOURCE, TradeEvent};

// Infrastructure config
pub use infrastructure::config::{ConfigError, DriverConfig, FeedSettings, SamplerSettings};

// Feed driver (facade + emission loop)
pub use infrastructure::feed::{FeedDriver, FeedError, TradeEmitter};

// Price sampling
pub use infrastructure::sampler::TradeSampler;
