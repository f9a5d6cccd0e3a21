//! Driver Configuration Settings
//!
//! Configuration types for the synthetic feed, loaded from environment
//! variables. All variables are optional; defaults apply when unset.

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

/// Default tick period in milliseconds.
const DEFAULT_TICK_MS: u64 = 5_000;

/// Default jitter half-width in basis points (jitter disabled).
const DEFAULT_JITTER_BPS: u32 = 0;

/// Tick settings for the emission loop.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Pause between emission ticks, measured from the end of the
    /// previous tick's processing.
    pub tick_period: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

/// Settings for the synthetic price sampler.
#[derive(Debug, Clone)]
pub struct SamplerSettings {
    /// Price reported when jitter is disabled, and the center of the
    /// jitter band otherwise.
    pub base_price: Decimal,
    /// Jitter half-width in basis points of the base price. Zero keeps
    /// the feed deterministic.
    pub jitter_bps: u32,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            base_price: Decimal::new(2213, 3), // 2.213
            jitter_bps: DEFAULT_JITTER_BPS,
        }
    }
}

/// Complete driver configuration.
#[derive(Debug, Clone, Default)]
pub struct DriverConfig {
    /// Emission loop settings.
    pub feed: FeedSettings,
    /// Sampler settings.
    pub sampler: SamplerSettings,
}

impl DriverConfig {
    /// Create configuration from environment variables.
    ///
    /// Recognized variables: `BITFAKER_TICK_MS`, `BITFAKER_PRICE`,
    /// `BITFAKER_JITTER_BPS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse. Unset
    /// variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let tick_ms = parse_env("BITFAKER_TICK_MS", DEFAULT_TICK_MS)?;
        let base_price = parse_env("BITFAKER_PRICE", SamplerSettings::default().base_price)?;
        let jitter_bps = parse_env("BITFAKER_JITTER_BPS", DEFAULT_JITTER_BPS)?;

        Ok(Self {
            feed: FeedSettings {
                tick_period: Duration::from_millis(tick_ms),
            },
            sampler: SamplerSettings {
                base_price,
                jitter_bps,
            },
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable is set to a value that does not parse.
    #[error("environment variable {var} has invalid value '{value}'")]
    InvalidValue {
        /// Variable name.
        var: String,
        /// The rejected value.
        value: String,
    },
}

fn parse_env<T: FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

// =============================================================================
// Tests
// =============================================================================
