//! Market Identifiers
//!
//! A market is a base/quote trading pair (e.g. BTC/USD). Markets are
//! immutable values with structural equality; trade events carry the
//! concatenated symbol form (`BTCUSD`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A tradable base/quote pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Market {
    base: String,
    quote: String,
}

impl Market {
    /// Create a market from its base and quote units.
    #[must_use]
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// The base unit (e.g. `BTC`).
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The quote unit (e.g. `USD`).
    #[must_use]
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// The concatenated symbol carried by trade events (e.g. `BTCUSD`).
    #[must_use]
    pub fn symbol(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Error parsing a market from its `BASE/QUOTE` string form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid market '{0}', expected BASE/QUOTE")]
pub struct MarketParseError(String);

impl FromStr for Market {
    type Err = MarketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| MarketParseError(s.to_string()))?;

        if base.is_empty() || quote.is_empty() {
            return Err(MarketParseError(s.to_string()));
        }

        Ok(Self::new(base, quote))
    }
}

// =============================================================================
// Tests
// =============================================================================
