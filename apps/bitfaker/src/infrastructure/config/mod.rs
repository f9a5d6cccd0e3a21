//! Configuration Module
//!
//! Configuration loading for the feed driver.

mod settings;

pub use settings::{ConfigError, DriverConfig, FeedSettings, SamplerSettings};
