//! Infrastructure Layer - Configuration, sampling, and the feed driver.
//!
//! This layer wires the domain types to their runtime: environment
//! configuration, price generation, the emission loop task, and
//! tracing setup.

/// Environment-driven configuration.
pub mod config;

/// Driver facade and emission loop.
pub mod feed;

/// Synthetic price sampling.
pub mod sampler;

/// Tracing subscriber setup.
pub mod telemetry;
