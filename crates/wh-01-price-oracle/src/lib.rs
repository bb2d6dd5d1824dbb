//! # WH-01 Price Oracle Adapter
//!
//! Read-only adapter around an AggregatorV3-style price feed.
//!
//! **Component ID:** 01
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! Present a single normalized USD price to the lock vault:
//! - Every read goes to the feed (no caching)
//! - Non-positive, incomplete or carried-over rounds are rejected
//! - The feed's native precision is converted to [`PRICE_DECIMALS`]
//!
//! ## Module Structure
//!
//! ```text
//! wh-01-price-oracle/
//! ├── domain/          # RoundData, OracleReading, OracleError, round validation
//! ├── ports/           # PriceOracleApi (inbound), AggregatorV3 (outbound)
//! ├── adapters/        # MockV3Aggregator
//! └── service.rs       # PriceOracleService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::MockV3Aggregator;
pub use domain::{
    normalize_answer, usd_to_price, validate_round, OracleError, OracleReading, OracleResult,
    RoundData, RoundId, MAX_FEED_DECIMALS, PRICE_DECIMALS,
};
pub use ports::{AggregatorV3, PriceOracleApi};
pub use service::{OracleConfig, PriceOracleService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Component identifier used in log fields.
pub const COMPONENT: &str = "wh-01";
