//! # Runtime Configuration
//!
//! Every value can be overridden through a `WH_*` environment variable.
//! Parsing goes through a key lookup so tests never touch the process env.

use shared_types::{parse_units, Timestamp, UnitsError, U256};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use wh_01_price_oracle::{OracleConfig, MAX_FEED_DECIMALS};
use wh_telemetry::TelemetryConfig;

/// Decimals used by ETH/USD feeds on mainnet.
pub const DEFAULT_FEED_DECIMALS: u8 = 8;

/// Starting price of the local feed, in USD.
pub const DEFAULT_INITIAL_PRICE_USD: &str = "2000";

/// Capacity of the event bus channel.
pub const DEFAULT_EVENT_CAPACITY: usize = shared_bus::DEFAULT_CHANNEL_CAPACITY;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable held a value that could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// The feed precision is outside what the oracle adapter accepts.
    #[error("Feed decimals {0} exceed the supported maximum of {max}", max = MAX_FEED_DECIMALS)]
    FeedDecimals(u8),

    /// The initial USD price cannot be expressed as a feed answer.
    #[error("Invalid initial price {price:?}: {source}")]
    InitialPrice {
        /// Raw price
        price: String,
        /// Conversion failure
        #[source]
        source: UnitsError,
    },
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Decimals reported by the local feed (`WH_FEED_DECIMALS`).
    pub feed_decimals: u8,
    /// First answer of the local feed in USD (`WH_INITIAL_PRICE`).
    pub initial_price_usd: String,
    /// Simulated chain start time (`WH_START_TIME`); wall clock when unset.
    pub start_time: Option<Timestamp>,
    /// Scenario file to run (`WH_SCENARIO`); the built-in one when unset.
    pub scenario_path: Option<PathBuf>,
    /// Print Prometheus metrics after the run (`WH_METRICS`).
    pub print_metrics: bool,
    /// Event bus capacity (`WH_EVENT_CAPACITY`).
    pub event_capacity: usize,
    /// Oracle adapter settings.
    pub oracle: OracleConfig,
    /// Logging and trace export settings.
    pub telemetry: TelemetryConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            feed_decimals: DEFAULT_FEED_DECIMALS,
            initial_price_usd: DEFAULT_INITIAL_PRICE_USD.to_string(),
            start_time: None,
            scenario_path: None,
            print_metrics: false,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            oracle: OracleConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            feed_decimals: parse_var(&lookup, "WH_FEED_DECIMALS")?
                .unwrap_or(defaults.feed_decimals),
            initial_price_usd: lookup("WH_INITIAL_PRICE")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.initial_price_usd),
            start_time: parse_var(&lookup, "WH_START_TIME")?,
            scenario_path: lookup("WH_SCENARIO")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            print_metrics: lookup("WH_METRICS")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.print_metrics),
            event_capacity: parse_var(&lookup, "WH_EVENT_CAPACITY")?
                .filter(|capacity| *capacity > 0)
                .unwrap_or(defaults.event_capacity),
            oracle: OracleConfig::from_lookup(&lookup),
            telemetry: TelemetryConfig::from_lookup(&lookup),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values that only make sense together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_decimals > MAX_FEED_DECIMALS {
            return Err(ConfigError::FeedDecimals(self.feed_decimals));
        }
        self.initial_answer()?;
        Ok(())
    }

    /// The feed's first answer in feed precision.
    pub fn initial_answer(&self) -> Result<i128, ConfigError> {
        usd_to_answer(&self.initial_price_usd, self.feed_decimals).map_err(|source| {
            ConfigError::InitialPrice {
                price: self.initial_price_usd.clone(),
                source,
            }
        })
    }
}

/// Convert a decimal USD string to a raw feed answer with `decimals` places.
pub fn usd_to_answer(usd: &str, decimals: u8) -> Result<i128, UnitsError> {
    let scaled: U256 = parse_units(usd, decimals)?;
    let raw = u128::try_from(scaled).map_err(|_| UnitsError::Overflow(usd.to_string()))?;
    i128::try_from(raw).map_err(|_| UnitsError::Overflow(usd.to_string()))
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
