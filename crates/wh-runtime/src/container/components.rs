//! Component instances of a local deployment.

use crate::container::config::{ConfigError, RuntimeConfig};
use shared_bus::{EventPublisher, InMemoryEventBus};
use shared_types::{ManualTimeSource, SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::info;
use wh_01_price_oracle::{MockV3Aggregator, PriceOracleService};
use wh_02_lock_vault::{InMemoryCustody, LockVaultService};

/// Oracle adapter over the local feed.
pub type RuntimeOracle = PriceOracleService<MockV3Aggregator>;

/// Vault over the local oracle and custody ledger.
pub type RuntimeVault = LockVaultService<RuntimeOracle, InMemoryCustody>;

/// Every component of one deployment, shared through `Arc`s.
///
/// The clock is a manual one: the simulated chain only moves forward when a
/// scenario advances it.
pub struct VaultContainer {
    /// Simulated chain clock.
    pub clock: Arc<ManualTimeSource>,
    /// Local price feed.
    pub feed: Arc<MockV3Aggregator>,
    /// Validated oracle reads.
    pub oracle: Arc<RuntimeOracle>,
    /// Wallet and vault balances.
    pub custody: Arc<InMemoryCustody>,
    /// Lifecycle events.
    pub bus: Arc<InMemoryEventBus>,
    /// The lock vault.
    pub vault: Arc<RuntimeVault>,
    feed_decimals: u8,
}

impl VaultContainer {
    /// Build and wire all components.
    pub fn new(config: &RuntimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let start = config
            .start_time
            .unwrap_or_else(|| SystemTimeSource.now());
        let clock = Arc::new(ManualTimeSource::new(start));
        let time_source: Arc<dyn TimeSource> = clock.clone();

        let feed = Arc::new(MockV3Aggregator::with_time_source(
            config.feed_decimals,
            config.initial_answer()?,
            Arc::clone(&time_source),
        ));
        let oracle = Arc::new(PriceOracleService::with_time_source(
            Arc::clone(&feed),
            config.oracle.clone(),
            Arc::clone(&time_source),
        ));

        let custody = Arc::new(InMemoryCustody::new());
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.event_capacity));
        let publisher: Arc<dyn EventPublisher> = bus.clone();

        let vault = Arc::new(LockVaultService::new(
            Arc::clone(&oracle),
            Arc::clone(&custody),
            time_source,
            publisher,
        ));

        info!(
            start_time = start,
            feed_decimals = config.feed_decimals,
            initial_price_usd = %config.initial_price_usd,
            "[wh-runtime] components wired"
        );

        Ok(Self {
            clock,
            feed,
            oracle,
            custody,
            bus,
            vault,
            feed_decimals: config.feed_decimals,
        })
    }

    /// Decimals the local feed reports.
    pub fn feed_decimals(&self) -> u8 {
        self.feed_decimals
    }
}
