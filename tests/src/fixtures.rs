//! Shared builders for the test suite.

use async_trait::async_trait;
use shared_bus::{EventPublisher, InMemoryEventBus};
use shared_types::{parse_units, Address, ManualTimeSource, TimeSource, Timestamp, ETHER_DECIMALS, U256};
use std::sync::Arc;
use std::time::Duration;
use wh_01_price_oracle::{MockV3Aggregator, OracleConfig, PriceOracleService};
use wh_02_lock_vault::{CustodyError, InMemoryCustody, LockVaultService, ValueCustody};

/// Simulated chain start.
pub const START: Timestamp = 1_700_000_000;

/// Test accounts.
pub const ALICE: Address = [0xA1; 20];
pub const BOB: Address = [0xB0; 20];

/// Feed precision used by the fixtures.
pub const FEED_DECIMALS: u8 = 8;

pub type Oracle = PriceOracleService<MockV3Aggregator>;

/// One vault with its collaborators.
pub struct Deployment<C: ValueCustody> {
    pub clock: Arc<ManualTimeSource>,
    pub feed: Arc<MockV3Aggregator>,
    pub custody: Arc<C>,
    pub bus: Arc<InMemoryEventBus>,
    pub vault: Arc<LockVaultService<Oracle, C>>,
}

/// Deploy a vault over `custody` with the feed at `initial_usd`.
pub fn deploy<C>(custody: Arc<C>, initial_usd: u64) -> Deployment<C>
where
    C: ValueCustody + 'static,
{
    let clock = Arc::new(ManualTimeSource::new(START));
    let time_source: Arc<dyn TimeSource> = clock.clone();

    let feed = Arc::new(MockV3Aggregator::with_time_source(
        FEED_DECIMALS,
        usd(initial_usd),
        Arc::clone(&time_source),
    ));
    let oracle = Arc::new(PriceOracleService::with_time_source(
        Arc::clone(&feed),
        OracleConfig::default(),
        Arc::clone(&time_source),
    ));

    let bus = Arc::new(InMemoryEventBus::new());
    let publisher: Arc<dyn EventPublisher> = bus.clone();
    let vault = Arc::new(LockVaultService::new(
        oracle,
        Arc::clone(&custody),
        time_source,
        publisher,
    ));

    Deployment {
        clock,
        feed,
        custody,
        bus,
        vault,
    }
}

/// Deploy over a fresh in-memory ledger with `ALICE` and `BOB` funded.
pub fn deploy_funded(initial_usd: u64) -> Deployment<InMemoryCustody> {
    let custody = Arc::new(InMemoryCustody::new());
    custody.fund(ALICE, ether("10"));
    custody.fund(BOB, ether("10"));
    deploy(custody, initial_usd)
}

/// Whole USD in feed precision.
pub fn usd(whole: u64) -> i128 {
    i128::from(whole) * 10i128.pow(u32::from(FEED_DECIMALS))
}

/// Ether string in wei.
pub fn ether(amount: &str) -> U256 {
    parse_units(amount, ETHER_DECIMALS).unwrap()
}

/// Custody whose outbound transfers take a while to settle.
pub struct SlowCustody {
    pub inner: InMemoryCustody,
    pub delay: Duration,
}

impl SlowCustody {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryCustody::new(),
            delay,
        }
    }
}

#[async_trait]
impl ValueCustody for SlowCustody {
    async fn receive(&self, from: Address, amount: U256) -> Result<(), CustodyError> {
        self.inner.receive(from, amount).await
    }

    async fn transfer_out(&self, to: Address, amount: U256) -> Result<(), CustodyError> {
        tokio::time::sleep(self.delay).await;
        self.inner.transfer_out(to, amount).await
    }

    async fn custodied(&self) -> U256 {
        self.inner.custodied().await
    }
}
