//! # Inbound Ports
//!
//! The API the lock vault consumes.

use crate::domain::{OracleReading, OracleResult};
use async_trait::async_trait;
use shared_types::U256;

/// Price oracle API - inbound port.
///
/// Every call reads the feed; nothing is cached between calls.
#[async_trait]
pub trait PriceOracleApi: Send + Sync {
    /// Current price with [`PRICE_DECIMALS`](crate::PRICE_DECIMALS) decimals.
    async fn current_price(&self) -> OracleResult<U256> {
        Ok(self.latest_reading().await?.price)
    }

    /// Current validated reading with round metadata.
    async fn latest_reading(&self) -> OracleResult<OracleReading>;

    /// Native decimals of the underlying feed.
    async fn feed_decimals(&self) -> OracleResult<u8>;

    /// Description of the underlying feed.
    async fn description(&self) -> OracleResult<String>;
}
