//! # Outbound Ports
//!
//! The aggregator feed the adapter reads from.

use crate::domain::{OracleResult, RoundData, RoundId};
use async_trait::async_trait;

/// AggregatorV3 read interface - outbound port.
///
/// Transport failures surface as [`OracleError::Unreachable`](crate::domain::OracleError::Unreachable).
#[async_trait]
pub trait AggregatorV3: Send + Sync {
    /// Decimals of every answer.
    async fn decimals(&self) -> OracleResult<u8>;

    /// Human-readable pair, e.g. "ETH / USD".
    async fn description(&self) -> OracleResult<String>;

    /// Aggregator version.
    async fn version(&self) -> OracleResult<u64>;

    /// Latest round.
    async fn latest_round_data(&self) -> OracleResult<RoundData>;

    /// A specific historical round.
    async fn get_round_data(&self, round_id: RoundId) -> OracleResult<RoundData>;
}
