//! # Value Objects
//!
//! Feed rounds as reported and readings as consumed by the vault.

use serde::{Deserialize, Serialize};
use shared_types::{Timestamp, U256};

/// Round identifier (the feed uses an 80-bit id).
pub type RoundId = u128;

/// Fixed-point precision of every normalized price.
///
/// A normalized price of `200_000_000_000` is $2000.00000000.
pub const PRICE_DECIMALS: u8 = 8;

/// Largest feed precision the adapter will scale from.
pub const MAX_FEED_DECIMALS: u8 = 36;

/// One round as reported by the aggregator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundData {
    /// Round the answer belongs to.
    pub round_id: RoundId,
    /// Signed fixed-point answer in the feed's native decimals.
    pub answer: i128,
    /// When the round started.
    pub started_at: Timestamp,
    /// When the answer was last updated (0 = round not complete).
    pub updated_at: Timestamp,
    /// Round in which the answer was computed.
    pub answered_in_round: RoundId,
}

/// A validated, normalized point-in-time price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleReading {
    /// Round the price came from.
    pub round_id: RoundId,
    /// Price with [`PRICE_DECIMALS`] decimals.
    pub price: U256,
    /// Feed timestamp of the answer.
    pub updated_at: Timestamp,
}

impl OracleReading {
    /// Whole-dollar part of the price.
    pub fn whole_usd(&self) -> U256 {
        self.price / U256::exp10(PRICE_DECIMALS as usize)
    }
}
