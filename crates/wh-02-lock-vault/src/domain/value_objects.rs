//! # Value Objects
//!
//! Unlock parameters and the read-only lock view.

use serde::{Deserialize, Serialize};
use shared_types::{Timestamp, U256};

/// The one-time committed unlock condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockParameters {
    /// Unlock date (seconds since epoch).
    pub target_date: Timestamp,
    /// Threshold as committed, in whole USD.
    pub target_price_usd: U256,
    /// Threshold in oracle precision (`usd * 10^PRICE_DECIMALS`).
    pub target_price: U256,
}

impl UnlockParameters {
    /// Whether the date condition holds at `now`.
    pub fn date_reached(&self, now: Timestamp) -> bool {
        now >= self.target_date
    }

    /// Whether the price condition holds for a normalized `price`.
    pub fn price_reached(&self, price: U256) -> bool {
        price >= self.target_price
    }
}

/// Lifecycle position of a lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockStatus {
    /// No deposit yet.
    Empty,
    /// Funded, parameters not committed.
    Deposited,
    /// Parameters committed, awaiting unlock.
    Committed,
    /// Released to the owner (terminal).
    Withdrawn,
}

/// Snapshot returned by `get_lock_info`.
///
/// An address that never deposited reports zero values and `Empty`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInfo {
    /// Locked amount (retained after withdrawal).
    pub amount: U256,
    /// Unlock date, 0 until committed.
    pub target_date: Timestamp,
    /// Threshold in whole USD, 0 until committed.
    pub target_price_usd: U256,
    /// Threshold in oracle precision, 0 until committed.
    pub target_price: U256,
    /// Parameters have been committed.
    pub parameters_set: bool,
    /// Lock has been withdrawn.
    pub withdrawn: bool,
    /// Lifecycle position.
    pub status: LockStatus,
}

impl Default for LockInfo {
    fn default() -> Self {
        Self {
            amount: U256::zero(),
            target_date: 0,
            target_price_usd: U256::zero(),
            target_price: U256::zero(),
            parameters_set: false,
            withdrawn: false,
            status: LockStatus::Empty,
        }
    }
}
