//! # Inbound Ports
//!
//! The API callers (runtime, tooling, tests) use to drive the vault.

use crate::domain::{LockInfo, VaultResult};
use async_trait::async_trait;
use shared_types::{Address, Timestamp, U256};

/// Lock vault API - inbound port.
///
/// State-changing calls are applied atomically per call: each either commits
/// its whole transition or returns an error with nothing changed.
#[async_trait]
pub trait LockVaultApi: Send + Sync {
    /// Add `amount` to the caller's lock, creating it on first deposit.
    ///
    /// Returns the new locked total.
    async fn deposit(&self, caller: Address, amount: U256) -> VaultResult<U256>;

    /// Commit the unlock condition once.
    ///
    /// `target_price_usd` is in whole USD. A past `target_date` is accepted.
    async fn set_parameters(
        &self,
        caller: Address,
        target_date: Timestamp,
        target_price_usd: U256,
    ) -> VaultResult<()>;

    /// Whether `owner` could withdraw right now.
    ///
    /// Only valid for the instant it is evaluated.
    async fn can_withdraw(&self, owner: Address) -> VaultResult<bool>;

    /// Release the caller's full amount; returns the amount transferred.
    async fn withdraw(&self, caller: Address) -> VaultResult<U256>;

    /// Snapshot of a lock; zeroed for unknown addresses.
    async fn get_lock_info(&self, owner: Address) -> LockInfo;

    /// Current oracle price in oracle precision.
    async fn current_price(&self) -> VaultResult<U256>;

    /// Sum of amounts still held for active locks.
    async fn total_locked(&self) -> U256;
}
