//! # Outbound Ports
//!
//! The value transfer primitive the vault custodies funds through.

use crate::domain::CustodyError;
use async_trait::async_trait;
use shared_types::{Address, U256};

/// Value custody - outbound port.
///
/// `receive` and `transfer_out` run without the vault's ledger lock held and
/// may call back into the vault. While one of them is in flight for an
/// owner, mutations for that owner issued from the same task fail with
/// `VaultError::ReentrantCall`; mutations from other tasks wait for the call
/// to return. An implementation must therefore not block on a separately
/// spawned task that mutates the same owner.
#[async_trait]
pub trait ValueCustody: Send + Sync {
    /// Pull `amount` from `from` into custody.
    async fn receive(&self, from: Address, amount: U256) -> Result<(), CustodyError>;

    /// Release `amount` from custody to `to`.
    async fn transfer_out(&self, to: Address, amount: U256) -> Result<(), CustodyError>;

    /// Total value currently held.
    async fn custodied(&self) -> U256;
}
