//! # Domain Invariants
//!
//! Business rules checked before any lock transition is applied.

use super::entities::LockState;
use super::errors::{VaultError, VaultResult};
use shared_types::U256;
use wh_01_price_oracle::usd_to_price;

/// Invariant: deposits carry value.
pub fn invariant_positive_amount(amount: U256) -> VaultResult<()> {
    if amount.is_zero() {
        return Err(VaultError::InvalidAmount);
    }
    Ok(())
}

/// Invariant: a withdrawn lock never grows again.
pub fn invariant_deposit_allowed(state: &LockState) -> VaultResult<()> {
    if matches!(state, LockState::Withdrawn { .. }) {
        return Err(VaultError::LockAlreadyWithdrawn);
    }
    Ok(())
}

/// Invariant: parameters need a deposit and are committed at most once.
pub fn invariant_commit_allowed(state: &LockState) -> VaultResult<()> {
    match state {
        LockState::Empty => Err(VaultError::NoDepositFound),
        LockState::Deposited { amount } if amount.is_zero() => Err(VaultError::NoDepositFound),
        LockState::Deposited { .. } => Ok(()),
        LockState::Committed { .. } | LockState::Withdrawn { .. } => {
            Err(VaultError::ParametersAlreadySet)
        }
    }
}

/// Invariant: the threshold is positive and representable in oracle precision.
///
/// Returns the threshold scaled to oracle precision.
pub fn invariant_valid_threshold(target_price_usd: U256) -> VaultResult<U256> {
    if target_price_usd.is_zero() {
        return Err(VaultError::InvalidTargetPrice {
            usd: target_price_usd,
        });
    }
    usd_to_price(target_price_usd).ok_or(VaultError::InvalidTargetPrice {
        usd: target_price_usd,
    })
}
