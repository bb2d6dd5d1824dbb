//! # Domain Entities
//!
//! The per-address lock and its state machine.
//!
//! ```text
//! Empty ──deposit──► Deposited ──commit──► Committed ──withdraw──► Withdrawn
//!                      │  ▲                  │  ▲
//!                      └──┘ deposit          └──┘ deposit
//! ```
//!
//! Transitions are computed on a copy and only stored on success, so a
//! rejected operation never leaves a partial change behind.

use super::errors::{VaultError, VaultResult};
use super::invariants::{
    invariant_commit_allowed, invariant_deposit_allowed, invariant_positive_amount,
};
use super::value_objects::{LockInfo, LockStatus, UnlockParameters};
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// State of a single lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    /// No deposit yet.
    Empty,
    /// Funded, parameters not committed.
    Deposited {
        /// Locked amount
        amount: U256,
    },
    /// Parameters committed.
    Committed {
        /// Locked amount
        amount: U256,
        /// Unlock condition
        parameters: UnlockParameters,
    },
    /// Released to the owner (terminal).
    Withdrawn {
        /// Amount that was released
        amount: U256,
        /// Unlock condition that was met
        parameters: UnlockParameters,
    },
}

impl LockState {
    /// Locked (or released) amount.
    pub fn amount(&self) -> U256 {
        match self {
            Self::Empty => U256::zero(),
            Self::Deposited { amount }
            | Self::Committed { amount, .. }
            | Self::Withdrawn { amount, .. } => *amount,
        }
    }

    /// Committed parameters, if any.
    pub fn parameters(&self) -> Option<&UnlockParameters> {
        match self {
            Self::Committed { parameters, .. } | Self::Withdrawn { parameters, .. } => {
                Some(parameters)
            }
            Self::Empty | Self::Deposited { .. } => None,
        }
    }

    /// Lifecycle position.
    pub fn status(&self) -> LockStatus {
        match self {
            Self::Empty => LockStatus::Empty,
            Self::Deposited { .. } => LockStatus::Deposited,
            Self::Committed { .. } => LockStatus::Committed,
            Self::Withdrawn { .. } => LockStatus::Withdrawn,
        }
    }

    /// Whether the lock still holds value in custody.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Deposited { .. } | Self::Committed { .. })
    }

    /// State after adding `value`.
    pub fn deposit(&self, value: U256) -> VaultResult<Self> {
        invariant_deposit_allowed(self)?;
        invariant_positive_amount(value)?;

        let total = self
            .amount()
            .checked_add(value)
            .ok_or(VaultError::AmountOverflow)?;

        Ok(match self {
            Self::Empty | Self::Deposited { .. } => Self::Deposited { amount: total },
            Self::Committed { parameters, .. } => Self::Committed {
                amount: total,
                parameters: *parameters,
            },
            Self::Withdrawn { .. } => return Err(VaultError::LockAlreadyWithdrawn),
        })
    }

    /// State after committing `parameters`.
    pub fn commit(&self, parameters: UnlockParameters) -> VaultResult<Self> {
        invariant_commit_allowed(self)?;
        Ok(Self::Committed {
            amount: self.amount(),
            parameters,
        })
    }

    /// State after release; only a committed lock can be released.
    pub fn release(&self) -> VaultResult<Self> {
        match self {
            Self::Committed { amount, parameters } => Ok(Self::Withdrawn {
                amount: *amount,
                parameters: *parameters,
            }),
            _ => Err(VaultError::WithdrawalConditionsNotMet),
        }
    }
}

/// A lock owned by one address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// Owner and sole beneficiary.
    pub owner: Address,
    /// Current state.
    pub state: LockState,
}

impl Lock {
    /// A fresh, empty lock.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            state: LockState::Empty,
        }
    }

    /// Add `value`; returns the new total.
    pub fn deposit(&mut self, value: U256) -> VaultResult<U256> {
        self.state = self.state.deposit(value)?;
        Ok(self.state.amount())
    }

    /// Commit unlock parameters.
    pub fn commit(&mut self, parameters: UnlockParameters) -> VaultResult<()> {
        self.state = self.state.commit(parameters)?;
        Ok(())
    }

    /// Mark released; returns the previous state and the released amount.
    pub fn release(&mut self) -> VaultResult<(LockState, U256)> {
        let previous = self.state;
        self.state = self.state.release()?;
        Ok((previous, previous.amount()))
    }

    /// Read-only view.
    pub fn info(&self) -> LockInfo {
        let parameters = self.state.parameters();
        LockInfo {
            amount: self.state.amount(),
            target_date: parameters.map(|p| p.target_date).unwrap_or_default(),
            target_price_usd: parameters.map(|p| p.target_price_usd).unwrap_or_default(),
            target_price: parameters.map(|p| p.target_price).unwrap_or_default(),
            parameters_set: parameters.is_some(),
            withdrawn: matches!(self.state, LockState::Withdrawn { .. }),
            status: self.state.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = [0x11; 20];

    fn params() -> UnlockParameters {
        UnlockParameters {
            target_date: 2_000,
            target_price_usd: U256::from(2500u64),
            target_price: U256::from(250_000_000_000u64),
        }
    }

    fn value(n: u64) -> U256 {
        U256::from(n)
    }

    #[test]
    fn test_deposits_accumulate() {
        let mut lock = Lock::new(OWNER);
        assert_eq!(lock.deposit(value(10)).unwrap(), value(10));
        assert_eq!(lock.deposit(value(5)).unwrap(), value(15));
        assert_eq!(lock.state, LockState::Deposited { amount: value(15) });
    }

    #[test]
    fn test_zero_deposit_rejected_without_change() {
        let mut lock = Lock::new(OWNER);
        assert_eq!(lock.deposit(U256::zero()), Err(VaultError::InvalidAmount));
        assert_eq!(lock.state, LockState::Empty);
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let mut lock = Lock::new(OWNER);
        lock.deposit(U256::MAX).unwrap();
        assert_eq!(lock.deposit(value(1)), Err(VaultError::AmountOverflow));
        assert_eq!(lock.state.amount(), U256::MAX);
    }

    #[test]
    fn test_commit_requires_deposit() {
        let mut lock = Lock::new(OWNER);
        assert_eq!(lock.commit(params()), Err(VaultError::NoDepositFound));
        assert_eq!(lock.state, LockState::Empty);
    }

    #[test]
    fn test_commit_once() {
        let mut lock = Lock::new(OWNER);
        lock.deposit(value(10)).unwrap();
        lock.commit(params()).unwrap();

        let mut other = params();
        other.target_date = 1;
        assert_eq!(lock.commit(other), Err(VaultError::ParametersAlreadySet));
        assert_eq!(lock.state.parameters(), Some(&params()));
    }

    #[test]
    fn test_deposit_after_commit_keeps_parameters() {
        let mut lock = Lock::new(OWNER);
        lock.deposit(value(10)).unwrap();
        lock.commit(params()).unwrap();
        lock.deposit(value(5)).unwrap();

        assert_eq!(
            lock.state,
            LockState::Committed {
                amount: value(15),
                parameters: params()
            }
        );
    }

    #[test]
    fn test_release_only_from_committed() {
        let mut lock = Lock::new(OWNER);
        assert_eq!(lock.release(), Err(VaultError::WithdrawalConditionsNotMet));

        lock.deposit(value(10)).unwrap();
        assert_eq!(lock.release(), Err(VaultError::WithdrawalConditionsNotMet));

        lock.commit(params()).unwrap();
        let (previous, amount) = lock.release().unwrap();
        assert_eq!(amount, value(10));
        assert_eq!(previous.status(), LockStatus::Committed);
        assert_eq!(lock.state.status(), LockStatus::Withdrawn);

        // Terminal
        assert_eq!(lock.release(), Err(VaultError::WithdrawalConditionsNotMet));
        assert_eq!(lock.deposit(value(1)), Err(VaultError::LockAlreadyWithdrawn));
        assert_eq!(lock.commit(params()), Err(VaultError::ParametersAlreadySet));
    }

    #[test]
    fn test_withdrawn_deposit_rejected_before_amount_check() {
        let mut lock = Lock::new(OWNER);
        lock.deposit(value(10)).unwrap();
        lock.commit(params()).unwrap();
        lock.release().unwrap();
        assert_eq!(
            lock.deposit(U256::zero()),
            Err(VaultError::LockAlreadyWithdrawn)
        );
    }

    #[test]
    fn test_info_after_withdrawal_keeps_fields() {
        let mut lock = Lock::new(OWNER);
        lock.deposit(value(10)).unwrap();
        lock.commit(params()).unwrap();
        lock.release().unwrap();

        let info = lock.info();
        assert_eq!(info.amount, value(10));
        assert_eq!(info.target_date, 2_000);
        assert_eq!(info.target_price_usd, value(2500));
        assert!(info.parameters_set);
        assert!(info.withdrawn);
        assert_eq!(info.status, LockStatus::Withdrawn);
    }

    #[test]
    fn test_info_of_new_lock_is_zeroed() {
        assert_eq!(Lock::new(OWNER).info(), LockInfo::default());
    }
}
