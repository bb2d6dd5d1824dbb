//! # Domain Errors
//!
//! Every rejection aborts the whole operation and leaves the lock untouched.

use shared_types::U256;
use thiserror::Error;
use wh_01_price_oracle::OracleError;

/// Result alias for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Vault error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Parameters committed before any deposit.
    #[error("No deposit found")]
    NoDepositFound,

    /// Parameters committed a second time.
    #[error("Parameters already set")]
    ParametersAlreadySet,

    /// Deposit into a lock that has been withdrawn.
    #[error("Previous lock was withdrawn")]
    LockAlreadyWithdrawn,

    /// Withdrawal while neither unlock condition holds.
    #[error("Withdrawal conditions not met")]
    WithdrawalConditionsNotMet,

    /// The price could not be determined.
    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(#[from] OracleError),

    /// Zero-value deposit.
    #[error("Deposit amount must be positive")]
    InvalidAmount,

    /// Zero threshold, or one that overflows oracle precision.
    #[error("Invalid target price: {usd} USD")]
    InvalidTargetPrice {
        /// Requested threshold in whole USD
        usd: U256,
    },

    /// Deposit would overflow the locked amount.
    #[error("Locked amount overflow")]
    AmountOverflow,

    /// Mutation for an owner issued from inside that owner's custody call.
    #[error("Reentrant call rejected")]
    ReentrantCall,

    /// Custody rejected the value transfer.
    #[error("Transfer failed: {reason}")]
    TransferFailed {
        /// Custody error text
        reason: String,
    },
}

impl VaultError {
    /// Short label for metrics and log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NoDepositFound => "no_deposit",
            Self::ParametersAlreadySet => "parameters_already_set",
            Self::LockAlreadyWithdrawn => "lock_withdrawn",
            Self::WithdrawalConditionsNotMet => "conditions_not_met",
            Self::OracleUnavailable(_) => "oracle_unavailable",
            Self::InvalidAmount => "invalid_amount",
            Self::InvalidTargetPrice { .. } => "invalid_target_price",
            Self::AmountOverflow => "amount_overflow",
            Self::TransferFailed { .. } => "transfer_failed",
            Self::ReentrantCall => "reentrant_call",
        }
    }
}

/// Custody errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    /// Sender cannot cover the transfer.
    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Sender balance
        available: U256,
        /// Requested amount
        requested: U256,
    },

    /// Vault holds less than the requested release.
    #[error("Insufficient custody: held {held}, requested {requested}")]
    InsufficientCustody {
        /// Value held by the vault
        held: U256,
        /// Requested amount
        requested: U256,
    },

    /// Recipient or transport refused the transfer.
    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

impl From<CustodyError> for VaultError {
    fn from(err: CustodyError) -> Self {
        Self::TransferFailed {
            reason: err.to_string(),
        }
    }
}
