//! Scenario errors.
//!
//! These stop a run. A vault rejection is not one of them: it is recorded
//! as the step's outcome.

use shared_types::{AddressParseError, UnitsError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Read failure
        #[source]
        source: std::io::Error,
    },

    /// The scenario file is not valid JSON for the step format.
    #[error("Invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// An account is not a 20-byte hex address.
    #[error("Step {step}: invalid account {account:?}: {source}")]
    InvalidAccount {
        /// Step index
        step: usize,
        /// Raw account
        account: String,
        /// Parse failure
        #[source]
        source: AddressParseError,
    },

    /// An amount or price is not a valid decimal.
    #[error("Step {step}: invalid amount {value:?}: {source}")]
    InvalidAmount {
        /// Step index
        step: usize,
        /// Raw value
        value: String,
        /// Parse failure
        #[source]
        source: UnitsError,
    },

    /// `set_parameters` names neither `target_date` nor `lock_days`.
    #[error("Step {step}: set_parameters needs target_date or lock_days")]
    MissingTargetDate {
        /// Step index
        step: usize,
    },

    /// `update_price` names neither `usd` nor `answer`.
    #[error("Step {step}: update_price needs usd or answer")]
    MissingPrice {
        /// Step index
        step: usize,
    },
}
