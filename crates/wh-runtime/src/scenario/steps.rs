//! Scenario file format.
//!
//! ```json
//! {
//!   "name": "price unlock",
//!   "steps": [
//!     { "action": "fund", "account": "0xf39f...", "amount": "10" },
//!     { "action": "deposit", "account": "0xf39f...", "amount": "1" },
//!     { "action": "set_parameters", "account": "0xf39f...", "lock_days": 365, "target_price_usd": 2500 },
//!     { "action": "can_withdraw", "account": "0xf39f...", "expect": false },
//!     { "action": "update_price", "usd": "3000" },
//!     { "action": "withdraw", "account": "0xf39f..." }
//!   ]
//! }
//! ```
//!
//! Amounts are decimal ether strings. `expect_error` names the rejection
//! reason a step must fail with (`no_deposit`, `conditions_not_met`, ...).

use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// A named list of steps run against one fresh deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name.
    pub name: String,
    /// Steps in execution order.
    pub steps: Vec<Step>,
}

/// One action against the deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Credit a wallet from the faucet.
    Fund {
        /// Hex address.
        account: String,
        /// Ether amount.
        amount: String,
    },

    /// Lock value.
    Deposit {
        /// Hex address.
        account: String,
        /// Ether amount.
        amount: String,
        /// Rejection reason the step must produce.
        #[serde(default)]
        expect_error: Option<String>,
    },

    /// Commit unlock parameters.
    ///
    /// The date is either absolute (`target_date`) or relative to the
    /// simulated clock (`lock_days`).
    SetParameters {
        /// Hex address.
        account: String,
        /// Absolute unlock date.
        #[serde(default)]
        target_date: Option<Timestamp>,
        /// Unlock date as days from now.
        #[serde(default)]
        lock_days: Option<u64>,
        /// Threshold in whole USD.
        target_price_usd: u64,
        /// Rejection reason the step must produce.
        #[serde(default)]
        expect_error: Option<String>,
    },

    /// Evaluate the unlock predicate.
    CanWithdraw {
        /// Hex address.
        account: String,
        /// Value the predicate must return.
        #[serde(default)]
        expect: Option<bool>,
        /// Rejection reason the step must produce.
        #[serde(default)]
        expect_error: Option<String>,
    },

    /// Release the lock.
    Withdraw {
        /// Hex address.
        account: String,
        /// Rejection reason the step must produce.
        #[serde(default)]
        expect_error: Option<String>,
    },

    /// Open a new feed round.
    ///
    /// `usd` is converted to feed precision; `answer` is passed raw so
    /// scenarios can publish zero or negative rounds.
    UpdatePrice {
        /// Decimal USD price.
        #[serde(default)]
        usd: Option<String>,
        /// Raw answer in feed precision.
        #[serde(default)]
        answer: Option<i64>,
    },

    /// Move the simulated clock forward.
    AdvanceTime {
        /// Seconds to add.
        #[serde(default)]
        seconds: u64,
        /// Days to add.
        #[serde(default)]
        days: u64,
    },

    /// Make the next custody transfer fail.
    FailNextTransfer {
        /// Failure reason reported by custody.
        reason: String,
    },

    /// Read a lock snapshot.
    LockInfo {
        /// Hex address.
        account: String,
    },

    /// Read the normalized oracle price.
    CurrentPrice {
        /// Rejection reason the step must produce.
        #[serde(default)]
        expect_error: Option<String>,
    },
}

impl Step {
    /// Action name as written in scenario files.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Fund { .. } => "fund",
            Self::Deposit { .. } => "deposit",
            Self::SetParameters { .. } => "set_parameters",
            Self::CanWithdraw { .. } => "can_withdraw",
            Self::Withdraw { .. } => "withdraw",
            Self::UpdatePrice { .. } => "update_price",
            Self::AdvanceTime { .. } => "advance_time",
            Self::FailNextTransfer { .. } => "fail_next_transfer",
            Self::LockInfo { .. } => "lock_info",
            Self::CurrentPrice { .. } => "current_price",
        }
    }

    /// Rejection reason the step is expected to fail with.
    pub fn expected_error(&self) -> Option<&str> {
        match self {
            Self::Deposit { expect_error, .. }
            | Self::SetParameters { expect_error, .. }
            | Self::CanWithdraw { expect_error, .. }
            | Self::Withdraw { expect_error, .. }
            | Self::CurrentPrice { expect_error } => expect_error.as_deref(),
            _ => None,
        }
    }
}

/// First default Hardhat account.
pub const DEMO_ACCOUNT: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

impl Scenario {
    /// Deposit, wait for the price to cross the threshold, withdraw.
    pub fn price_unlock() -> Self {
        let account = || DEMO_ACCOUNT.to_string();
        Self {
            name: "price unlock".to_string(),
            steps: vec![
                Step::Fund {
                    account: account(),
                    amount: "10".to_string(),
                },
                Step::Deposit {
                    account: account(),
                    amount: "1".to_string(),
                    expect_error: None,
                },
                Step::SetParameters {
                    account: account(),
                    target_date: None,
                    lock_days: Some(365),
                    target_price_usd: 2500,
                    expect_error: None,
                },
                Step::CanWithdraw {
                    account: account(),
                    expect: Some(false),
                    expect_error: None,
                },
                Step::Withdraw {
                    account: account(),
                    expect_error: Some("conditions_not_met".to_string()),
                },
                Step::UpdatePrice {
                    usd: Some("3000".to_string()),
                    answer: None,
                },
                Step::CanWithdraw {
                    account: account(),
                    expect: Some(true),
                    expect_error: None,
                },
                Step::Withdraw {
                    account: account(),
                    expect_error: None,
                },
                Step::LockInfo { account: account() },
                Step::Deposit {
                    account: account(),
                    amount: "1".to_string(),
                    expect_error: Some("lock_withdrawn".to_string()),
                },
            ],
        }
    }
}
