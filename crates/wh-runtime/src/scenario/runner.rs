//! Scenario Runner - drives a deployment step by step and reports outcomes

use crate::container::{usd_to_answer, VaultContainer};
use crate::scenario::error::ScenarioError;
use crate::scenario::steps::{Scenario, Step};
use crate::COMPONENT;
use serde::Serialize;
use shared_bus::{EventFilter, VaultEvent};
use shared_types::{
    address_from_hex, address_to_hex, format_units, parse_units, Address, TimeSource, Timestamp,
    ETHER_DECIMALS, SECONDS_PER_DAY, U256,
};
use std::path::Path;
use tracing::Instrument;
use wh_01_price_oracle::PRICE_DECIMALS;
use wh_02_lock_vault::{LockStatus, LockVaultApi, VaultResult};
use wh_telemetry::{component_span, log_event};

/// What a step produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Wallet credited.
    Funded {
        /// Wallet balance after funding (ether).
        balance: String,
    },
    /// Deposit accepted.
    Deposited {
        /// Locked total (ether).
        total: String,
    },
    /// Parameters committed.
    ParametersCommitted {
        /// Unlock date.
        target_date: Timestamp,
        /// Threshold in whole USD.
        target_price_usd: u64,
    },
    /// Predicate evaluated.
    CanWithdraw {
        /// Whether the lock could be withdrawn.
        unlocked: bool,
    },
    /// Lock released.
    Withdrawn {
        /// Amount transferred out (ether).
        amount: String,
    },
    /// New feed round opened.
    PriceUpdated {
        /// Round id.
        round_id: String,
        /// Raw answer in feed precision.
        answer: String,
    },
    /// Clock moved.
    TimeAdvanced {
        /// Simulated time after the move.
        now: Timestamp,
    },
    /// Next custody transfer will fail.
    TransferFailureArmed,
    /// Lock snapshot.
    Lock {
        /// Owner address.
        owner: String,
        /// Locked amount (ether).
        amount: String,
        /// Unlock date.
        target_date: Timestamp,
        /// Threshold in whole USD.
        target_price_usd: String,
        /// Lifecycle position.
        status: LockStatus,
    },
    /// Normalized oracle price.
    Price {
        /// Price in USD.
        usd: String,
    },
    /// The vault refused the operation.
    Rejected {
        /// Stable rejection label.
        reason: String,
        /// Error message.
        error: String,
    },
}

/// Result of one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Position in the scenario.
    pub index: usize,
    /// Action name.
    pub action: &'static str,
    /// What happened.
    pub outcome: Outcome,
    /// Whether the step met its expectations.
    pub passed: bool,
    /// Why the step failed its expectations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Result of a whole scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Every step met its expectations.
    pub passed: bool,
    /// Per-step results.
    pub steps: Vec<StepReport>,
    /// Events published during the run, in order.
    pub events: Vec<VaultEvent>,
    /// Value still locked at the end (ether).
    pub total_locked: String,
}

impl Scenario {
    /// Read a scenario file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Runs scenarios against one container.
pub struct ScenarioRunner<'a> {
    container: &'a VaultContainer,
}

impl<'a> ScenarioRunner<'a> {
    /// Runner over `container`.
    pub fn new(container: &'a VaultContainer) -> Self {
        Self { container }
    }

    /// Run every step in order.
    ///
    /// Vault rejections are recorded and the run continues; malformed steps
    /// abort it.
    pub async fn run(&self, scenario: &Scenario) -> Result<ScenarioReport, ScenarioError> {
        let mut subscription = self.container.bus.subscribe(EventFilter::all());
        let span = component_span!("scenario", name = %scenario.name, steps = scenario.steps.len());

        let steps = async {
            let mut reports = Vec::with_capacity(scenario.steps.len());
            for (index, step) in scenario.steps.iter().enumerate() {
                reports.push(self.run_step(index, step).await?);
            }
            Ok::<_, ScenarioError>(reports)
        }
        .instrument(span)
        .await?;

        let passed = steps.iter().all(|step| step.passed);
        log_event!(
            info,
            COMPONENT,
            "[wh-runtime] scenario finished",
            scenario = %scenario.name,
            passed = passed
        );

        Ok(ScenarioReport {
            name: scenario.name.clone(),
            passed,
            steps,
            events: subscription.drain(),
            total_locked: ether(self.container.vault.total_locked().await),
        })
    }

    async fn run_step(&self, index: usize, step: &Step) -> Result<StepReport, ScenarioError> {
        let result = self.execute(index, step).await?;

        let (outcome, note) = match (result, step.expected_error()) {
            (Ok(outcome), None) => {
                let note = unmet_expectation(step, &outcome);
                (outcome, note)
            }
            (Ok(outcome), Some(expected)) => {
                (outcome, Some(format!("expected rejection {expected}")))
            }
            (Err(err), expected) => {
                let note = match expected {
                    Some(expected) if expected == err.reason() => None,
                    Some(expected) => Some(format!("expected rejection {expected}")),
                    None => Some("unexpected rejection".to_string()),
                };
                (
                    Outcome::Rejected {
                        reason: err.reason().to_string(),
                        error: err.to_string(),
                    },
                    note,
                )
            }
        };

        let passed = note.is_none();
        if passed {
            log_event!(
                debug,
                COMPONENT,
                "[wh-runtime] step completed",
                step = index,
                action = step.action()
            );
        } else {
            log_event!(
                warn,
                COMPONENT,
                "[wh-runtime] step failed its expectation",
                step = index,
                action = step.action(),
                note = ?note
            );
        }

        Ok(StepReport {
            index,
            action: step.action(),
            outcome,
            passed,
            note,
        })
    }

    async fn execute(
        &self,
        index: usize,
        step: &Step,
    ) -> Result<VaultResult<Outcome>, ScenarioError> {
        let container = self.container;
        let vault = &container.vault;

        let result = match step {
            Step::Fund { account, amount } => {
                let wallet = parse_account(index, account)?;
                container
                    .custody
                    .fund(wallet, parse_ether(index, amount)?);
                Ok(Outcome::Funded {
                    balance: ether(container.custody.balance_of(&wallet)),
                })
            }

            Step::Deposit {
                account, amount, ..
            } => {
                let caller = parse_account(index, account)?;
                let amount = parse_ether(index, amount)?;
                vault
                    .deposit(caller, amount)
                    .await
                    .map(|total| Outcome::Deposited {
                        total: ether(total),
                    })
            }

            Step::SetParameters {
                account,
                target_date,
                lock_days,
                target_price_usd,
                ..
            } => {
                let caller = parse_account(index, account)?;
                let target_date = match (target_date, lock_days) {
                    (Some(date), _) => *date,
                    (None, Some(days)) => container
                        .clock
                        .now()
                        .saturating_add(days.saturating_mul(SECONDS_PER_DAY)),
                    (None, None) => return Err(ScenarioError::MissingTargetDate { step: index }),
                };
                vault
                    .set_parameters(caller, target_date, U256::from(*target_price_usd))
                    .await
                    .map(|()| Outcome::ParametersCommitted {
                        target_date,
                        target_price_usd: *target_price_usd,
                    })
            }

            Step::CanWithdraw { account, .. } => {
                let owner = parse_account(index, account)?;
                vault
                    .can_withdraw(owner)
                    .await
                    .map(|unlocked| Outcome::CanWithdraw { unlocked })
            }

            Step::Withdraw { account, .. } => {
                let caller = parse_account(index, account)?;
                vault.withdraw(caller).await.map(|amount| Outcome::Withdrawn {
                    amount: ether(amount),
                })
            }

            Step::UpdatePrice { usd, answer } => {
                let answer = match (usd, answer) {
                    (Some(usd), _) => usd_to_answer(usd, container.feed_decimals()).map_err(
                        |source| ScenarioError::InvalidAmount {
                            step: index,
                            value: usd.clone(),
                            source,
                        },
                    )?,
                    (None, Some(raw)) => i128::from(*raw),
                    (None, None) => return Err(ScenarioError::MissingPrice { step: index }),
                };
                let round_id = container.feed.update_answer(answer);
                Ok(Outcome::PriceUpdated {
                    round_id: round_id.to_string(),
                    answer: answer.to_string(),
                })
            }

            Step::AdvanceTime { seconds, days } => {
                container
                    .clock
                    .advance(seconds.saturating_add(days.saturating_mul(SECONDS_PER_DAY)));
                Ok(Outcome::TimeAdvanced {
                    now: container.clock.now(),
                })
            }

            Step::FailNextTransfer { reason } => {
                container.custody.fail_next_transfer(reason.clone());
                Ok(Outcome::TransferFailureArmed)
            }

            Step::LockInfo { account } => {
                let owner = parse_account(index, account)?;
                let info = vault.get_lock_info(owner).await;
                Ok(Outcome::Lock {
                    owner: address_to_hex(&owner),
                    amount: ether(info.amount),
                    target_date: info.target_date,
                    target_price_usd: info.target_price_usd.to_string(),
                    status: info.status,
                })
            }

            Step::CurrentPrice { .. } => vault.current_price().await.map(|price| Outcome::Price {
                usd: format_units(price, PRICE_DECIMALS),
            }),
        };

        Ok(result)
    }
}

/// Mismatch between a successful outcome and the step's `expect` field.
fn unmet_expectation(step: &Step, outcome: &Outcome) -> Option<String> {
    match (step, outcome) {
        (
            Step::CanWithdraw {
                expect: Some(expected),
                ..
            },
            Outcome::CanWithdraw { unlocked },
        ) if expected != unlocked => Some(format!("expected can_withdraw = {expected}")),
        _ => None,
    }
}

fn parse_account(step: usize, account: &str) -> Result<Address, ScenarioError> {
    address_from_hex(account).map_err(|source| ScenarioError::InvalidAccount {
        step,
        account: account.to_string(),
        source,
    })
}

fn parse_ether(step: usize, amount: &str) -> Result<U256, ScenarioError> {
    parse_units(amount, ETHER_DECIMALS).map_err(|source| ScenarioError::InvalidAmount {
        step,
        value: amount.to_string(),
        source,
    })
}

fn ether(amount: U256) -> String {
    format_units(amount, ETHER_DECIMALS)
}
