//! # Scenarios
//!
//! JSON-described sequences of vault operations, run against a fresh
//! [`VaultContainer`](crate::container::VaultContainer).

mod error;
mod runner;
mod steps;

pub use error::ScenarioError;
pub use runner::{Outcome, ScenarioReport, ScenarioRunner, StepReport};
pub use steps::{Scenario, Step, DEMO_ACCOUNT};
