//! # WeakHands Runtime Library
//!
//! Wiring and scenario execution for a local WeakHands deployment.
//! The entry point is the `wh-runtime` binary; the modules are exposed for
//! the integration test suite.
//!
//! ## Module Structure
//!
//! ```text
//! wh-runtime/
//! ├── container/   # RuntimeConfig, VaultContainer (component wiring)
//! └── scenario/    # Scenario format, ScenarioRunner, reports
//! ```

#![warn(missing_docs)]

pub mod container;
pub mod scenario;

pub use container::{ConfigError, RuntimeConfig, VaultContainer};
pub use scenario::{Scenario, ScenarioError, ScenarioReport, ScenarioRunner};

/// Component identifier used in log fields.
pub const COMPONENT: &str = "wh-runtime";
