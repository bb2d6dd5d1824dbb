//! # Vault Container
//!
//! Holds the component instances of one local deployment and wires them:
//!
//! ```text
//! ManualTimeSource ──► MockV3Aggregator ──► PriceOracleService ──┐
//!        │                                                       ▼
//!        └──────────────────────────────────────────────► LockVaultService
//!                        InMemoryCustody ───────────────────────┤
//!                        InMemoryEventBus ◄─────────────────────┘
//! ```

pub mod config;
pub mod components;

pub use components::{RuntimeOracle, RuntimeVault, VaultContainer};
pub use config::{usd_to_answer, ConfigError, RuntimeConfig};
