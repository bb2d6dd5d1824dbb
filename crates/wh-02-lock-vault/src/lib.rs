//! # WH-02 Lock Vault
//!
//! Single-beneficiary value locks released by date or by price.
//!
//! **Component ID:** 02
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! A party deposits value, commits once to an unlock condition, and may
//! withdraw as soon as either part of it holds:
//!
//! ```text
//! unlock = now >= target_date  OR  oracle_price >= target_price
//! ```
//!
//! ## Lock Lifecycle
//!
//! | State | deposit | set_parameters | withdraw |
//! |-------|---------|----------------|----------|
//! | Empty | → Deposited | NoDepositFound | conditions not met |
//! | Deposited | adds | → Committed | conditions not met |
//! | Committed | adds | ParametersAlreadySet | → Withdrawn if unlocked |
//! | Withdrawn | LockAlreadyWithdrawn | ParametersAlreadySet | conditions not met |
//!
//! ## Module Structure
//!
//! ```text
//! wh-02-lock-vault/
//! ├── domain/          # LockState, Lock, UnlockParameters, VaultError, invariants
//! ├── ports/           # LockVaultApi (inbound), ValueCustody (outbound)
//! ├── adapters/        # InMemoryCustody
//! ├── service.rs       # LockVaultService
//! └── metrics.rs       # Prometheus metrics (feature = "metrics")
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryCustody;
pub use domain::{
    CustodyError, Lock, LockInfo, LockState, LockStatus, UnlockParameters, VaultError,
    VaultResult,
};
pub use ports::{LockVaultApi, ValueCustody};
pub use service::LockVaultService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Component identifier used in log fields.
pub const COMPONENT: &str = "wh-02";
