//! # WeakHands Test Suite
//!
//! Cross-crate tests for the oracle, the vault and the runtime.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deployment builders and custody doubles
//! ├── integration/      # Lock lifecycle and withdrawal races
//! └── exploits/         # Attack simulations (reentrancy, oracle abuse)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wh-tests
//!
//! # By category
//! cargo test -p wh-tests integration::
//! cargo test -p wh-tests exploits::
//! ```

#![allow(dead_code)]

pub mod exploits;
pub mod fixtures;
pub mod integration;
