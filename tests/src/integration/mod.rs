//! Cross-crate flows through the public APIs.

pub mod lock_lifecycle;
pub mod withdraw_races;
