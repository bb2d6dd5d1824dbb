//! Attack simulations against the vault.
//!
//! Each module plays a hostile party and asserts that custody never pays
//! out more than was deposited.

pub mod oracle_abuse;
pub mod reentrancy;
