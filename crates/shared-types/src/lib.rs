//! # Shared Types Crate
//!
//! Primitive types used across the WeakHands crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `U256` and `Timestamp` are defined
//!   once here and re-exported by every crate that needs them.
//! - **Injected Time**: all time-dependent logic reads the clock through the
//!   `TimeSource` port so tests can pin or advance it deterministically.

pub mod entities;
pub mod errors;
pub mod time;
pub mod units;

pub use entities::*;
pub use errors::*;
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource, Timestamp, SECONDS_PER_DAY};
pub use units::{format_units, parse_units, ETHER_DECIMALS};
