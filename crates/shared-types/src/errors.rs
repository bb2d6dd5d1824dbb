//! # Error Types
//!
//! Defines error types for the shared primitives.

use thiserror::Error;

/// Errors from parsing a hex address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// The string is not valid hex.
    #[error("Invalid hex address: {0}")]
    InvalidHex(String),

    /// The decoded address does not have 20 bytes.
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Errors from converting between decimal strings and fixed-point integers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    /// Empty input.
    #[error("Empty amount")]
    Empty,

    /// Input contains something other than digits and a single dot.
    #[error("Invalid amount: {0}")]
    InvalidDigits(String),

    /// More fractional digits than the unit supports.
    #[error("Too many decimal places in {value}: unit supports {decimals}")]
    TooManyDecimals { value: String, decimals: u8 },

    /// Decimal count exceeds what a 256-bit integer can scale to.
    #[error("Unsupported decimals: {0}")]
    UnsupportedDecimals(u8),

    /// Scaled value does not fit in 256 bits.
    #[error("Amount overflows 256 bits: {0}")]
    Overflow(String),
}
