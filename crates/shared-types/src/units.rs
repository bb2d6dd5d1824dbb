//! # Decimal Units
//!
//! Conversions between human-readable decimal strings ("1.5") and the
//! fixed-point integers the ledger and the price feed work in.

use crate::entities::U256;
use crate::errors::UnitsError;

/// Decimals of the native value unit (wei per ether).
pub const ETHER_DECIMALS: u8 = 18;

/// Largest power of ten that fits in a U256.
const MAX_DECIMALS: u8 = 77;

/// Parse a decimal string into a fixed-point integer with `decimals` places.
///
/// `parse_units("1.5", 18)` is `1_500_000_000_000_000_000`.
pub fn parse_units(value: &str, decimals: u8) -> Result<U256, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::UnsupportedDecimals(decimals));
    }

    let value = value.trim();
    if value.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitsError::InvalidDigits(value.to_string()));
    }

    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooManyDecimals {
            value: value.to_string(),
            decimals,
        });
    }

    let overflow = || UnitsError::Overflow(value.to_string());

    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| overflow())?
    };

    let fraction = if decimals == 0 {
        U256::zero()
    } else {
        let padded = format!("{:0<width$}", fraction, width = decimals as usize);
        U256::from_dec_str(&padded).map_err(|_| overflow())?
    };

    whole
        .checked_mul(U256::exp10(decimals as usize))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Format a fixed-point integer with `decimals` places as a decimal string.
///
/// Trailing fractional zeros are dropped: `format_units(1_500_000_000_000_000_000, 18)`
/// is `"1.5"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    if decimals == 0 {
        return digits;
    }

    let places = decimals as usize;
    let padded = if digits.len() <= places {
        format!("{:0>width$}", digits, width = places + 1)
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - places);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}
