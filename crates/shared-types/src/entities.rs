//! # Core Entities
//!
//! Address and amount primitives shared by every crate.

use crate::errors::AddressParseError;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// The zero address.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Render an address as a `0x`-prefixed lowercase hex string.
pub fn address_to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Render an abbreviated address (`0xabcd…ef01`) for log lines.
pub fn short_address(address: &Address) -> String {
    let full = hex::encode(address);
    format!("0x{}…{}", &full[..4], &full[full.len() - 4..])
}

/// Parse a hex address, with or without the `0x` prefix.
pub fn address_from_hex(s: &str) -> Result<Address, AddressParseError> {
    let stripped = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    let bytes = hex::decode(stripped).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
    if bytes.len() != 20 {
        return Err(AddressParseError::InvalidLength(bytes.len()));
    }

    let mut address = ZERO_ADDRESS;
    address.copy_from_slice(&bytes);
    Ok(address)
}
