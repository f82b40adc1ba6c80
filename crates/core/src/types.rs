//! Common types

use alloy_primitives::Address;

/// 32-byte hash type
pub type Hash = [u8; 32];

/// Format a 32-byte hash as a hexadecimal string with 0x prefix
pub fn format_hash_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Format an address as lowercase hexadecimal with 0x prefix
pub fn format_address_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}
