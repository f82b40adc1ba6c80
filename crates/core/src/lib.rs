//! Core types for the drip allowlist distributor
//!
//! A fixed allowlist of `(address, amount)` records is committed to a single
//! Keccak-256 root. This crate holds what both the tree side and the ledger
//! side need to agree on: the leaf record, its canonical byte encoding, the
//! declared field schema, and the error taxonomy.

mod error;
mod leaf;
mod types;

pub use error::TreeError;
pub use leaf::{
    parse_allowlist, AllowlistEntry, FieldType, LeafRecord, LeafSchema, LEAF_ENCODING_LEN,
};
pub use types::{format_address_hex, format_hash_hex, Hash};

pub use alloy_primitives::{Address, U256};
