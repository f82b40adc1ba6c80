//! Allowlist leaf records and their canonical encoding

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// Leaf field types supported by the canonical encoder
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// 20-byte account address, encoded as a left-padded 32-byte word
    Address,
    /// Unsigned 256-bit integer, encoded as a big-endian 32-byte word
    Uint256,
}

impl FieldType {
    /// Solidity name of the field type
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Uint256 => "uint256",
        }
    }
}

/// Ordered leaf field schema, declared at build time and recorded in the
/// artifact so a loader can fail fast on a mismatch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafSchema(pub Vec<FieldType>);

impl LeafSchema {
    /// The `(address, uint256)` schema of an allowlist leaf
    pub fn address_uint256() -> Self {
        Self(vec![FieldType::Address, FieldType::Uint256])
    }

    /// Whether this schema is the one the encoder supports
    pub fn is_supported(&self) -> bool {
        *self == Self::address_uint256()
    }

    /// Render as a Solidity-style tuple, e.g. `(address, uint256)`
    pub fn describe(&self) -> String {
        let fields: Vec<&str> = self.0.iter().map(FieldType::as_str).collect();
        format!("({})", fields.join(", "))
    }
}

impl Default for LeafSchema {
    fn default() -> Self {
        Self::address_uint256()
    }
}

/// Canonical encoding width: two 32-byte words
pub const LEAF_ENCODING_LEN: usize = 64;

/// One committed allowlist record. Immutable once the leaf set is fixed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafRecord {
    /// Claimant account
    pub account: Address,
    /// Amount allotted to the account, in base units
    pub amount: U256,
}

impl LeafRecord {
    /// Create a record from already-typed values
    pub const fn new(account: Address, amount: U256) -> Self {
        Self { account, amount }
    }

    /// Parse a record from allowlist strings.
    ///
    /// Address hex case is irrelevant: the canonical form is the 20-byte
    /// value, so checksummed and lowercase spellings of the same account
    /// yield identical encodings.
    pub fn parse(index: usize, account: &str, amount: &str) -> Result<Self, TreeError> {
        let account: Address =
            account
                .parse()
                .map_err(|e| TreeError::InvalidLeafEncoding {
                    index,
                    reason: format!("malformed address {account:?}: {e}"),
                })?;
        let amount: U256 = amount
            .parse()
            .map_err(|e| TreeError::InvalidLeafEncoding {
                index,
                reason: format!("malformed amount {amount:?}: {e}"),
            })?;
        Ok(Self { account, amount })
    }

    /// Canonical `abi.encode(address, uint256)` encoding: the address
    /// left-padded to a 32-byte word, then the amount as a big-endian
    /// 32-byte word
    pub fn encode(&self) -> [u8; LEAF_ENCODING_LEN] {
        let mut words = [0u8; LEAF_ENCODING_LEN];
        words[12..32].copy_from_slice(self.account.as_slice());
        words[32..64].copy_from_slice(&self.amount.to_be_bytes::<32>());
        words
    }
}

/// One entry of the allowlist input document: an `[address, amount]` pair
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllowlistEntry(pub String, pub String);

/// Parse an allowlist document into leaf records, preserving input order
pub fn parse_allowlist(entries: &[AllowlistEntry]) -> Result<Vec<LeafRecord>, TreeError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| LeafRecord::parse(index, &entry.0, &entry.1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_encode_layout() {
        let record = LeafRecord::new(
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            U256::from(5),
        );
        let encoded = record.encode();

        assert_eq!(&encoded[..12], &[0u8; 12][..]);
        assert_eq!(&encoded[12..32], record.account.as_slice());
        assert_eq!(&encoded[32..63], &[0u8; 31][..]);
        assert_eq!(encoded[63], 5);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let checksummed =
            LeafRecord::parse(0, "0xaD73eafCAc4F4c6755DFc61770875fb8B6bC8A25", "5").unwrap();
        let lowercase =
            LeafRecord::parse(0, "0xad73eafcac4f4c6755dfc61770875fb8b6bc8a25", "5").unwrap();
        assert_eq!(checksummed, lowercase);
        assert_eq!(checksummed.encode(), lowercase.encode());
    }

    #[test]
    fn test_parse_rejects_malformed_fields() {
        let short = LeafRecord::parse(3, "0x1234", "5");
        assert!(matches!(
            short,
            Err(TreeError::InvalidLeafEncoding { index: 3, .. })
        ));

        let not_hex = LeafRecord::parse(0, "not-an-address", "5");
        assert!(matches!(
            not_hex,
            Err(TreeError::InvalidLeafEncoding { .. })
        ));

        let bad_amount =
            LeafRecord::parse(1, "0xad73eafcac4f4c6755dfc61770875fb8b6bc8a25", "five");
        assert!(matches!(
            bad_amount,
            Err(TreeError::InvalidLeafEncoding { index: 1, .. })
        ));
    }

    #[test]
    fn test_schema_describe() {
        let schema = LeafSchema::address_uint256();
        assert!(schema.is_supported());
        assert_eq!(schema.describe(), "(address, uint256)");

        let flipped = LeafSchema(vec![FieldType::Uint256, FieldType::Address]);
        assert!(!flipped.is_supported());
    }

    #[test]
    fn test_parse_allowlist_reports_position() {
        let entries = vec![
            AllowlistEntry(
                "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".into(),
                "5000000000000000000".into(),
            ),
            AllowlistEntry("0xbad".into(), "1".into()),
        ];
        let err = parse_allowlist(&entries).unwrap_err();
        assert!(matches!(
            err,
            TreeError::InvalidLeafEncoding { index: 1, .. }
        ));
    }
}
