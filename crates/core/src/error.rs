//! Error taxonomy for the commitment core
//!
//! Every error is returned synchronously to the immediate caller; nothing is
//! retried or logged here. Presentation belongs to the binaries.

use alloy_primitives::Address;
use thiserror::Error;

/// Errors surfaced by the tree builder and proof service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A leaf field cannot be canonically encoded
    #[error("leaf {index} cannot be canonically encoded: {reason}")]
    InvalidLeafEncoding { index: usize, reason: String },

    /// Two input positions encode to identical bytes, making the proof
    /// target ambiguous
    #[error("leaves {first} and {second} encode to identical bytes")]
    DuplicateLeaf { first: usize, second: usize },

    /// The leaf set is empty
    #[error("cannot commit to an empty leaf set")]
    EmptyLeafSet,

    /// The declared field schema is not the supported `(address, uint256)`
    #[error("unsupported leaf schema {declared}")]
    UnsupportedSchema { declared: String },

    /// No leaf matches the queried address
    #[error("no leaf matches address {address}")]
    NotFound { address: Address },

    /// The leaf index does not exist in the tree
    #[error("leaf index {index} out of range ({len} leaves)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The artifact was produced with an incompatible format version or schema
    #[error("artifact mismatch: found {found}, expected {expected}")]
    ArtifactVersionMismatch { found: String, expected: String },

    /// The artifact's stored hash levels do not match its stored leaves
    #[error("artifact corrupted: {reason}")]
    ArtifactCorrupted { reason: String },
}
