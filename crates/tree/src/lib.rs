//! Order-independent Merkle commitment over a fixed allowlist
//!
//! This crate implements the commitment core:
//! - Tree builder: canonical leaf encoding, domain-separated double hashing,
//!   bottom-up sorted-pair tree construction
//! - Proof service: address lookup, sibling collection, and a pure verifier
//!   matching the builder's hash rule bit for bit
//! - A versioned, serializable artifact sufficient to regenerate any proof
//!
//! Pair sorting makes the root independent of input ordering and makes
//! sibling order implicit in proofs; no left/right flags exist anywhere.

mod artifact;
mod hasher;
mod proof;
mod tree;

pub use artifact::{TreeArtifact, ARTIFACT_VERSION};
pub use hasher::Keccak256Hasher;
pub use proof::{verify, Claim, InclusionProof};
pub use tree::MerkleTree;
