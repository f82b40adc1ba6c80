//! Ledger client seam

use async_trait::async_trait;

use drip_core::{Hash, LeafRecord};
use drip_tree::InclusionProof;

use crate::error::LedgerError;

/// Transaction identifier returned by the ledger, `0x`-prefixed
pub type TxId = String;

/// Opaque ledger capability: accepts a commitment value or a (leaf, proof)
/// pair and returns a transaction identifier or failure
#[async_trait]
pub trait LedgerClient {
    /// Publish the root commitment
    async fn submit_root(&self, root: Hash) -> Result<TxId, LedgerError>;

    /// Submit a claim: the leaf record together with its inclusion proof
    async fn submit_claim(
        &self,
        leaf: &LeafRecord,
        proof: &InclusionProof,
    ) -> Result<TxId, LedgerError>;
}
