//! Mock ledger for tests and dry runs

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use drip_core::{format_hash_hex, Hash, LeafRecord};
use drip_tree::InclusionProof;

use crate::client::{LedgerClient, TxId};
use crate::error::LedgerError;

/// One recorded submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// A published root commitment
    Root(Hash),
    /// A submitted claim
    Claim {
        leaf: LeafRecord,
        proof: InclusionProof,
    },
}

/// Recording ledger client with no network behind it. Hands out
/// deterministic transaction ids.
#[derive(Debug, Default)]
pub struct MockLedger {
    submissions: Mutex<Vec<Submission>>,
    reject_with: Option<String>,
}

impl MockLedger {
    /// A mock that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that rejects every submission with the given message, for
    /// failure-path tests
    pub fn rejecting(message: &str) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            reject_with: Some(message.to_string()),
        }
    }

    /// Submissions recorded so far
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    fn record(&self, submission: Submission) -> Result<TxId, LedgerError> {
        if let Some(message) = &self.reject_with {
            return Err(LedgerError::RejectedByLedger {
                message: message.clone(),
            });
        }
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(submission);
        Ok(format!("0x{:064x}", submissions.len()))
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn submit_root(&self, root: Hash) -> Result<TxId, LedgerError> {
        info!("Mock ledger accepting root {}", format_hash_hex(&root));
        self.record(Submission::Root(root))
    }

    async fn submit_claim(
        &self,
        leaf: &LeafRecord,
        proof: &InclusionProof,
    ) -> Result<TxId, LedgerError> {
        info!("Mock ledger accepting claim for {}", leaf.account);
        self.record(Submission::Claim {
            leaf: leaf.clone(),
            proof: proof.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drip_core::{Address, U256};

    fn sample_claim() -> (LeafRecord, InclusionProof) {
        let leaf = LeafRecord::new(Address::with_last_byte(5), U256::from(5));
        let proof = InclusionProof::new([0x01u8; 32], vec![[0x02u8; 32]]);
        (leaf, proof)
    }

    #[tokio::test]
    async fn test_mock_records_submissions_in_order() {
        let ledger = MockLedger::new();
        let (leaf, proof) = sample_claim();

        let root_tx = ledger.submit_root([0xaau8; 32]).await.unwrap();
        let claim_tx = ledger.submit_claim(&leaf, &proof).await.unwrap();
        assert_ne!(root_tx, claim_tx);

        let submissions = ledger.submissions();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0], Submission::Root([0xaau8; 32]));
        assert_eq!(submissions[1], Submission::Claim { leaf, proof });
    }

    #[tokio::test]
    async fn test_rejecting_mock_surfaces_ledger_error() {
        let ledger = MockLedger::rejecting("execution reverted: InvalidProof()");
        let (leaf, proof) = sample_claim();

        let err = ledger.submit_claim(&leaf, &proof).await.unwrap_err();
        assert!(matches!(err, LedgerError::RejectedByLedger { .. }));
        assert!(ledger.submissions().is_empty());
    }
}
