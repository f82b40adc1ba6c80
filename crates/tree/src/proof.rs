//! Inclusion proofs and verification

use serde::{Deserialize, Serialize};

use drip_core::{Hash, LeafRecord};

use crate::hasher::Keccak256Hasher;

/// Ordered sibling hashes proving one leaf's membership
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// Double hash of the proven leaf's canonical encoding
    pub leaf_hash: Hash,
    /// Sibling hashes from leaf level to root. A level where the leaf's
    /// ancestor was the promoted odd node contributes no element.
    pub siblings: Vec<Hash>,
}

impl InclusionProof {
    /// Assemble a proof from a leaf hash and its ordered siblings
    pub const fn new(leaf_hash: Hash, siblings: Vec<Hash>) -> Self {
        Self {
            leaf_hash,
            siblings,
        }
    }

    /// Verify this proof against a root, recomputing the leaf hash from the
    /// record. Pure function, no I/O; matches the builder's hash rule bit
    /// for bit.
    pub fn verify(&self, leaf: &LeafRecord, root: &Hash) -> bool {
        if Keccak256Hasher::hash_leaf(&leaf.encode()) != self.leaf_hash {
            return false;
        }
        self.compute_root() == *root
    }

    /// Fold the siblings into the accumulated hash under the sorted-pair
    /// rule, in the order the proof was produced
    pub fn compute_root(&self) -> Hash {
        self.siblings
            .iter()
            .fold(self.leaf_hash, |acc, sibling| {
                Keccak256Hasher::hash_pair(&acc, sibling)
            })
    }
}

/// Verify a `(leaf, proof, root)` triple independently of any stored tree
pub fn verify(leaf: &LeafRecord, proof: &InclusionProof, root: &Hash) -> bool {
    proof.verify(leaf, root)
}

/// A matched allowlist record together with its inclusion proof
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claim {
    /// The matched leaf
    pub leaf: LeafRecord,
    /// The leaf's original position in the allowlist
    pub index: usize,
    /// Its inclusion proof
    pub proof: InclusionProof,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MerkleTree;
    use drip_core::{Address, LeafSchema, U256};

    fn leaf(n: u8) -> LeafRecord {
        LeafRecord::new(Address::with_last_byte(n), U256::from(n))
    }

    fn tree_of(size: u8) -> MerkleTree {
        MerkleTree::build((1..=size).map(leaf).collect(), LeafSchema::address_uint256())
            .unwrap()
    }

    #[test]
    fn test_tampered_sibling_fails() {
        let tree = tree_of(6);
        let root = tree.root();
        let record = leaf(3);
        let mut proof = tree.prove_index(2).unwrap();
        assert!(proof.verify(&record, &root));

        proof.siblings[1][0] ^= 0x01;
        assert!(!proof.verify(&record, &root));
    }

    #[test]
    fn test_tampered_leaf_fails() {
        let tree = tree_of(6);
        let root = tree.root();
        let proof = tree.prove_index(2).unwrap();

        let wrong_amount = LeafRecord::new(leaf(3).account, U256::from(999));
        assert!(!proof.verify(&wrong_amount, &root));

        let wrong_account = LeafRecord::new(Address::with_last_byte(77), leaf(3).amount);
        assert!(!proof.verify(&wrong_account, &root));
    }

    #[test]
    fn test_non_member_rejected_with_any_proof() {
        let tree = tree_of(6);
        let root = tree.root();
        let outsider = leaf(42);

        for index in 0..tree.len() {
            let proof = tree.prove_index(index).unwrap();
            assert!(!proof.verify(&outsider, &root));
        }
    }

    #[test]
    fn test_wrong_root_fails() {
        let tree = tree_of(4);
        let other = tree_of(5);
        let proof = tree.prove_index(0).unwrap();
        assert!(proof.verify(&leaf(1), &tree.root()));
        assert!(!proof.verify(&leaf(1), &other.root()));
    }

    #[test]
    fn test_proof_serde_round_trip() {
        let tree = tree_of(5);
        let proof = tree.prove_index(3).unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        let restored: InclusionProof = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, proof);
        assert!(restored.verify(&leaf(4), &tree.root()));
    }
}
