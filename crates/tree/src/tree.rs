//! Tree builder and proof generation

use std::collections::HashMap;

use drip_core::{Address, Hash, LeafRecord, LeafSchema, TreeError, LEAF_ENCODING_LEN};

use crate::hasher::Keccak256Hasher;
use crate::proof::{Claim, InclusionProof};

/// Order-independent binary hash tree over a fixed allowlist.
///
/// The tree is immutable once built. It retains the ordered leaf records and
/// the full level-by-level hash lists, so every proof is derived on demand
/// without recomputation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    /// Declared leaf field schema
    schema: LeafSchema,
    /// Ordered leaf records, as supplied at build time
    leaves: Vec<LeafRecord>,
    /// Per-level hash lists; `levels[0]` holds the leaf hashes in input
    /// order, the last level holds the root alone
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree over the given leaf set.
    ///
    /// The root is a pure function of the leaf multiset: pair sorting inside
    /// the hash rule makes it independent of input ordering. Input positions
    /// are still preserved across levels so indices map to proof paths.
    pub fn build(leaves: Vec<LeafRecord>, schema: LeafSchema) -> Result<Self, TreeError> {
        if !schema.is_supported() {
            return Err(TreeError::UnsupportedSchema {
                declared: schema.describe(),
            });
        }
        if leaves.is_empty() {
            return Err(TreeError::EmptyLeafSet);
        }

        let mut seen: HashMap<[u8; LEAF_ENCODING_LEN], usize> =
            HashMap::with_capacity(leaves.len());
        let mut leaf_hashes = Vec::with_capacity(leaves.len());
        for (index, leaf) in leaves.iter().enumerate() {
            let encoded = leaf.encode();
            if let Some(&first) = seen.get(&encoded) {
                return Err(TreeError::DuplicateLeaf {
                    first,
                    second: index,
                });
            }
            seen.insert(encoded, index);
            leaf_hashes.push(Keccak256Hasher::hash_leaf(&encoded));
        }

        let levels = Self::build_levels(leaf_hashes);
        Ok(Self {
            schema,
            leaves,
            levels,
        })
    }

    /// Hash adjacent positional pairs level by level until one hash remains.
    /// An odd trailing hash is promoted unchanged to the next level.
    fn build_levels(leaf_hashes: Vec<Hash>) -> Vec<Vec<Hash>> {
        let mut levels = vec![leaf_hashes];
        loop {
            let current = &levels[levels.len() - 1];
            if current.len() == 1 {
                break;
            }
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for pair in current.chunks(2) {
                if let [left, right] = pair {
                    next.push(Keccak256Hasher::hash_pair(left, right));
                } else {
                    next.push(pair[0]);
                }
            }
            levels.push(next);
        }
        levels
    }

    /// Root commitment over the leaf set
    pub fn root(&self) -> Hash {
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of committed leaves
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Always false: an empty leaf set is rejected at build time
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Ordered leaf records
    pub fn leaves(&self) -> &[LeafRecord] {
        &self.leaves
    }

    /// Declared leaf schema
    pub fn schema(&self) -> &LeafSchema {
        &self.schema
    }

    /// Per-level hash lists, leaf level first
    pub fn levels(&self) -> &[Vec<Hash>] {
        &self.levels
    }

    /// Find the leaf committed for an account.
    ///
    /// Linear scan: allowlists are small and fixed. Swap in a lookup map
    /// from account to index if that stops being true; observable behavior
    /// would not change.
    pub fn locate(&self, account: Address) -> Result<(usize, &LeafRecord), TreeError> {
        self.leaves
            .iter()
            .position(|leaf| leaf.account == account)
            .map(|index| (index, &self.leaves[index]))
            .ok_or(TreeError::NotFound { address: account })
    }

    /// Produce the inclusion proof for the leaf at `index`.
    ///
    /// Walks the recorded levels from leaf to root, emitting the positional
    /// sibling at each level. A promoted odd node has no sibling at that
    /// level and contributes nothing.
    pub fn prove_index(&self, index: usize) -> Result<InclusionProof, TreeError> {
        if index >= self.leaves.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: self.leaves.len(),
            });
        }

        let mut siblings = Vec::new();
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = position ^ 1;
            if sibling < level.len() {
                siblings.push(level[sibling]);
            }
            position /= 2;
        }

        Ok(InclusionProof::new(self.levels[0][index], siblings))
    }

    /// Locate an account and produce its claim: the matched record together
    /// with its inclusion proof
    pub fn prove_by_address(&self, account: Address) -> Result<Claim, TreeError> {
        let (index, leaf) = self.locate(account)?;
        let proof = self.prove_index(index)?;
        Ok(Claim {
            leaf: leaf.clone(),
            index,
            proof,
        })
    }
}
