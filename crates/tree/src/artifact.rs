//! Serialized tree artifact
//!
//! The artifact is the sole interchange point between build time and proof
//! time: a format version tag, the declared leaf schema, the ordered original
//! leaf records, and the full per-level hash lists. It is sufficient to
//! regenerate any proof and to recompute the root as a consistency check.

use serde::{Deserialize, Serialize};

use drip_core::{Hash, LeafRecord, LeafSchema, TreeError};

use crate::tree::MerkleTree;

/// Current artifact format version
pub const ARTIFACT_VERSION: u32 = 1;

/// Serialized, reloadable description of a built tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeArtifact {
    /// Format version tag
    pub version: u32,
    /// Declared leaf field schema
    pub schema: LeafSchema,
    /// Ordered original leaf records, for address-to-index lookup
    pub leaves: Vec<LeafRecord>,
    /// Per-level hash lists, leaf level first, root level last
    pub levels: Vec<Vec<Hash>>,
}

impl TreeArtifact {
    /// Snapshot a built tree
    pub fn from_tree(tree: &MerkleTree) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            schema: tree.schema().clone(),
            leaves: tree.leaves().to_vec(),
            levels: tree.levels().to_vec(),
        }
    }

    /// Reload the tree this artifact describes.
    ///
    /// Fails fast on an incompatible version or schema, and rebuilds the
    /// hash levels from the stored leaves: any divergence from the stored
    /// lists means the artifact was edited or truncated, and no proof from
    /// it can be trusted.
    pub fn into_tree(self) -> Result<MerkleTree, TreeError> {
        let Self {
            version,
            schema,
            leaves,
            levels,
        } = self;

        if version != ARTIFACT_VERSION {
            return Err(TreeError::ArtifactVersionMismatch {
                found: format!("version {version}"),
                expected: format!("version {ARTIFACT_VERSION}"),
            });
        }
        if !schema.is_supported() {
            return Err(TreeError::ArtifactVersionMismatch {
                found: format!("schema {}", schema.describe()),
                expected: format!("schema {}", LeafSchema::address_uint256().describe()),
            });
        }

        let tree = MerkleTree::build(leaves, schema)?;
        if tree.levels() != levels.as_slice() {
            return Err(TreeError::ArtifactCorrupted {
                reason: "stored hash levels do not match the stored leaves".into(),
            });
        }
        Ok(tree)
    }

    /// Serialize to the artifact JSON document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse an artifact JSON document. Structural validation happens in
    /// [`Self::into_tree`].
    pub fn from_json(document: &str) -> Result<Self, TreeError> {
        serde_json::from_str(document).map_err(|e| TreeError::ArtifactCorrupted {
            reason: format!("unparseable artifact document: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drip_core::{Address, U256};

    fn sample_tree() -> MerkleTree {
        let leaves: Vec<LeafRecord> = (1u8..=5)
            .map(|n| LeafRecord::new(Address::with_last_byte(n), U256::from(n)))
            .collect();
        MerkleTree::build(leaves, LeafSchema::address_uint256()).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_root_and_proofs() {
        let tree = sample_tree();
        let artifact = TreeArtifact::from_tree(&tree);

        let json = artifact.to_json().unwrap();
        let reloaded = TreeArtifact::from_json(&json).unwrap().into_tree().unwrap();

        assert_eq!(reloaded.root(), tree.root());
        for index in 0..tree.len() {
            assert_eq!(
                reloaded.prove_index(index).unwrap(),
                tree.prove_index(index).unwrap()
            );
        }
    }

    #[test]
    fn test_version_mismatch_fails_fast() {
        let mut artifact = TreeArtifact::from_tree(&sample_tree());
        artifact.version = 2;
        assert!(matches!(
            artifact.into_tree(),
            Err(TreeError::ArtifactVersionMismatch { .. })
        ));
    }

    #[test]
    fn test_schema_mismatch_fails_fast() {
        use drip_core::FieldType;
        let mut artifact = TreeArtifact::from_tree(&sample_tree());
        artifact.schema = LeafSchema(vec![FieldType::Address]);
        assert!(matches!(
            artifact.into_tree(),
            Err(TreeError::ArtifactVersionMismatch { .. })
        ));
    }

    #[test]
    fn test_edited_level_hash_is_detected() {
        let mut artifact = TreeArtifact::from_tree(&sample_tree());
        artifact.levels[1][0][0] ^= 0xff;
        assert!(matches!(
            artifact.into_tree(),
            Err(TreeError::ArtifactCorrupted { .. })
        ));
    }

    #[test]
    fn test_edited_leaf_is_detected() {
        let mut artifact = TreeArtifact::from_tree(&sample_tree());
        artifact.leaves[2].amount = U256::from(7);
        assert!(matches!(
            artifact.into_tree(),
            Err(TreeError::ArtifactCorrupted { .. })
        ));
    }

    #[test]
    fn test_garbage_document_is_rejected() {
        assert!(matches!(
            TreeArtifact::from_json("not json at all"),
            Err(TreeError::ArtifactCorrupted { .. })
        ));
    }
}
