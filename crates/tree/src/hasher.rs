//! Keccak-256 hashing primitives for the commitment scheme

use tiny_keccak::{Hasher, Keccak};

use drip_core::Hash;

/// Domain prefix for the first pass of the leaf hash
const LEAF_PREFIX: u8 = 0x00;

/// Domain prefix for internal node hashes
const NODE_PREFIX: u8 = 0x01;

/// Keccak-256 hasher
pub struct Keccak256Hasher;

impl Keccak256Hasher {
    /// Hash arbitrary bytes
    pub fn hash(data: &[u8]) -> Hash {
        let mut hasher = Keccak::v256();
        hasher.update(data);
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        output
    }

    /// Hash a canonically encoded leaf.
    ///
    /// The encoding is hashed twice, with a `0x00` prefix on the first pass,
    /// so a leaf hash can never collide with an internal node hash.
    pub fn hash_leaf(encoded: &[u8]) -> Hash {
        let mut hasher = Keccak::v256();
        hasher.update(&[LEAF_PREFIX]);
        hasher.update(encoded);
        let mut inner = [0u8; 32];
        hasher.finalize(&mut inner);
        Self::hash(&inner)
    }

    /// Hash two sibling hashes into their parent.
    ///
    /// The pair is sorted lexicographically before concatenation, prefixed
    /// with `0x01`. Sorting here is what makes proofs order-independent.
    pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let mut hasher = Keccak::v256();
        hasher.update(&[NODE_PREFIX]);
        hasher.update(lo);
        hasher.update(hi);
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_pair_is_symmetric() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        assert_eq!(
            Keccak256Hasher::hash_pair(&a, &b),
            Keccak256Hasher::hash_pair(&b, &a)
        );
    }

    #[test]
    fn test_hash_pair_not_identity() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        let parent = Keccak256Hasher::hash_pair(&a, &b);
        assert_ne!(parent, a);
        assert_ne!(parent, b);
    }

    #[test]
    fn test_leaf_and_node_domains_are_separated() {
        // A 64-byte "encoding" that happens to equal two concatenated node
        // hashes must not hash to the same value under both rules.
        let a = [3u8; 32];
        let b = [4u8; 32];
        let mut concat = [0u8; 64];
        concat[..32].copy_from_slice(&a);
        concat[32..].copy_from_slice(&b);

        let as_leaf = Keccak256Hasher::hash_leaf(&concat);
        let as_node = Keccak256Hasher::hash_pair(&a, &b);
        assert_ne!(as_leaf, as_node);
    }

    #[test]
    fn test_hash_leaf_is_double_hashed() {
        let encoded = [7u8; 64];
        let mut prefixed = Vec::with_capacity(65);
        prefixed.push(0x00);
        prefixed.extend_from_slice(&encoded);
        let single = Keccak256Hasher::hash(&prefixed);

        assert_ne!(Keccak256Hasher::hash_leaf(&encoded), single);
        assert_eq!(
            Keccak256Hasher::hash_leaf(&encoded),
            Keccak256Hasher::hash(&single)
        );
    }
}
