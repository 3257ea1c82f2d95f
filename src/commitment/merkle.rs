// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Binary Merkle tree over leaf hashes.
//!
//! - parent = BLAKE3(left || right)
//! - an odd trailing node is promoted to the next level unchanged
//! - a single leaf is its own root
//! - the empty tree has the all-zero root

use serde::{Deserialize, Serialize};

use crate::config::EMPTY_ROOT;
use crate::types::Hash;

pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}

fn next_level(level: &[Hash]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_pair(left, right),
            [single] => *single,
            _ => unreachable!("chunks(2) yields one or two items"),
        })
        .collect()
}

pub fn merkle_root(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return EMPTY_ROOT;
    }
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level);
    }
    level[0]
}

/// Inclusion proof for one leaf.
///
/// Promoted levels contribute no sibling; `tree_size` is what lets the
/// verifier tell those levels apart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    pub leaf_index: u64,
    pub tree_size: u64,
    pub siblings: Vec<Hash>,
}

impl MerkleProof {
    pub fn generate(leaves: &[Hash], leaf_index: usize) -> Option<Self> {
        if leaf_index >= leaves.len() {
            return None;
        }
        let mut siblings = Vec::new();
        let mut level = leaves.to_vec();
        let mut index = leaf_index;
        while level.len() > 1 {
            let sibling = index ^ 1;
            if sibling < level.len() {
                siblings.push(level[sibling]);
            }
            level = next_level(&level);
            index /= 2;
        }
        Some(Self {
            leaf_index: leaf_index as u64,
            tree_size: leaves.len() as u64,
            siblings,
        })
    }

    /// Folds `leaf` up the sibling path. `None` if the proof is malformed.
    pub fn compute_root(&self, leaf: &Hash) -> Option<Hash> {
        if self.leaf_index >= self.tree_size {
            return None;
        }
        let mut siblings = self.siblings.iter();
        let mut hash = *leaf;
        let mut index = self.leaf_index;
        let mut width = self.tree_size;
        while width > 1 {
            if index % 2 == 1 {
                hash = hash_pair(siblings.next()?, &hash);
            } else if index + 1 < width {
                hash = hash_pair(&hash, siblings.next()?);
            }
            index /= 2;
            width = width.div_ceil(2);
        }
        if siblings.next().is_some() {
            return None;
        }
        Some(hash)
    }

    pub fn verify(&self, root: &Hash, leaf: &Hash) -> bool {
        self.compute_root(leaf).as_ref() == Some(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(n: u8) -> Vec<Hash> {
        (0..n).map(|i| *blake3::hash(&[i]).as_bytes()).collect()
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(merkle_root(&[]), EMPTY_ROOT);
        let one = leaves(1);
        assert_eq!(merkle_root(&one), one[0]);
    }

    #[test]
    fn test_odd_node_is_promoted() {
        let l = leaves(3);
        let expected = hash_pair(&hash_pair(&l[0], &l[1]), &l[2]);
        assert_eq!(merkle_root(&l), expected);
    }

    #[test]
    fn test_order_matters() {
        let l = leaves(2);
        let swapped = [l[1], l[0]];
        assert_ne!(merkle_root(&l), merkle_root(&swapped));
    }

    #[test]
    fn test_proofs_verify_for_every_leaf() {
        for n in 1..=9u8 {
            let l = leaves(n);
            let root = merkle_root(&l);
            for (i, leaf) in l.iter().enumerate() {
                let proof = MerkleProof::generate(&l, i).unwrap();
                assert!(proof.verify(&root, leaf), "leaf {i} of {n}");
            }
        }
    }

    #[test]
    fn test_tampered_proof_fails() {
        let l = leaves(5);
        let root = merkle_root(&l);
        let mut proof = MerkleProof::generate(&l, 2).unwrap();
        assert!(!proof.verify(&root, &l[3]));

        proof.siblings[0][0] ^= 1;
        assert!(!proof.verify(&root, &l[2]));

        let mut truncated = MerkleProof::generate(&l, 4).unwrap();
        truncated.tree_size = 4;
        assert!(!truncated.verify(&root, &l[4]));
        assert!(MerkleProof::generate(&l, 5).is_none());
    }
}
