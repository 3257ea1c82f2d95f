// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Commitment builder.
//!
//! Folds the three leaf collections into one state root:
//!
//! ```text
//! rootERC20  = merkle(leaf(erc20[0]),  leaf(erc20[1]),  ...)
//! rootBridge = merkle(leaf(bridge[0]), leaf(bridge[1]), ...)
//! rootAVL    = merkle(leaf(avl[0]),    leaf(avl[1]),    ...)
//! stateRoot  = BLAKE3(rootERC20 || rootBridge || rootAVL)   -- 96 bytes in
//! ```
//!
//! Pure over the leaves: same leaves, same roots, on every replica.

pub mod leaf;
pub mod merkle;

use serde::{Deserialize, Serialize};

use crate::state::leaves::Leaves;
use crate::types::Hash;
pub use merkle::{merkle_root, MerkleProof};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRoots {
    pub erc20: Hash,
    pub bridge: Hash,
    pub avl: Hash,
    pub state: Hash,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collection {
    Erc20,
    Bridge,
    Avl,
}

pub fn erc20_leaves(leaves: &Leaves) -> Vec<Hash> {
    leaves.erc20.iter().map(leaf::token_account_leaf).collect()
}

pub fn bridge_leaves(leaves: &Leaves) -> Vec<Hash> {
    leaves.bridge.iter().map(leaf::bridge_request_leaf).collect()
}

pub fn avl_leaves(leaves: &Leaves) -> Vec<Hash> {
    leaves.avl.iter().map(leaf::cross_chain_account_leaf).collect()
}

/// `BLAKE3(erc20 || bridge || avl)` over the three fixed-width roots.
pub fn state_root(erc20: &Hash, bridge: &Hash, avl: &Hash) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(erc20);
    hasher.update(bridge);
    hasher.update(avl);
    *hasher.finalize().as_bytes()
}

pub fn compute_roots(leaves: &Leaves) -> StateRoots {
    let erc20 = merkle_root(&erc20_leaves(leaves));
    let bridge = merkle_root(&bridge_leaves(leaves));
    let avl = merkle_root(&avl_leaves(leaves));
    StateRoots {
        erc20,
        bridge,
        avl,
        state: state_root(&erc20, &bridge, &avl),
    }
}

/// Inclusion of one leaf in a state root.
///
/// Carries the other two collection roots so a verifier holding only the
/// published `stateRoot` can check it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateProof {
    pub collection: Collection,
    pub leaf: Hash,
    pub proof: MerkleProof,
    pub erc20_root: Hash,
    pub bridge_root: Hash,
    pub avl_root: Hash,
}

impl StateProof {
    pub fn verify(&self, state: &Hash) -> bool {
        let Some(collection_root) = self.proof.compute_root(&self.leaf) else {
            return false;
        };
        let claimed = match self.collection {
            Collection::Erc20 => &self.erc20_root,
            Collection::Bridge => &self.bridge_root,
            Collection::Avl => &self.avl_root,
        };
        collection_root == *claimed && state_root(&self.erc20_root, &self.bridge_root, &self.avl_root) == *state
    }
}

fn prove(leaves: &Leaves, collection: Collection, index: usize) -> Option<StateProof> {
    let hashes = match collection {
        Collection::Erc20 => erc20_leaves(leaves),
        Collection::Bridge => bridge_leaves(leaves),
        Collection::Avl => avl_leaves(leaves),
    };
    let proof = MerkleProof::generate(&hashes, index)?;
    let roots = compute_roots(leaves);
    Some(StateProof {
        collection,
        leaf: hashes[index],
        proof,
        erc20_root: roots.erc20,
        bridge_root: roots.bridge,
        avl_root: roots.avl,
    })
}

pub fn prove_erc20(leaves: &Leaves, index: usize) -> Option<StateProof> {
    prove(leaves, Collection::Erc20, index)
}

pub fn prove_bridge(leaves: &Leaves, index: usize) -> Option<StateProof> {
    prove(leaves, Collection::Bridge, index)
}

pub fn prove_avl(leaves: &Leaves, index: usize) -> Option<StateProof> {
    prove(leaves, Collection::Avl, index)
}
