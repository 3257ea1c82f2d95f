// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::{anyhow, Context};
use clap::Subcommand;
use serde_json::json;
use stoken_kernel::types::{hash_hex, Address, AvlAddress, BridgeId};
use stoken_kernel::StateProof;
use stoken_persistence::LedgerStore;

use crate::config::LedgerConfig;

#[derive(Debug, Clone, Subcommand)]
pub enum ProveTarget {
    /// A token account, by address.
    Account { address: String },
    /// A bridge request, by id.
    Bridge { id: u64 },
    /// A cross-chain account, by external address.
    Avl { avl_address: String },
}

/// Prints an inclusion proof for one leaf against the current stateRoot.
pub fn run(cfg: &LedgerConfig, target: &ProveTarget) -> anyhow::Result<StateProof> {
    let store = LedgerStore::open(cfg.paths()).context("Failed to open ledger")?;
    let ledger = store.ledger();

    let proof = match target {
        ProveTarget::Account { address } => ledger.prove_account(&Address::parse(address)?),
        ProveTarget::Bridge { id } => ledger.prove_bridge_request(BridgeId(*id)),
        ProveTarget::Avl { avl_address } => ledger.prove_avl_account(&AvlAddress::new(avl_address.as_str())?),
    }
    .ok_or_else(|| anyhow!("No such leaf: {target:?}"))?;

    let state_root = ledger.root_hash();
    let rendered = json!({
        "collection": proof.collection,
        "leaf": hash_hex(&proof.leaf),
        "leafIndex": proof.proof.leaf_index,
        "treeSize": proof.proof.tree_size,
        "siblings": proof.proof.siblings.iter().map(hash_hex).collect::<Vec<_>>(),
        "erc20Root": hash_hex(&proof.erc20_root),
        "bridgeRoot": hash_hex(&proof.bridge_root),
        "avlRoot": hash_hex(&proof.avl_root),
        "stateRoot": hash_hex(&state_root),
        "valid": proof.verify(&state_root),
    });
    println!("{}", serde_json::to_string_pretty(&rendered)?);

    Ok(proof)
}
