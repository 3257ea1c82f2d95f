// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde_json::json;
use stoken_kernel::proof::DeterministicProof;
use stoken_kernel::types::hash_hex;
use stoken_persistence::LedgerStore;

use crate::config::LedgerConfig;

/// Emits a proof that replaying the WAL over the snapshot yields the current root.
pub fn run(cfg: &LedgerConfig) -> anyhow::Result<DeterministicProof> {
    let store = LedgerStore::open(cfg.paths())?;
    let (snapshot, payloads) = store.proof_inputs()?;
    let proof = DeterministicProof::generate(&snapshot, &payloads)?;

    let rendered = json!({
        "schemaVersion": proof.schema_version,
        "snapshotHash": hash_hex(&proof.snapshot_hash),
        "eventLogHash": hash_hex(&proof.event_log_hash),
        "finalStateRoot": hash_hex(&proof.final_state_root),
        "height": proof.height,
    });
    println!("{}", serde_json::to_string_pretty(&rendered)?);

    Ok(proof)
}
