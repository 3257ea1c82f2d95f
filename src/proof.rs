// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Deterministic Proof Structures.

use serde::{Deserialize, Serialize};

use crate::config::PROOF_SCHEMA_VERSION;
use crate::error::Result;
use crate::replay::restore_and_replay;
use crate::types::Hash;
use crate::verify::{event_log_hash, snapshot_hash};

/// A receipt that a specific event log applied to a specific snapshot
/// results in a specific state root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeterministicProof {
    pub schema_version: u64,

    /// BLAKE3 of the starting snapshot (canonical encoding).
    pub snapshot_hash: Hash,

    /// Hash of the encoded event log, see [`event_log_hash`].
    pub event_log_hash: Hash,

    /// State root after replay.
    pub final_state_root: Hash,

    /// Ledger height after replay.
    pub height: u64,
}

impl DeterministicProof {
    pub fn generate<P: AsRef<[u8]>>(snapshot_bytes: &[u8], event_payloads: &[P]) -> Result<Self> {
        let ledger = restore_and_replay(snapshot_bytes, event_payloads)?;

        Ok(Self {
            schema_version: PROOF_SCHEMA_VERSION,
            snapshot_hash: snapshot_hash(snapshot_bytes),
            event_log_hash: event_log_hash(event_payloads),
            final_state_root: ledger.root_hash(),
            height: ledger.height().0,
        })
    }

    /// Re-executes the inputs and compares every field.
    pub fn verify<P: AsRef<[u8]>>(&self, snapshot_bytes: &[u8], event_payloads: &[P]) -> Result<bool> {
        Ok(Self::generate(snapshot_bytes, event_payloads)? == *self)
    }
}
