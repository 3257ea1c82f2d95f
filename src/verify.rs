// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Hashing of persisted artifacts.
//!
//! The state root covers the leaf collections only. These helpers cover the
//! bytes a replica publishes alongside it.

use crate::types::Hash;

pub fn snapshot_hash(snapshot_bytes: &[u8]) -> Hash {
    blake3::hash(snapshot_bytes).into()
}

/// Hash of an ordered event log. Each payload is length-prefixed so that
/// splitting the same bytes differently yields a different hash.
pub fn event_log_hash<P: AsRef<[u8]>>(event_payloads: &[P]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for payload in event_payloads {
        let payload = payload.as_ref();
        hasher.update(&(payload.len() as u64).to_le_bytes());
        hasher.update(payload);
    }
    hasher.finalize().into()
}
