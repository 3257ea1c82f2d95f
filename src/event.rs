// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger events.
//!
//! A `LedgerEvent` is an accepted transition together with the origin it was
//! submitted under. The ordered event log plus the snapshot it starts from is
//! the full history of the ledger.
//!
//! # Invariants
//! - Same snapshot + same event log => same roots, on any replica
//! - Only transitions the engine accepted are ever logged

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::state::auth::Origin;
use crate::state::transition::Transition;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub origin: Origin,
    pub transition: Transition,
}

impl LedgerEvent {
    pub fn new(origin: Origin, transition: Transition) -> Self {
        Self { origin, transition }
    }

    /// Canonical bincode encoding (standard config).
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| LedgerError::Codec(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (event, read): (Self, usize) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|e| LedgerError::Codec(e.to_string()))?;
        if read != bytes.len() {
            return Err(LedgerError::Codec("trailing bytes after event".into()));
        }
        Ok(event)
    }
}
