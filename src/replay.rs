// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Deterministic replay.

use crate::commitment::StateRoots;
use crate::error::{LedgerError, Result};
use crate::event::LedgerEvent;
use crate::snapshot::decode::decode_state;
use crate::state::ledger::Ledger;

/// Applies logged events in order. Every logged event was accepted once, so
/// a rejection here means the log does not belong on top of this ledger.
pub fn replay_events<'a, I>(ledger: &mut Ledger, events: I) -> Result<u64>
where
    I: IntoIterator<Item = &'a LedgerEvent>,
{
    let mut applied = 0u64;
    for event in events {
        ledger
            .apply(&event.origin, &event.transition)
            .map_err(|e| LedgerError::Replay {
                index: applied,
                reason: Box::new(e),
            })?;
        applied += 1;
    }
    Ok(applied)
}

/// Restores `snapshot_bytes` (empty = empty genesis) and replays the
/// encoded events on top.
pub fn restore_and_replay<P: AsRef<[u8]>>(snapshot_bytes: &[u8], event_payloads: &[P]) -> Result<Ledger> {
    let mut ledger = if snapshot_bytes.is_empty() {
        Ledger::new()
    } else {
        decode_state(snapshot_bytes)?
    };

    let events = event_payloads
        .iter()
        .map(|p| LedgerEvent::decode(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    replay_events(&mut ledger, &events)?;

    Ok(ledger)
}

/// Replays and returns only the final roots.
pub fn replay_and_hash<P: AsRef<[u8]>>(snapshot_bytes: &[u8], event_payloads: &[P]) -> Result<StateRoots> {
    restore_and_replay(snapshot_bytes, event_payloads).map(|ledger| ledger.roots())
}
