// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! A ledger backed by a snapshot file and a write-ahead log.
//!
//! Recovery loads the snapshot, then replays WAL entries whose sequence is
//! above the snapshot height, cutting any torn entry an interrupted append
//! left at the end of the WAL. An event is appended to the WAL before the
//! in-memory ledger moves to the new state.

use std::fs::File;
use std::path::{Path, PathBuf};

use stoken_kernel::replay::replay_events;
use stoken_kernel::state::transition::Transition;
use stoken_kernel::types::hash_hex;
use stoken_kernel::{Ledger, LedgerEvent, Origin, Receipt};
use tracing::{debug, info};

use crate::error::{PersistenceError, Result};
use crate::snapshot::{self, SnapshotHeader};
use crate::wal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub snapshot: PathBuf,
    pub wal: PathBuf,
}

impl StorePaths {
    pub fn new(dir: impl AsRef<Path>, snapshot_file: &str, wal_file: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            snapshot: dir.join(snapshot_file),
            wal: dir.join(wal_file),
        }
    }
}

pub struct LedgerStore {
    paths: StorePaths,
    ledger: Ledger,
    snapshot_height: u64,
}

impl LedgerStore {
    /// Writes `genesis` as the initial snapshot and starts an empty WAL.
    pub fn create(paths: StorePaths, genesis: Ledger) -> Result<Self> {
        if paths.snapshot.exists() {
            return Err(PersistenceError::AlreadyInitialized(paths.snapshot.display().to_string()));
        }
        if let Some(parent) = paths.snapshot.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let header = snapshot::write_snapshot(&paths.snapshot, &genesis)?;
        File::create(&paths.wal)?;
        info!(
            height = header.height,
            root = %hash_hex(&header.state_root),
            "genesis snapshot written"
        );
        Ok(Self {
            paths,
            ledger: genesis,
            snapshot_height: header.height,
        })
    }

    /// Recovers the ledger from disk.
    pub fn open(paths: StorePaths) -> Result<Self> {
        let mut ledger = snapshot::load_snapshot(&paths.snapshot)?;
        let snapshot_height = ledger.height().0;

        let mut events = Vec::new();
        for entry in wal::recover(&paths.wal)? {
            let seq = entry.header.seq;
            // Already folded into the snapshot by a checkpoint.
            if seq <= snapshot_height {
                continue;
            }
            let expected = snapshot_height + events.len() as u64 + 1;
            if seq != expected {
                return Err(PersistenceError::SequenceGap { expected, found: seq });
            }
            events.push(entry.event()?);
        }
        replay_events(&mut ledger, &events)?;

        info!(
            snapshot_height,
            replayed = events.len(),
            height = ledger.height().0,
            root = %hash_hex(&ledger.root_hash()),
            "ledger recovered"
        );
        Ok(Self {
            paths,
            ledger,
            snapshot_height,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn snapshot_height(&self) -> u64 {
        self.snapshot_height
    }

    /// Applies one event and makes it durable.
    ///
    /// A rejected transition writes nothing. If the WAL append fails the
    /// in-memory ledger stays at its previous state.
    pub fn submit(&mut self, origin: Origin, transition: Transition) -> Result<Receipt> {
        let mut next = self.ledger.clone();
        let receipt = next.apply(&origin, &transition)?;
        wal::append_event(&self.paths.wal, receipt.height.0, &LedgerEvent::new(origin, transition))?;
        self.ledger = next;
        debug!(seq = receipt.height.0, transition = %receipt.transition, "event logged");
        Ok(receipt)
    }

    /// Writes the current state as the new snapshot and empties the WAL.
    pub fn checkpoint(&mut self) -> Result<SnapshotHeader> {
        let header = snapshot::write_snapshot(&self.paths.snapshot, &self.ledger)?;
        // Entries at or below the snapshot height are skipped on recovery, so
        // a crash before this truncation is harmless.
        File::create(&self.paths.wal)?.sync_data()?;
        self.snapshot_height = header.height;
        info!(height = header.height, root = %hash_hex(&header.state_root), "checkpoint written");
        Ok(header)
    }

    /// The snapshot body and WAL payloads above it, the inputs of a
    /// deterministic proof.
    pub fn proof_inputs(&self) -> Result<(Vec<u8>, Vec<Vec<u8>>)> {
        let (header, body) = snapshot::read_snapshot(&self.paths.snapshot)?;
        let payloads = wal::read_entries(&self.paths.wal)?
            .into_iter()
            .filter(|e| e.header.seq > header.height)
            .map(|e| e.payload)
            .collect();
        Ok((body, payloads))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stoken_kernel::types::Address;
    use stoken_kernel::LedgerError;

    fn addr(n: u8) -> Address {
        Address([n; 20])
    }

    fn paths(dir: &Path) -> StorePaths {
        StorePaths::new(dir, "ledger.snap", "events.wal")
    }

    fn seed(store: &mut LedgerStore) {
        for n in 1..=3 {
            store
                .submit(Origin::User(addr(n)), Transition::Create { address: addr(n) })
                .unwrap();
            store
                .submit(Origin::Operator(addr(0xff)), Transition::Mint { to: addr(n), amount: 100 })
                .unwrap();
        }
    }

    #[test]
    fn test_reopen_replays_wal() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::create(paths(dir.path()), Ledger::new()).unwrap();
        seed(&mut store);
        let root = store.ledger().root_hash();
        drop(store);

        let reopened = LedgerStore::open(paths(dir.path())).unwrap();
        assert_eq!(reopened.ledger().root_hash(), root);
        assert_eq!(reopened.ledger().height().0, 6);
        assert_eq!(reopened.snapshot_height(), 0);
    }

    #[test]
    fn test_rejected_transitions_are_not_logged() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::create(paths(dir.path()), Ledger::new()).unwrap();
        seed(&mut store);

        let err = store
            .submit(Origin::User(addr(1)), Transition::Mint { to: addr(1), amount: 1 })
            .unwrap_err();
        assert!(matches!(err, PersistenceError::Ledger(LedgerError::Unauthorized { .. })));
        assert_eq!(wal::read_entries(&store.paths().wal).unwrap().len(), 6);
    }

    #[test]
    fn test_checkpoint_truncates_wal() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::create(paths(dir.path()), Ledger::new()).unwrap();
        seed(&mut store);
        let header = store.checkpoint().unwrap();
        assert_eq!(header.height, 6);
        assert!(wal::read_entries(&store.paths().wal).unwrap().is_empty());

        store
            .submit(
                Origin::User(addr(1)),
                Transition::Transfer { from: addr(1), to: addr(2), amount: 5 },
            )
            .unwrap();
        let root = store.ledger().root_hash();
        drop(store);

        let reopened = LedgerStore::open(paths(dir.path())).unwrap();
        assert_eq!(reopened.snapshot_height(), 6);
        assert_eq!(reopened.ledger().root_hash(), root);
    }

    #[test]
    fn test_stale_entries_below_snapshot_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::create(paths(dir.path()), Ledger::new()).unwrap();
        seed(&mut store);
        let wal_bytes = std::fs::read(&store.paths().wal).unwrap();
        store.checkpoint().unwrap();
        // Simulate a crash between snapshot write and WAL truncation.
        std::fs::write(&store.paths().wal, wal_bytes).unwrap();
        let root = store.ledger().root_hash();
        drop(store);

        let reopened = LedgerStore::open(paths(dir.path())).unwrap();
        assert_eq!(reopened.ledger().root_hash(), root);
        assert_eq!(reopened.ledger().height().0, 6);
    }

    #[test]
    fn test_torn_tail_recovers_every_accepted_event() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::create(paths(dir.path()), Ledger::new()).unwrap();
        seed(&mut store);
        let wal_path = store.paths().wal.clone();
        drop(store);

        // A crash after 10 of the 20 header bytes of the seventh entry.
        let mut bytes = std::fs::read(&wal_path).unwrap();
        bytes.extend_from_slice(&[7, 0, 0, 0, 0, 0, 0, 0, 9, 0]);
        std::fs::write(&wal_path, &bytes).unwrap();

        let mut store = LedgerStore::open(paths(dir.path())).unwrap();
        assert_eq!(store.ledger().height().0, 6);
        store
            .submit(
                Origin::User(addr(1)),
                Transition::Transfer { from: addr(1), to: addr(3), amount: 9 },
            )
            .unwrap();
        let root = store.ledger().root_hash();
        drop(store);

        let reopened = LedgerStore::open(paths(dir.path())).unwrap();
        assert_eq!(reopened.ledger().height().0, 7);
        assert_eq!(reopened.ledger().root_hash(), root);
    }

    #[test]
    fn test_sequence_gap_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::create(paths(dir.path()), Ledger::new()).unwrap();
        let event = LedgerEvent::new(Origin::User(addr(1)), Transition::Create { address: addr(1) });
        wal::append_event(&store.paths().wal, 2, &event).unwrap();
        drop(store);

        assert!(matches!(
            LedgerStore::open(paths(dir.path())),
            Err(PersistenceError::SequenceGap { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_create_refuses_existing_ledger() {
        let dir = tempfile::tempdir().unwrap();
        LedgerStore::create(paths(dir.path()), Ledger::new()).unwrap();
        assert!(matches!(
            LedgerStore::create(paths(dir.path()), Ledger::new()),
            Err(PersistenceError::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn test_proof_inputs_reproduce_the_live_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::create(paths(dir.path()), Ledger::new()).unwrap();
        seed(&mut store);

        let (body, payloads) = store.proof_inputs().unwrap();
        let roots = stoken_kernel::replay::replay_and_hash(&body, &payloads).unwrap();
        assert_eq!(roots, store.ledger().roots());
    }
}
