// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::proof::DeterministicProof;
use crate::replay::{replay_and_hash, replay_events, restore_and_replay};
use crate::snapshot::encode_state;
use crate::state::auth::Origin;
use crate::state::transition::Transition;
use crate::tests::{addr, avl, funded_ledger, operator, user};
use crate::types::OwnerHash;

fn workload() -> Vec<LedgerEvent> {
    vec![
        LedgerEvent::new(user(1), Transition::Transfer { from: addr(1), to: addr(2), amount: 40 }),
        LedgerEvent::new(user(2), Transition::Approve { from: addr(2), spender: addr(1), amount: 15 }),
        LedgerEvent::new(user(1), Transition::TransferFrom { from: addr(2), to: addr(1), amount: 15 }),
        LedgerEvent::new(
            operator(),
            Transition::BridgeAvlToApp {
                avl_address: avl("X"),
                amount: 90,
                owner_hash: OwnerHash::of(&addr(2)),
            },
        ),
        LedgerEvent::new(user(2), Transition::ClaimAvlAccount { avl_address: avl("X") }),
        LedgerEvent::new(user(1), Transition::Burn { from: addr(1), amount: 5 }),
    ]
}

fn payloads(events: &[LedgerEvent]) -> Vec<Vec<u8>> {
    events.iter().map(|e| e.encode().unwrap()).collect()
}

#[test]
fn test_replay_matches_live_ledger() {
    let genesis = funded_ledger(2, 100);
    let snapshot = encode_state(&genesis).unwrap();
    let events = workload();

    let mut live = genesis.clone();
    for event in &events {
        live.apply(&event.origin, &event.transition).unwrap();
    }

    let replayed = restore_and_replay(&snapshot, &payloads(&events)).unwrap();
    assert_eq!(replayed.current_state(), live.current_state());
    assert_eq!(replayed.height(), live.height());
    assert_eq!(replay_and_hash(&snapshot, &payloads(&events)).unwrap(), live.roots());
}

#[test]
fn test_replay_from_empty_genesis() {
    let events = vec![
        LedgerEvent::new(user(1), Transition::Create { address: addr(1) }),
        LedgerEvent::new(operator(), Transition::Mint { to: addr(1), amount: 3 }),
    ];
    let ledger = restore_and_replay(&[], &payloads(&events)).unwrap();
    assert_eq!(ledger.total_supply(), Some(3));
    assert_eq!(ledger.height().0, 2);
}

#[test]
fn test_replay_reports_the_failing_index() {
    let mut ledger = funded_ledger(2, 100);
    let mut events = workload();
    // Origin downgraded: a user cannot mint.
    events.insert(2, LedgerEvent::new(Origin::User(addr(1)), Transition::Mint { to: addr(1), amount: 1 }));

    let err = replay_events(&mut ledger, &events).unwrap_err();
    match err {
        LedgerError::Replay { index, reason } => {
            assert_eq!(index, 2);
            assert!(matches!(*reason, LedgerError::Unauthorized { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_corrupt_payload_is_a_codec_error() {
    let snapshot = encode_state(&funded_ledger(1, 1)).unwrap();
    let mut payloads = payloads(&workload());
    payloads[0].truncate(3);
    assert!(matches!(restore_and_replay(&snapshot, &payloads), Err(LedgerError::Codec(_))));
}

#[test]
fn test_deterministic_proof() {
    let snapshot = encode_state(&funded_ledger(2, 100)).unwrap();
    let payloads = payloads(&workload());

    let proof = DeterministicProof::generate(&snapshot, &payloads).unwrap();
    assert_eq!(proof.height, 2 * 2 + 6);
    assert!(proof.verify(&snapshot, &payloads).unwrap());

    // Dropping the last event changes the log hash and the final root.
    assert!(!proof.verify(&snapshot, &payloads[..payloads.len() - 1]).unwrap());

    let mut forged = proof.clone();
    forged.final_state_root[0] ^= 1;
    assert!(!forged.verify(&snapshot, &payloads).unwrap());

    let json = serde_json::to_string(&proof).unwrap();
    let back: DeterministicProof = serde_json::from_str(&json).unwrap();
    assert_eq!(back, proof);
}
