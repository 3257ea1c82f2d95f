// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! On-disk ledgers for tests and demos.

use std::fs;
use std::path::Path;

use stoken_kernel::state::transition::Transition;
use stoken_kernel::types::{Address, AvlAddress, OwnerHash};
use stoken_kernel::{Ledger, Origin};

use crate::error::Result;
use crate::store::{LedgerStore, StorePaths};

pub const SNAPSHOT_FILE: &str = "ledger.snap";
pub const WAL_FILE: &str = "events.wal";

pub const ALICE: Address = Address([0xa1; 20]);
pub const BOB: Address = Address([0xb0; 20]);
pub const OPERATOR: Address = Address([0x0f; 20]);
pub const ALICE_AVL: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

fn avl() -> Result<AvlAddress> {
    Ok(AvlAddress::new(ALICE_AVL)?)
}

/// A ledger checkpointed at height 6 with three more events in the WAL:
///
/// - snapshot: alice funded, bob created, alice's stake requested
/// - WAL 7..=9: stake fulfilment, transfer, bridge request
pub fn generate_test_scenario(dir: &Path) -> Result<StorePaths> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let paths = StorePaths::new(dir, SNAPSHOT_FILE, WAL_FILE);
    let mut store = LedgerStore::create(paths.clone(), Ledger::new())?;

    let alice = Origin::User(ALICE);
    let bob = Origin::User(BOB);
    let operator = Origin::Operator(OPERATOR);

    store.submit(alice, Transition::Create { address: ALICE })?;
    store.submit(bob, Transition::Create { address: BOB })?;
    store.submit(operator, Transition::Mint { to: ALICE, amount: 1_000 })?;
    store.submit(
        operator,
        Transition::BridgeAvlToApp {
            avl_address: avl()?,
            amount: 500,
            owner_hash: OwnerHash::of(&ALICE),
        },
    )?;
    store.submit(alice, Transition::ClaimAvlAccount { avl_address: avl()? })?;
    store.submit(alice, Transition::RequestStakeAvl { timestamp: "1700000000".into() })?;
    store.checkpoint()?;

    store.submit(
        operator,
        Transition::FulfillStakeAvl {
            avl_address: avl()?,
            shares_to_mint: 480,
        },
    )?;
    store.submit(alice, Transition::Transfer { from: ALICE, to: BOB, amount: 250 })?;
    store.submit(alice, Transition::RequestBridge { toaddress: ALICE, amount: 100 })?;

    Ok(paths)
}
