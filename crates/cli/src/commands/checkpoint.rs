// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use stoken_kernel::types::hash_hex;
use stoken_persistence::snapshot::SnapshotHeader;
use stoken_persistence::LedgerStore;

use crate::config::LedgerConfig;

pub fn run(cfg: &LedgerConfig) -> anyhow::Result<SnapshotHeader> {
    let mut store = LedgerStore::open(cfg.paths())?;
    let header = store.checkpoint()?;
    println!("Checkpoint at height {} ({})", header.height, hash_hex(&header.state_root));
    Ok(header)
}
