// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::Context;
use stoken_kernel::StateRoots;
use stoken_persistence::LedgerStore;

use crate::commands::{add_roots, table};
use crate::config::LedgerConfig;

/// Rebuilds the ledger from snapshot + WAL and prints the resulting roots.
pub fn run(cfg: &LedgerConfig) -> anyhow::Result<StateRoots> {
    let store = LedgerStore::open(cfg.paths()).context("Replay failed")?;
    let ledger = store.ledger();
    let roots = ledger.roots();

    let mut t = table(vec!["Metric", "Value"]);
    t.add_row(vec!["snapshot height".to_string(), store.snapshot_height().to_string()]);
    t.add_row(vec![
        "replayed events".to_string(),
        (ledger.height().0 - store.snapshot_height()).to_string(),
    ]);
    t.add_row(vec!["height".to_string(), ledger.height().0.to_string()]);
    add_roots(&mut t, &roots);

    println!("\nReplay Report");
    println!("-------------");
    println!("{t}\n");

    Ok(roots)
}
