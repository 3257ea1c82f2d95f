// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::fs;
use std::path::Path;

use anyhow::Context;
use stoken_kernel::{Ledger, Leaves, StateRoots};
use stoken_persistence::LedgerStore;

use crate::commands::{add_roots, table};
use crate::config::LedgerConfig;

/// Initializes the data directory from a genesis leaves file (JSON), or an
/// empty ledger.
pub fn run(cfg: &LedgerConfig, input: Option<&Path>) -> anyhow::Result<StateRoots> {
    let leaves = match input {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read genesis {}", path.display()))?;
            serde_json::from_str::<Leaves>(&raw).context("Invalid genesis leaves")?
        }
        None => Leaves::new(),
    };

    let ledger = Ledger::from_genesis(leaves).context("Genesis rejected")?;
    let store = LedgerStore::create(cfg.paths(), ledger)?;
    let roots = store.ledger().roots();

    let mut t = table(vec!["Genesis", "Value"]);
    t.add_row(vec!["snapshot".to_string(), store.paths().snapshot.display().to_string()]);
    add_roots(&mut t, &roots);
    println!("{t}");

    Ok(roots)
}
