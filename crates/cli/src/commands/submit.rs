// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::Context;
use stoken_kernel::types::{hash_hex, Address};
use stoken_kernel::{Receipt, Transition};
use stoken_persistence::LedgerStore;
use tracing::info;

use crate::commands::table;
use crate::config::LedgerConfig;

/// Validates one action against the recovered ledger and appends it to the WAL.
pub fn run(cfg: &LedgerConfig, from: &str, name: &str, inputs: &str) -> anyhow::Result<Receipt> {
    let caller = Address::parse(from).context("Invalid --from address")?;
    let transition = Transition::from_named(name, inputs)?;
    let origin = cfg.origin_for(caller);

    let mut store = LedgerStore::open(cfg.paths()).context("Failed to open ledger")?;
    let receipt = store
        .submit(origin, transition)
        .with_context(|| format!("{name} rejected"))?;
    info!(height = receipt.height.0, transition = %receipt.transition, operator = origin.is_operator(), "action accepted");

    let mut t = table(vec!["Receipt", "Value"]);
    t.add_row(vec!["transition".to_string(), receipt.transition.clone()]);
    t.add_row(vec!["height".to_string(), receipt.height.0.to_string()]);
    t.add_row(vec!["stateRoot".to_string(), hash_hex(&receipt.state_root)]);
    if let Some(id) = receipt.bridge_id {
        t.add_row(vec!["bridge id".to_string(), id.0.to_string()]);
    }
    println!("{t}");

    Ok(receipt)
}
