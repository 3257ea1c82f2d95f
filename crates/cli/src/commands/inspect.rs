// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use stoken_kernel::types::hash_hex;
use stoken_persistence::{snapshot, wal, LedgerStore};

use crate::commands::{add_roots, table};
use crate::config::LedgerConfig;

pub fn run(cfg: &LedgerConfig) -> anyhow::Result<()> {
    let paths = cfg.paths();

    println!("\nLedger Status Report");
    println!("--------------------");

    let mut files = table(vec!["File", "Status", "Details"]);

    if paths.snapshot.exists() {
        match snapshot::read_header(&paths.snapshot) {
            Ok(header) => {
                let msg = format!(
                    "Magic: {}, Ver: {}, Height: {}, Root: {}",
                    String::from_utf8_lossy(&header.magic),
                    header.version,
                    header.height,
                    hash_hex(&header.state_root),
                );
                files.add_row(vec!["Snapshot", "FOUND", &msg]);
            }
            Err(e) => {
                files.add_row(vec!["Snapshot", "CORRUPT", &e.to_string()]);
            }
        }
    } else {
        files.add_row(vec!["Snapshot", "MISSING", ""]);
    }

    if paths.wal.exists() {
        match wal::read_entries(&paths.wal) {
            Ok(entries) => {
                let detail = match (entries.first(), entries.last()) {
                    (Some(first), Some(last)) => {
                        format!("{} events (seq {}..={})", entries.len(), first.header.seq, last.header.seq)
                    }
                    _ => "0 events".to_string(),
                };
                files.add_row(vec!["WAL", "FOUND", &detail]);
            }
            Err(e) => {
                files.add_row(vec!["WAL", "CORRUPT", &e.to_string()]);
            }
        }
    } else {
        files.add_row(vec!["WAL", "MISSING", ""]);
    }

    println!("{files}\n");

    if !paths.snapshot.exists() {
        return Ok(());
    }

    let store = LedgerStore::open(paths)?;
    let ledger = store.ledger();
    let state = ledger.current_state();
    let pending = state.bridge.iter().filter(|r| !r.is_bridged).count();
    let claimed = state.avl.iter().filter(|a| a.claimed).count();

    let mut summary = table(vec!["Metric", "Value"]);
    summary.add_row(vec!["height".to_string(), ledger.height().0.to_string()]);
    summary.add_row(vec!["token accounts".to_string(), state.erc20.len().to_string()]);
    summary.add_row(vec![
        "total supply".to_string(),
        ledger
            .total_supply()
            .map_or_else(|| "overflow".to_string(), |s| s.to_string()),
    ]);
    summary.add_row(vec![
        "bridge requests".to_string(),
        format!("{} ({} pending)", state.bridge.len(), pending),
    ]);
    summary.add_row(vec![
        "cross-chain accounts".to_string(),
        format!("{} ({} claimed)", state.avl.len(), claimed),
    ]);
    add_roots(&mut summary, &ledger.roots());

    println!("{summary}\n");

    Ok(())
}
