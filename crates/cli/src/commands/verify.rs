// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use stoken_kernel::types::hash_hex;
use stoken_persistence::snapshot::{self, SnapshotHeader};
use stoken_persistence::PersistenceError;

/// Checks a snapshot file: body checksum, then a full decode whose height and
/// root must match the header.
pub fn run(snapshot_path: &Path) -> anyhow::Result<SnapshotHeader> {
    match snapshot::load_snapshot(snapshot_path) {
        Ok(_) => {
            let header = snapshot::read_header(snapshot_path)?;
            println!("\n✅ VERIFIED\n");
            println!("Height:     {}", header.height);
            println!("State Root: {}", hash_hex(&header.state_root));
            println!("Body CRC64: {:016x}\n", header.body_checksum);
            Ok(header)
        }
        Err(e @ PersistenceError::ChecksumMismatch { expected, found }) => {
            println!("\n❌ CORRUPTED\n");
            println!("Expected CRC64: {:016x}", expected);
            println!("Found CRC64:    {:016x}", found);
            Err(e.into())
        }
        Err(e) => {
            println!("\n❌ INVALID: {e}\n");
            Err(e.into())
        }
    }
}
