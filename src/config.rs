// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Width in bytes of every commitment hash (BLAKE3 output).
pub const HASH_LEN: usize = 32;

/// Width in bytes of a ledger address.
pub const ADDRESS_LEN: usize = 20;

/// Width in bytes of an integer inside a packed leaf encoding (uint256).
pub const UINT_WIDTH: usize = 32;

/// Root of a collection with no leaves.
pub const EMPTY_ROOT: [u8; HASH_LEN] = [0u8; HASH_LEN];

/// Magic bytes opening a canonical snapshot body.
pub const SNAPSHOT_MAGIC: &[u8; 4] = b"STKN";

/// Canonical snapshot schema version.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Version stamped into deterministic proofs.
pub const PROOF_SCHEMA_VERSION: u64 = 1;
