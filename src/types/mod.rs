// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod address;
pub mod id;

pub use address::{Address, AvlAddress, OwnerHash};
pub use id::{BridgeId, Height};

/// Token amounts. Fixed width, never floating point.
pub type Amount = u128;

/// A 32-byte BLAKE3 digest.
pub type Hash = [u8; crate::config::HASH_LEN];

/// Renders a hash as `0x`-prefixed lowercase hex.
pub fn hash_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}
