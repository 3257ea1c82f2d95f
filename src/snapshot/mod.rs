// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical snapshot codec.
//!
//! ```text
//! magic "STKN" | schema u32 | height u64
//! erc20  count u32, per account:
//!     address [20] | balance u128 | nonce u64 | allowances u32 x (spender [20] | amount u128)
//! bridge count u32, per request:
//!     toaddress [20] | amount u128 | is_bridged u8
//! avl    count u32, per account:
//!     evm_address [20] | avl_address (len u32 | utf8) | free_balance u128
//!     | staking_shares u128 | owner_hash [32] | claimed u8 | nonce u64 | requested_stake u8
//! ```
//!
//! All integers little-endian. Decoding is the exact inverse, so a restored
//! ledger reproduces the published roots.
pub mod decode;
pub mod encode;

pub use decode::decode_state;
pub use encode::encode_state;
