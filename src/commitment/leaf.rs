// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical leaf encoding.
//!
//! Fields are packed in a fixed order with fixed widths:
//!
//! ```text
//! address      20 bytes
//! integer      32 bytes, big-endian (uint256 width)
//! bool          1 byte  (0 / 1)
//! owner hash   32 bytes
//! string       raw UTF-8 bytes
//! ```
//!
//! A cross-chain leaf has exactly one variable-width field (`avlAddress`),
//! so the packing stays unambiguous without length prefixes.
//!
//! Allowances are not part of the `erc20` leaf.

use crate::config::UINT_WIDTH;
use crate::state::leaves::{BridgeRequest, CrossChainAccount, TokenAccount};
use crate::types::{Address, Hash, OwnerHash};

#[derive(Default)]
pub struct Packed(Vec<u8>);

impl Packed {
    pub fn address(mut self, a: &Address) -> Self {
        self.0.extend_from_slice(a.as_bytes());
        self
    }

    pub fn uint(mut self, v: u128) -> Self {
        self.0.extend_from_slice(&[0u8; UINT_WIDTH - 16]);
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn boolean(mut self, b: bool) -> Self {
        self.0.push(b as u8);
        self
    }

    pub fn owner_hash(mut self, h: &OwnerHash) -> Self {
        self.0.extend_from_slice(h.as_bytes());
        self
    }

    pub fn string(mut self, s: &str) -> Self {
        self.0.extend_from_slice(s.as_bytes());
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// `(address, balance, nonce)`
pub fn token_account_bytes(a: &TokenAccount) -> Vec<u8> {
    Packed::default()
        .address(&a.address)
        .uint(a.balance)
        .uint(a.nonce as u128)
        .into_bytes()
}

/// `(toaddress, amount, isBridged)`
pub fn bridge_request_bytes(r: &BridgeRequest) -> Vec<u8> {
    Packed::default()
        .address(&r.toaddress)
        .uint(r.amount)
        .boolean(r.is_bridged)
        .into_bytes()
}

/// `(evmAddress, avlAddress, freeBalance, stakingShares, ownerHash, claimed, nonce, requestedStake)`
pub fn cross_chain_account_bytes(a: &CrossChainAccount) -> Vec<u8> {
    Packed::default()
        .address(&a.evm_address)
        .string(a.avl_address.as_str())
        .uint(a.free_balance)
        .uint(a.staking_shares)
        .owner_hash(&a.owner_hash)
        .boolean(a.claimed)
        .uint(a.nonce as u128)
        .boolean(a.requested_stake)
        .into_bytes()
}

pub fn hash_leaf(bytes: &[u8]) -> Hash {
    *blake3::hash(bytes).as_bytes()
}

pub fn token_account_leaf(a: &TokenAccount) -> Hash {
    hash_leaf(&token_account_bytes(a))
}

pub fn bridge_request_leaf(r: &BridgeRequest) -> Hash {
    hash_leaf(&bridge_request_bytes(r))
}

pub fn cross_chain_account_leaf(a: &CrossChainAccount) -> Hash {
    hash_leaf(&cross_chain_account_bytes(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AvlAddress;

    #[test]
    fn test_packed_widths() {
        let account = TokenAccount::new(Address([7u8; 20]));
        assert_eq!(token_account_bytes(&account).len(), 20 + 32 + 32);

        let request = BridgeRequest {
            toaddress: Address([7u8; 20]),
            amount: 1,
            is_bridged: true,
        };
        let bytes = bridge_request_bytes(&request);
        assert_eq!(bytes.len(), 20 + 32 + 1);
        assert_eq!(bytes[20 + 31], 1, "uint256 is big-endian");
        assert_eq!(bytes[52], 1);
    }

    #[test]
    fn test_cross_chain_leaf_covers_every_field() {
        let base = CrossChainAccount::deposit(AvlAddress::new("5Grw").unwrap(), 50, OwnerHash([3u8; 32]));
        let mut requested = base.clone();
        requested.claimed = true;
        requested.evm_address = Address([9u8; 20]);
        let mut staked = requested.clone();
        staked.requested_stake = true;

        let leaves = [
            cross_chain_account_leaf(&base),
            cross_chain_account_leaf(&requested),
            cross_chain_account_leaf(&staked),
        ];
        assert_ne!(leaves[0], leaves[1]);
        assert_ne!(leaves[1], leaves[2]);
        assert_eq!(cross_chain_account_bytes(&base).len(), 20 + 4 + 32 + 32 + 32 + 1 + 32 + 1);
    }
}
