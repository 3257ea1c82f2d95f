// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Leaf collections: the raw ledger state.
//!
//! Every collection is an ordered sequence in insertion order. Records are
//! appended or mutated in place, never removed, so a record's position is
//! stable for the life of the ledger.

use serde::{Deserialize, Serialize};

use crate::types::{Address, Amount, AvlAddress, BridgeId, OwnerHash};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    #[serde(alias = "address")]
    pub spender: Address,
    pub amount: Amount,
}

/// A token balance on this ledger (collection `erc20`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    pub address: Address,
    pub balance: Amount,
    pub nonce: u64,
    #[serde(default)]
    pub allowances: Vec<Allowance>,
}

impl TokenAccount {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balance: 0,
            nonce: 0,
            allowances: Vec::new(),
        }
    }

    /// Remaining amount `spender` may move out of this account.
    pub fn allowance(&self, spender: &Address) -> Amount {
        self.allowances
            .iter()
            .find(|a| a.spender == *spender)
            .map_or(0, |a| a.amount)
    }

    /// Allowances are keyed by spender: an existing entry is overwritten in
    /// place, a new spender is appended.
    pub fn set_allowance(&mut self, spender: Address, amount: Amount) {
        match self.allowances.iter_mut().find(|a| a.spender == spender) {
            Some(entry) => entry.amount = amount,
            None => self.allowances.push(Allowance { spender, amount }),
        }
    }
}

/// A request to move staking shares out to the external chain (collection `bridge`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub toaddress: Address,
    pub amount: Amount,
    #[serde(rename = "isBridged")]
    pub is_bridged: bool,
}

/// A deposit observed on the external chain (collection `avl`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainAccount {
    pub evm_address: Address,
    pub avl_address: AvlAddress,
    pub free_balance: Amount,
    pub staking_shares: Amount,
    #[serde(alias = "evmAddressHash")]
    pub owner_hash: OwnerHash,
    pub claimed: bool,
    pub nonce: u64,
    pub requested_stake: bool,
}

impl CrossChainAccount {
    /// First deposit for `avl_address`: unclaimed, owner unknown.
    pub fn deposit(avl_address: AvlAddress, amount: Amount, owner_hash: OwnerHash) -> Self {
        Self {
            evm_address: Address::ZERO,
            avl_address,
            free_balance: amount,
            staking_shares: 0,
            owner_hash,
            claimed: false,
            nonce: 0,
            requested_stake: false,
        }
    }
}

/// The three leaf collections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaves {
    #[serde(default)]
    pub erc20: Vec<TokenAccount>,
    #[serde(default)]
    pub bridge: Vec<BridgeRequest>,
    #[serde(default)]
    pub avl: Vec<CrossChainAccount>,
}

impl Leaves {
    pub fn new() -> Self {
        Self::default()
    }

    // --- erc20 ---

    pub fn account_index(&self, address: &Address) -> Option<usize> {
        self.erc20.iter().position(|a| a.address == *address)
    }

    pub fn account(&self, address: &Address) -> Option<&TokenAccount> {
        self.erc20.iter().find(|a| a.address == *address)
    }

    pub fn account_mut(&mut self, address: &Address) -> Option<&mut TokenAccount> {
        self.erc20.iter_mut().find(|a| a.address == *address)
    }

    // --- bridge ---

    pub fn bridge_request(&self, id: BridgeId) -> Option<&BridgeRequest> {
        usize::try_from(id.0).ok().and_then(|i| self.bridge.get(i))
    }

    pub fn bridge_request_mut(&mut self, id: BridgeId) -> Option<&mut BridgeRequest> {
        usize::try_from(id.0).ok().and_then(move |i| self.bridge.get_mut(i))
    }

    /// Bridge requests for `toaddress` that have not been fulfilled yet.
    pub fn pending_bridge_requests<'a>(
        &'a self,
        toaddress: &'a Address,
    ) -> impl Iterator<Item = (BridgeId, &'a BridgeRequest)> + 'a {
        self.bridge
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.toaddress == *toaddress && !r.is_bridged)
            .map(|(i, r)| (BridgeId(i as u64), r))
    }

    // --- avl ---

    pub fn avl_index(&self, avl_address: &AvlAddress) -> Option<usize> {
        self.avl.iter().position(|a| a.avl_address == *avl_address)
    }

    pub fn avl_account(&self, avl_address: &AvlAddress) -> Option<&CrossChainAccount> {
        self.avl.iter().find(|a| a.avl_address == *avl_address)
    }

    /// The first claimed cross-chain account owned by `owner`, in insertion
    /// order. Unclaimed accounts carry the zero sentinel and never match.
    pub fn owned_avl_index(&self, owner: &Address) -> Option<usize> {
        self.avl
            .iter()
            .position(|a| a.claimed && a.evm_address == *owner)
    }

    pub fn is_empty(&self) -> bool {
        self.erc20.is_empty() && self.bridge.is_empty() && self.avl.is_empty()
    }
}
