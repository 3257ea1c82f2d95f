// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Invariant checker.
//!
//! Run against every staged state before it is committed, and against every
//! genesis snapshot before it is accepted. Balances cannot go negative by
//! construction (`Amount` is unsigned).

use std::collections::BTreeSet;

use crate::error::{LedgerError, Result};
use crate::state::leaves::Leaves;

pub fn check_invariants(leaves: &Leaves) -> Result<()> {
    // 1. erc20: unique owners, one allowance entry per spender
    let mut owners = BTreeSet::new();
    for account in &leaves.erc20 {
        if !owners.insert(account.address) {
            return Err(LedgerError::InvariantViolation("duplicate erc20 address"));
        }
        let mut spenders = BTreeSet::new();
        for allowance in &account.allowances {
            if !spenders.insert(allowance.spender) {
                return Err(LedgerError::InvariantViolation("duplicate allowance spender"));
            }
        }
    }

    // 2. avl: unique external ids, claim flags consistent with the owner field
    let mut avl_ids = BTreeSet::new();
    for account in &leaves.avl {
        if !avl_ids.insert(account.avl_address.as_str()) {
            return Err(LedgerError::InvariantViolation("duplicate avl address"));
        }
        if account.claimed {
            if account.evm_address.is_zero() {
                return Err(LedgerError::InvariantViolation("claimed avl account has no owner"));
            }
        } else {
            if !account.evm_address.is_zero() {
                return Err(LedgerError::InvariantViolation("unclaimed avl account has an owner"));
            }
            if account.requested_stake {
                return Err(LedgerError::InvariantViolation("stake requested on unclaimed avl account"));
            }
        }
    }

    Ok(())
}
