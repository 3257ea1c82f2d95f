// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transition handlers.
//!
//! Each handler mutates the staged copy it is given. A handler may bail out
//! half way; the engine throws the staged copy away on any error, so ordering
//! of checks and writes inside a handler never leaks.

use crate::error::{LedgerError, Result};
use crate::state::auth::{require_owner, require_owner_hash};
use crate::state::leaves::{BridgeRequest, CrossChainAccount, Leaves, TokenAccount};
use crate::state::transition::Transition;
use crate::types::{Address, Amount, AvlAddress, BridgeId, OwnerHash};

/// Runs the handler for `tx` against `leaves`.
///
/// Returns the id of the bridge request created by `requestBridge`.
pub fn dispatch(leaves: &mut Leaves, caller: &Address, tx: &Transition) -> Result<Option<BridgeId>> {
    match tx {
        Transition::Create { address } => create(leaves, *address)?,
        Transition::Mint { to, amount } => mint(leaves, to, *amount)?,
        Transition::Burn { from, amount } => burn(leaves, caller, from, *amount)?,
        Transition::Transfer { from, to, amount } => transfer(leaves, caller, from, to, *amount)?,
        Transition::Approve { from, spender, amount } => approve(leaves, caller, from, *spender, *amount)?,
        Transition::TransferFrom { from, to, amount } => transfer_from(leaves, caller, from, to, *amount)?,
        Transition::RequestBridge { toaddress, amount } => {
            return request_bridge(leaves, toaddress, *amount).map(Some);
        }
        Transition::FulfillBridge { id, toaddress } => fulfill_bridge(leaves, *id, toaddress)?,
        Transition::BridgeAvlToApp {
            avl_address,
            amount,
            owner_hash,
        } => bridge_avl_to_app(leaves, avl_address, *amount, *owner_hash)?,
        Transition::ClaimAvlAccount { avl_address } => claim_avl_account(leaves, caller, avl_address)?,
        Transition::RequestStakeAvl { .. } => request_stake_avl(leaves, caller)?,
        Transition::FulfillStakeAvl {
            avl_address,
            shares_to_mint,
        } => fulfill_stake_avl(leaves, avl_address, *shares_to_mint)?,
    }
    Ok(None)
}

fn credit(balance: &mut Amount, amount: Amount) -> Result<()> {
    *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
    Ok(())
}

fn debit(balance: &mut Amount, amount: Amount) -> Result<()> {
    *balance = balance
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientFunds {
            available: *balance,
            requested: amount,
        })?;
    Ok(())
}

fn token_account<'a>(leaves: &'a mut Leaves, address: &Address) -> Result<&'a mut TokenAccount> {
    leaves
        .account_mut(address)
        .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))
}

fn avl_account<'a>(leaves: &'a mut Leaves, avl_address: &AvlAddress) -> Result<&'a mut CrossChainAccount> {
    leaves
        .avl
        .iter_mut()
        .find(|a| a.avl_address == *avl_address)
        .ok_or_else(|| LedgerError::AccountNotFound(avl_address.to_string()))
}

// --- erc20 ---

fn create(leaves: &mut Leaves, address: Address) -> Result<()> {
    if leaves.account_index(&address).is_some() {
        return Err(LedgerError::AlreadyExists(address.to_string()));
    }
    leaves.erc20.push(TokenAccount::new(address));
    Ok(())
}

fn mint(leaves: &mut Leaves, to: &Address, amount: Amount) -> Result<()> {
    let account = leaves
        .account_mut(to)
        .ok_or_else(|| LedgerError::NotFound(to.to_string()))?;
    credit(&mut account.balance, amount)
}

/// Burning more than the balance is rejected; balances never go negative.
fn burn(leaves: &mut Leaves, caller: &Address, from: &Address, amount: Amount) -> Result<()> {
    require_owner(caller, from, "burn")?;
    let account = token_account(leaves, from)?;
    debit(&mut account.balance, amount)
}

fn transfer(leaves: &mut Leaves, caller: &Address, from: &Address, to: &Address, amount: Amount) -> Result<()> {
    require_owner(caller, from, "transfer")?;
    move_funds(leaves, from, to, amount)
}

/// Debit `from`, credit `to`. Checks the source balance before the
/// destination's existence, matching the reported failure order.
fn move_funds(leaves: &mut Leaves, from: &Address, to: &Address, amount: Amount) -> Result<()> {
    debit(&mut token_account(leaves, from)?.balance, amount)?;
    credit(&mut token_account(leaves, to)?.balance, amount)
}

fn approve(leaves: &mut Leaves, caller: &Address, from: &Address, spender: Address, amount: Amount) -> Result<()> {
    require_owner(caller, from, "approve")?;
    token_account(leaves, from)?.set_allowance(spender, amount);
    Ok(())
}

fn transfer_from(leaves: &mut Leaves, caller: &Address, from: &Address, to: &Address, amount: Amount) -> Result<()> {
    let owner = token_account(leaves, from)?;
    let available = owner.allowance(caller);
    if available < amount {
        return Err(LedgerError::InsufficientAllowance {
            available,
            requested: amount,
        });
    }
    owner.set_allowance(*caller, available - amount);
    move_funds(leaves, from, to, amount)
}

// --- bridge ---

/// Locks `amount` of the claimed cross-chain account owned by `toaddress`.
/// Only that one account is consulted; other accounts' shares are irrelevant.
fn request_bridge(leaves: &mut Leaves, toaddress: &Address, amount: Amount) -> Result<BridgeId> {
    let idx = leaves
        .owned_avl_index(toaddress)
        .ok_or_else(|| LedgerError::AccountNotFound(toaddress.to_string()))?;
    let account = &mut leaves.avl[idx];
    account.staking_shares = account
        .staking_shares
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientFunds {
            available: account.staking_shares,
            requested: amount,
        })?;

    let id = BridgeId(leaves.bridge.len() as u64);
    leaves.bridge.push(BridgeRequest {
        toaddress: *toaddress,
        amount,
        is_bridged: false,
    });
    Ok(id)
}

fn fulfill_bridge(leaves: &mut Leaves, id: BridgeId, toaddress: &Address) -> Result<()> {
    let request = leaves
        .bridge_request_mut(id)
        .filter(|r| r.toaddress == *toaddress)
        .ok_or_else(|| LedgerError::NotFound(format!("bridge request {} for {}", id.0, toaddress)))?;
    if request.is_bridged {
        return Err(LedgerError::InvalidState("bridge request already fulfilled"));
    }
    request.is_bridged = true;
    Ok(())
}

// --- avl ---

/// Deposits accumulate. A later deposit never replaces the owner hash fixed
/// by the first one.
fn bridge_avl_to_app(leaves: &mut Leaves, avl_address: &AvlAddress, amount: Amount, owner_hash: OwnerHash) -> Result<()> {
    match leaves.avl_index(avl_address) {
        Some(idx) => credit(&mut leaves.avl[idx].free_balance, amount),
        None => {
            leaves
                .avl
                .push(CrossChainAccount::deposit(avl_address.clone(), amount, owner_hash));
            Ok(())
        }
    }
}

fn claim_avl_account(leaves: &mut Leaves, caller: &Address, avl_address: &AvlAddress) -> Result<()> {
    let idx = leaves
        .avl_index(avl_address)
        .ok_or_else(|| LedgerError::AccountNotFound(avl_address.to_string()))?;
    // The zero address marks unclaimed accounts and can never own one.
    if caller.is_zero() {
        return Err(LedgerError::OwnershipMismatch(avl_address.to_string()));
    }
    require_owner_hash(caller, &leaves.avl[idx].owner_hash, avl_address.as_str())?;

    let account = &mut leaves.avl[idx];
    account.evm_address = *caller;
    account.claimed = true;
    Ok(())
}

fn request_stake_avl(leaves: &mut Leaves, caller: &Address) -> Result<()> {
    let idx = leaves
        .owned_avl_index(caller)
        .ok_or_else(|| LedgerError::AccountNotFound(caller.to_string()))?;
    let account = &mut leaves.avl[idx];
    if account.requested_stake {
        return Err(LedgerError::InvalidState("stake already requested"));
    }
    account.requested_stake = true;
    Ok(())
}

fn fulfill_stake_avl(leaves: &mut Leaves, avl_address: &AvlAddress, shares_to_mint: Amount) -> Result<()> {
    let account = avl_account(leaves, avl_address)?;
    if !account.requested_stake {
        return Err(LedgerError::InvalidState("no pending stake request"));
    }
    account.free_balance = 0;
    account.staking_shares = shares_to_mint;
    account.requested_stake = false;
    Ok(())
}
