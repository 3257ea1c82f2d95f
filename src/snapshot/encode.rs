// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot encoding.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::config::{SNAPSHOT_MAGIC, SNAPSHOT_SCHEMA_VERSION};
use crate::error::{LedgerError, Result};
use crate::state::ledger::Ledger;

fn write_len<W: Write>(w: &mut W, len: usize) -> io::Result<()> {
    let len = u32::try_from(len).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "collection too large"))?;
    w.write_u32::<LittleEndian>(len)
}

fn write_bool<W: Write>(w: &mut W, b: bool) -> io::Result<()> {
    w.write_u8(b as u8)
}

pub fn encode_into<W: Write>(ledger: &Ledger, w: &mut W) -> io::Result<()> {
    let leaves = ledger.current_state();

    // Header
    w.write_all(SNAPSHOT_MAGIC)?;
    w.write_u32::<LittleEndian>(SNAPSHOT_SCHEMA_VERSION)?;
    w.write_u64::<LittleEndian>(ledger.height().0)?;

    // erc20
    write_len(w, leaves.erc20.len())?;
    for account in &leaves.erc20 {
        w.write_all(account.address.as_bytes())?;
        w.write_u128::<LittleEndian>(account.balance)?;
        w.write_u64::<LittleEndian>(account.nonce)?;
        write_len(w, account.allowances.len())?;
        for allowance in &account.allowances {
            w.write_all(allowance.spender.as_bytes())?;
            w.write_u128::<LittleEndian>(allowance.amount)?;
        }
    }

    // bridge
    write_len(w, leaves.bridge.len())?;
    for request in &leaves.bridge {
        w.write_all(request.toaddress.as_bytes())?;
        w.write_u128::<LittleEndian>(request.amount)?;
        write_bool(w, request.is_bridged)?;
    }

    // avl
    write_len(w, leaves.avl.len())?;
    for account in &leaves.avl {
        w.write_all(account.evm_address.as_bytes())?;
        let id = account.avl_address.as_str().as_bytes();
        write_len(w, id.len())?;
        w.write_all(id)?;
        w.write_u128::<LittleEndian>(account.free_balance)?;
        w.write_u128::<LittleEndian>(account.staking_shares)?;
        w.write_all(account.owner_hash.as_bytes())?;
        write_bool(w, account.claimed)?;
        w.write_u64::<LittleEndian>(account.nonce)?;
        write_bool(w, account.requested_stake)?;
    }

    Ok(())
}

pub fn encode_state(ledger: &Ledger) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_into(ledger, &mut buf).map_err(|e| LedgerError::Codec(e.to_string()))?;
    Ok(buf)
}
