// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot decoding.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::config::{ADDRESS_LEN, HASH_LEN, SNAPSHOT_MAGIC, SNAPSHOT_SCHEMA_VERSION};
use crate::error::{LedgerError, Result};
use crate::state::leaves::{Allowance, BridgeRequest, CrossChainAccount, Leaves, TokenAccount};
use crate::state::ledger::Ledger;
use crate::types::{Address, AvlAddress, Height, OwnerHash};

fn malformed(what: &str) -> LedgerError {
    LedgerError::Codec(format!("malformed snapshot: {what}"))
}

struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    fn u8(&mut self) -> Result<u8> {
        self.cursor.read_u8().map_err(|_| malformed("truncated"))
    }

    fn u32(&mut self) -> Result<u32> {
        self.cursor.read_u32::<LittleEndian>().map_err(|_| malformed("truncated"))
    }

    fn u64(&mut self) -> Result<u64> {
        self.cursor.read_u64::<LittleEndian>().map_err(|_| malformed("truncated"))
    }

    fn u128(&mut self) -> Result<u128> {
        self.cursor.read_u128::<LittleEndian>().map_err(|_| malformed("truncated"))
    }

    fn bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.cursor.read_exact(&mut buf).map_err(|_| malformed("truncated"))?;
        Ok(buf)
    }

    fn bool(&mut self) -> Result<bool> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(malformed("bool out of range")),
        }
    }

    /// A collection length, bounded by the bytes left so a corrupt count
    /// cannot drive a huge allocation.
    fn len(&mut self) -> Result<usize> {
        let len = self.u32()? as usize;
        if len > self.remaining() {
            return Err(malformed("length exceeds buffer"));
        }
        Ok(len)
    }

    fn string(&mut self) -> Result<String> {
        let len = self.len()?;
        let mut buf = vec![0u8; len];
        self.cursor.read_exact(&mut buf).map_err(|_| malformed("truncated"))?;
        String::from_utf8(buf).map_err(|_| malformed("invalid utf-8"))
    }

    fn remaining(&self) -> usize {
        let data = self.cursor.get_ref();
        data.len().saturating_sub(self.cursor.position() as usize)
    }
}

pub fn decode_state(buf: &[u8]) -> Result<Ledger> {
    let mut r = Reader { cursor: Cursor::new(buf) };

    // Header
    if r.bytes::<4>()? != *SNAPSHOT_MAGIC {
        return Err(malformed("bad magic"));
    }
    let schema = r.u32()?;
    if schema != SNAPSHOT_SCHEMA_VERSION {
        return Err(LedgerError::Codec(format!("unsupported snapshot schema {schema}")));
    }
    let height = Height(r.u64()?);

    let mut leaves = Leaves::new();

    // erc20
    let count = r.len()?;
    for _ in 0..count {
        let address = Address(r.bytes::<ADDRESS_LEN>()?);
        let balance = r.u128()?;
        let nonce = r.u64()?;
        let allowance_count = r.len()?;
        let mut allowances = Vec::with_capacity(allowance_count);
        for _ in 0..allowance_count {
            allowances.push(Allowance {
                spender: Address(r.bytes::<ADDRESS_LEN>()?),
                amount: r.u128()?,
            });
        }
        leaves.erc20.push(TokenAccount {
            address,
            balance,
            nonce,
            allowances,
        });
    }

    // bridge
    let count = r.len()?;
    for _ in 0..count {
        leaves.bridge.push(BridgeRequest {
            toaddress: Address(r.bytes::<ADDRESS_LEN>()?),
            amount: r.u128()?,
            is_bridged: r.bool()?,
        });
    }

    // avl
    let count = r.len()?;
    for _ in 0..count {
        let evm_address = Address(r.bytes::<ADDRESS_LEN>()?);
        let avl_address = AvlAddress::new(r.string()?).map_err(|_| malformed("empty avl address"))?;
        leaves.avl.push(CrossChainAccount {
            evm_address,
            avl_address,
            free_balance: r.u128()?,
            staking_shares: r.u128()?,
            owner_hash: OwnerHash(r.bytes::<HASH_LEN>()?),
            claimed: r.bool()?,
            nonce: r.u64()?,
            requested_stake: r.bool()?,
        });
    }

    if r.remaining() != 0 {
        return Err(malformed("trailing bytes"));
    }

    Ledger::from_parts(leaves, height)
}
