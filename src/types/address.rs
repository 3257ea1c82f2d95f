// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Address types.
//!
//! Ledger addresses are 20 raw bytes and always render as lowercase `0x` hex,
//! so two replicas that received differently-cased input still hash the same
//! bytes.

use core::fmt;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{ADDRESS_LEN, HASH_LEN};
use crate::error::{LedgerError, Result};

fn decode_hex<const N: usize>(s: &str, what: &str) -> Result<[u8; N]> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(digits)
        .map_err(|e| LedgerError::InvalidInput(format!("{what} {s:?}: {e}")))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        LedgerError::InvalidInput(format!("{what} {s:?}: expected {N} bytes, found {}", b.len()))
    })
}

/// An account address on this ledger.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// Owner of a cross-chain account that has not been claimed yet.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub fn parse(s: &str) -> Result<Self> {
        decode_hex::<ADDRESS_LEN>(s, "address").map(Address)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(de::Error::custom)
    }
}

/// Commitment to the address that may claim a cross-chain account.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OwnerHash(pub [u8; HASH_LEN]);

impl OwnerHash {
    /// BLAKE3 over the raw address bytes.
    pub fn of(address: &Address) -> Self {
        OwnerHash(*blake3::hash(address.as_bytes()).as_bytes())
    }

    pub fn parse(s: &str) -> Result<Self> {
        decode_hex::<HASH_LEN>(s, "owner hash").map(OwnerHash)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl fmt::Display for OwnerHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for OwnerHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerHash({self})")
    }
}

impl Serialize for OwnerHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OwnerHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        OwnerHash::parse(&s).map_err(de::Error::custom)
    }
}

/// Account identifier on the external chain. Opaque, non-empty UTF-8.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvlAddress(String);

impl AvlAddress {
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(LedgerError::InvalidInput("empty avl address".into()));
        }
        Ok(AvlAddress(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AvlAddress {
    type Error = LedgerError;

    fn try_from(s: String) -> Result<Self> {
        AvlAddress::new(s)
    }
}

impl From<AvlAddress> for String {
    fn from(a: AvlAddress) -> String {
        a.0
    }
}

impl fmt::Display for AvlAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
