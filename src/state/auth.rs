// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Authorization helpers.
//!
//! Signature checks happen upstream. By the time a transition reaches the
//! engine its caller is authenticated and its submission path (user or
//! operator) is known; these helpers only compare identities.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::types::{Address, OwnerHash};

/// Who submitted a transition, and through which path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    /// An end user whose signature was verified upstream.
    User(Address),
    /// The relayer/operator path.
    Operator(Address),
}

impl Origin {
    pub fn address(&self) -> Address {
        match self {
            Origin::User(a) | Origin::Operator(a) => *a,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Origin::Operator(_))
    }
}

pub fn require_operator(origin: &Origin, transition: &'static str) -> Result<()> {
    if origin.is_operator() {
        Ok(())
    } else {
        Err(LedgerError::Unauthorized {
            caller: origin.address(),
            transition,
        })
    }
}

/// The caller may only act on its own account.
pub fn require_owner(caller: &Address, owner: &Address, transition: &'static str) -> Result<()> {
    if caller == owner {
        Ok(())
    } else {
        Err(LedgerError::Unauthorized {
            caller: *caller,
            transition,
        })
    }
}

/// The caller must be the preimage of `expected`.
pub fn require_owner_hash(caller: &Address, expected: &OwnerHash, subject: &str) -> Result<()> {
    if OwnerHash::of(caller) == *expected {
        Ok(())
    } else {
        Err(LedgerError::OwnershipMismatch(subject.to_owned()))
    }
}
