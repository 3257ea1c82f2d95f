// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use crate::types::{Address, Amount};
use thiserror::Error;

/// Failure of a single transition. None of these leave a partial mutation
/// behind: the engine discards its staged copy on every error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Caller {caller} is not authorized to {transition}")]
    Unauthorized { caller: Address, transition: &'static str },

    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: Amount, requested: Amount },

    #[error("Insufficient allowance: available {available}, requested {requested}")]
    InsufficientAllowance { available: Amount, requested: Amount },

    #[error("Caller does not match the owner hash of {0}")]
    OwnershipMismatch(String),

    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    #[error("Unknown transition: {0}")]
    UnknownTransition(String),

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Codec error: {0}")]
    Codec(String),

    /// An event from an accepted log failed when replayed. The log or the
    /// snapshot underneath it is corrupt.
    #[error("Event {index} rejected during replay: {reason}")]
    Replay { index: u64, reason: Box<LedgerError> },

    /// A post-transition invariant check failed. This is a defect in a
    /// handler, never a user error.
    #[error("Invariant violated: {0}")]
    InvariantViolation(&'static str),
}

pub type LedgerResult<T> = core::result::Result<T, LedgerError>;
pub type Result<T> = LedgerResult<T>;
