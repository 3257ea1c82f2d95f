// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::io;

use stoken_kernel::LedgerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Invalid magic bytes in header")]
    InvalidMagic,
    #[error("Unsupported snapshot file version {0}")]
    UnsupportedVersion(u32),
    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: u64, found: u64 },
    #[error("Snapshot header does not match its body: {0}")]
    HeaderMismatch(&'static str),
    #[error("WAL sequence gap: expected {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },
    #[error("Ledger already initialized at {0}")]
    AlreadyInitialized(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
