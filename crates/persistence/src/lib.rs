// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod error;
pub mod fixtures;
pub mod snapshot;
pub mod store;
pub mod wal;

pub use error::{PersistenceError, Result};
pub use store::{LedgerStore, StorePaths};
