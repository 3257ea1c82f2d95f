// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! stoken-kernel: a deterministic token ledger with bridge and cross-chain
//! staking lifecycles, committed to a single BLAKE3 state root after every
//! transition.

pub mod commitment;
pub mod config;
pub mod error;
pub mod event;
pub mod proof;
pub mod replay;
pub mod snapshot;
pub mod state;
pub mod types;
pub mod verify;

pub use commitment::{StateProof, StateRoots};
pub use error::{LedgerError, Result};
pub use event::LedgerEvent;
pub use state::auth::Origin;
pub use state::leaves::Leaves;
pub use state::ledger::{Ledger, Receipt};
pub use state::transition::Transition;

#[cfg(test)]
pub mod tests;
