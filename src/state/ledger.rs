// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger engine.
//!
//! The single owner of the leaf collections. Transitions are applied one at a
//! time in the order the sequencer delivered them; each one runs against a
//! staged copy and is committed only if the handler and the invariant checker
//! both accept the result.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::commitment::{self, StateProof, StateRoots};
use crate::error::{LedgerError, Result};
use crate::state::auth::{require_operator, Origin};
use crate::state::handlers;
use crate::state::invariants::check_invariants;
use crate::state::leaves::Leaves;
use crate::state::transition::Transition;
use crate::types::{hash_hex, Address, Amount, AvlAddress, BridgeId, Hash, Height};

/// Acknowledgement of a committed transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub height: Height,
    pub transition: String,
    pub state_root: Hash,
    /// Set for `requestBridge`: the id later passed to `fulfillBridge`.
    pub bridge_id: Option<BridgeId>,
}

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    leaves: Leaves,
    height: Height,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from a genesis snapshot supplied by an external loader.
    pub fn from_genesis(leaves: Leaves) -> Result<Self> {
        Self::from_parts(leaves, Height(0))
    }

    /// Restores a ledger at a known height (snapshot decode).
    pub fn from_parts(leaves: Leaves, height: Height) -> Result<Self> {
        check_invariants(&leaves)?;
        Ok(Self { leaves, height })
    }

    // --- Read APIs ---

    pub fn current_state(&self) -> &Leaves {
        &self.leaves
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn roots(&self) -> StateRoots {
        commitment::compute_roots(&self.leaves)
    }

    pub fn root_hash(&self) -> Hash {
        self.roots().state
    }

    /// Sum of all token balances, `None` if it does not fit in an `Amount`.
    pub fn total_supply(&self) -> Option<Amount> {
        self.leaves
            .erc20
            .iter()
            .try_fold(0 as Amount, |acc, a| acc.checked_add(a.balance))
    }

    pub fn prove_account(&self, address: &Address) -> Option<StateProof> {
        let idx = self.leaves.account_index(address)?;
        commitment::prove_erc20(&self.leaves, idx)
    }

    pub fn prove_bridge_request(&self, id: BridgeId) -> Option<StateProof> {
        let idx = usize::try_from(id.0).ok()?;
        commitment::prove_bridge(&self.leaves, idx)
    }

    pub fn prove_avl_account(&self, avl_address: &AvlAddress) -> Option<StateProof> {
        let idx = self.leaves.avl_index(avl_address)?;
        commitment::prove_avl(&self.leaves, idx)
    }

    // --- Write Logic ---

    pub fn apply(&mut self, origin: &Origin, tx: &Transition) -> Result<Receipt> {
        match self.stage(origin, tx) {
            Ok((staged, bridge_id)) => {
                self.leaves = staged;
                self.height = self.height.next();
                let state_root = self.root_hash();
                debug!(
                    transition = tx.name(),
                    height = self.height.0,
                    root = %hash_hex(&state_root),
                    "transition committed"
                );
                Ok(Receipt {
                    height: self.height,
                    transition: tx.name().to_owned(),
                    state_root,
                    bridge_id,
                })
            }
            Err(e @ LedgerError::InvariantViolation(_)) => {
                error!(transition = tx.name(), caller = %origin.address(), error = %e, "handler broke a ledger invariant; transition aborted");
                Err(e)
            }
            Err(e) => {
                warn!(transition = tx.name(), caller = %origin.address(), error = %e, "transition rejected");
                Err(e)
            }
        }
    }

    /// Runs `tx` on a copy of the current leaves. Live state is untouched.
    fn stage(&self, origin: &Origin, tx: &Transition) -> Result<(Leaves, Option<BridgeId>)> {
        if tx.is_operator_only() {
            require_operator(origin, tx.name())?;
        }
        let mut staged = self.leaves.clone();
        let bridge_id = handlers::dispatch(&mut staged, &origin.address(), tx)?;
        check_invariants(&staged)?;
        Ok((staged, bridge_id))
    }
}
