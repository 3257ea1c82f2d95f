// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transition enum definitions.
//!
//! One variant per handler, each with its typed payload. The serde names
//! are the wire names submitted by clients (`create`, `transferFrom`,
//! `bridgeAVLtoApp`, ...).

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::types::{Address, Amount, AvlAddress, BridgeId, OwnerHash};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    /// Open an empty token account.
    Create { address: Address },

    /// Credit `to`. Operator only.
    Mint { to: Address, amount: Amount },

    /// Destroy tokens held by the caller.
    Burn { from: Address, amount: Amount },

    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },

    /// Let `spender` move up to `amount` out of `from`.
    Approve {
        from: Address,
        #[serde(rename = "to")]
        spender: Address,
        amount: Amount,
    },

    /// Spend an allowance granted to the caller.
    TransferFrom {
        from: Address,
        to: Address,
        amount: Amount,
    },

    /// Lock staking shares of the caller's cross-chain account for bridging out.
    RequestBridge { toaddress: Address, amount: Amount },

    /// Mark a bridge request as delivered. Operator only.
    FulfillBridge { id: BridgeId, toaddress: Address },

    /// Record a deposit observed on the external chain. Operator only.
    #[serde(rename = "bridgeAVLtoApp", rename_all = "camelCase")]
    BridgeAvlToApp {
        avl_address: AvlAddress,
        amount: Amount,
        #[serde(alias = "evmAddressHash")]
        owner_hash: OwnerHash,
    },

    /// Prove ownership of a deposited account.
    #[serde(rename = "claimAVLAccount", rename_all = "camelCase")]
    ClaimAvlAccount { avl_address: AvlAddress },

    /// Ask the operator to stake the caller's free balance.
    ///
    /// `timestamp` is carried for request uniqueness on the wire and has no
    /// effect on state.
    #[serde(rename = "requestStakeAVL")]
    RequestStakeAvl {
        #[serde(default)]
        timestamp: String,
    },

    /// Settle a stake request. Operator only.
    #[serde(rename = "fulfillStakeAVL", rename_all = "camelCase")]
    FulfillStakeAvl {
        avl_address: AvlAddress,
        shares_to_mint: Amount,
    },
}

impl Transition {
    /// Every wire name the engine dispatches on.
    pub const NAMES: [&'static str; 12] = [
        "create",
        "mint",
        "burn",
        "transfer",
        "approve",
        "transferFrom",
        "requestBridge",
        "fulfillBridge",
        "bridgeAVLtoApp",
        "claimAVLAccount",
        "requestStakeAVL",
        "fulfillStakeAVL",
    ];

    /// Builds a transition from its wire name and a JSON object of inputs.
    ///
    /// The inputs are parsed from text rather than a `serde_json::Value` so
    /// that 128-bit amounts survive intact.
    pub fn from_named(name: &str, inputs: &str) -> Result<Self> {
        if !Self::NAMES.contains(&name) {
            return Err(LedgerError::UnknownTransition(name.to_owned()));
        }
        let tagged = format!("{{\"{name}\":{inputs}}}");
        serde_json::from_str(&tagged).map_err(|e| LedgerError::InvalidInput(format!("{name}: {e}")))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transition::Create { .. } => "create",
            Transition::Mint { .. } => "mint",
            Transition::Burn { .. } => "burn",
            Transition::Transfer { .. } => "transfer",
            Transition::Approve { .. } => "approve",
            Transition::TransferFrom { .. } => "transferFrom",
            Transition::RequestBridge { .. } => "requestBridge",
            Transition::FulfillBridge { .. } => "fulfillBridge",
            Transition::BridgeAvlToApp { .. } => "bridgeAVLtoApp",
            Transition::ClaimAvlAccount { .. } => "claimAVLAccount",
            Transition::RequestStakeAvl { .. } => "requestStakeAVL",
            Transition::FulfillStakeAvl { .. } => "fulfillStakeAVL",
        }
    }

    /// Transitions that originate from the relayer/operator path.
    pub fn is_operator_only(&self) -> bool {
        matches!(
            self,
            Transition::Mint { .. }
                | Transition::BridgeAvlToApp { .. }
                | Transition::FulfillBridge { .. }
                | Transition::FulfillStakeAvl { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "0x00000000000000000000000000000000000000a1";
    const B: &str = "0x00000000000000000000000000000000000000b2";

    #[test]
    fn test_from_named_maps_wire_inputs() {
        let inputs = format!(r#"{{"from":"{A}","to":"{B}","amount":100}}"#);
        let tx = Transition::from_named("approve", &inputs).unwrap();
        assert_eq!(
            tx,
            Transition::Approve {
                from: Address::parse(A).unwrap(),
                spender: Address::parse(B).unwrap(),
                amount: 100,
            }
        );
        assert_eq!(tx.name(), "approve");
    }

    #[test]
    fn test_from_named_keeps_wide_amounts() {
        let amount = u128::MAX - 7;
        let inputs = format!(r#"{{"to":"{A}","from":"{A}","amount":{amount}}}"#);
        let tx = Transition::from_named("mint", &inputs).unwrap();
        assert_eq!(tx, Transition::Mint { to: Address::parse(A).unwrap(), amount });
    }

    #[test]
    fn test_from_named_accepts_legacy_field_names() {
        let hash = format!("0x{}", "11".repeat(32));
        let inputs = format!(r#"{{"avlAddress":"5Grw","amount":50,"evmAddressHash":"{hash}"}}"#);
        let tx = Transition::from_named("bridgeAVLtoApp", &inputs).unwrap();
        assert!(matches!(tx, Transition::BridgeAvlToApp { amount: 50, .. }));

        let tx = Transition::from_named("requestStakeAVL", "{}").unwrap();
        assert_eq!(tx, Transition::RequestStakeAvl { timestamp: String::new() });
    }

    #[test]
    fn test_unknown_and_malformed() {
        assert_eq!(
            Transition::from_named("selfdestruct", "{}"),
            Err(LedgerError::UnknownTransition("selfdestruct".into()))
        );
        assert!(matches!(
            Transition::from_named("transfer", r#"{"from":"0x12"}"#),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            Transition::from_named("burn", r#"{"from":"0x00000000000000000000000000000000000000a1","amount":-1}"#),
            Err(LedgerError::InvalidInput(_))
        ));
    }
}
