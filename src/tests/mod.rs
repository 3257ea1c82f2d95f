pub mod proof_tests;

use crate::state::auth::Origin;
use crate::state::ledger::Ledger;
use crate::state::transition::Transition;
use crate::types::{Address, Amount, AvlAddress, OwnerHash};

pub(crate) fn addr(n: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = n;
    bytes[0] = 0xa0;
    Address(bytes)
}

pub(crate) fn user(n: u8) -> Origin {
    Origin::User(addr(n))
}

pub(crate) fn operator() -> Origin {
    Origin::Operator(addr(0xff))
}

pub(crate) fn avl(id: &str) -> AvlAddress {
    AvlAddress::new(id).unwrap()
}

/// Ledger with accounts 1..=n, each minted `balance`.
pub(crate) fn funded_ledger(n: u8, balance: Amount) -> Ledger {
    let mut ledger = Ledger::new();
    for i in 1..=n {
        ledger.apply(&user(i), &Transition::Create { address: addr(i) }).unwrap();
        ledger
            .apply(&operator(), &Transition::Mint { to: addr(i), amount: balance })
            .unwrap();
    }
    ledger
}

/// Deposits `amount` for `id`, claims it as `owner` and stakes it into `shares`.
pub(crate) fn staked_account(ledger: &mut Ledger, id: &str, owner: u8, amount: Amount, shares: Amount) {
    ledger
        .apply(
            &operator(),
            &Transition::BridgeAvlToApp {
                avl_address: avl(id),
                amount,
                owner_hash: OwnerHash::of(&addr(owner)),
            },
        )
        .unwrap();
    ledger
        .apply(&user(owner), &Transition::ClaimAvlAccount { avl_address: avl(id) })
        .unwrap();
    ledger
        .apply(&user(owner), &Transition::RequestStakeAvl { timestamp: "1700000000".into() })
        .unwrap();
    ledger
        .apply(
            &operator(),
            &Transition::FulfillStakeAvl {
                avl_address: avl(id),
                shares_to_mint: shares,
            },
        )
        .unwrap();
}
