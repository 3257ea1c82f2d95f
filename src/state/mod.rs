// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod auth;
pub mod handlers;
pub mod invariants;
pub mod leaves;
pub mod ledger;
pub mod transition;
