// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod checkpoint;
pub mod genesis;
pub mod inspect;
pub mod proof;
pub mod prove;
pub mod replay;
pub mod submit;
pub mod verify;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use stoken_kernel::types::hash_hex;
use stoken_kernel::StateRoots;

pub(crate) fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub(crate) fn add_roots(table: &mut Table, roots: &StateRoots) {
    table.add_row(vec!["erc20 root".to_string(), hash_hex(&roots.erc20)]);
    table.add_row(vec!["bridge root".to_string(), hash_hex(&roots.bridge)]);
    table.add_row(vec!["avl root".to_string(), hash_hex(&roots.avl)]);
    table.add_row(vec!["stateRoot".to_string(), hash_hex(&roots.state)]);
}
