// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use stoken_kernel::types::Address;
use stoken_kernel::Origin;
use stoken_persistence::StorePaths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub data_dir: PathBuf,
    pub snapshot_file: String,
    pub wal_file: String,
    /// Addresses whose actions carry operator authority.
    pub operators: Vec<Address>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("stoken-data"),
            snapshot_file: "ledger.snap".to_string(),
            wal_file: "events.wal".to_string(),
            operators: Vec::new(),
        }
    }
}

impl LedgerConfig {
    /// Reads a JSON config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn paths(&self) -> StorePaths {
        StorePaths::new(&self.data_dir, &self.snapshot_file, &self.wal_file)
    }

    pub fn origin_for(&self, caller: Address) -> Origin {
        if self.operators.contains(&caller) {
            Origin::Operator(caller)
        } else {
            Origin::User(caller)
        }
    }
}
