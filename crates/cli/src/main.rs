// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stoken_cli::commands::prove::ProveTarget;
use stoken_cli::commands::{checkpoint, genesis, inspect, proof, prove, replay, submit, verify};
use stoken_cli::LedgerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stoken")]
#[command(about = "sTokens ledger operator tool", long_about = None)]
struct Cli {
    /// JSON config file (defaults apply when omitted).
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overriding the config.
    #[arg(long, short, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the genesis snapshot and an empty WAL.
    Genesis {
        /// Genesis leaves as JSON ({"erc20": [...], "bridge": [...], "avl": [...]}).
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// Validate an action against the current state and append it to the WAL.
    Submit {
        /// Caller address; configured operators act with operator authority.
        #[arg(long)]
        from: String,
        /// Transition name, e.g. `transfer` or `bridgeAVLtoApp`.
        name: String,
        /// Transition inputs as a JSON object.
        inputs: String,
    },
    /// Rebuild state from snapshot + WAL and print the roots.
    Replay,
    /// Show file status and a state summary.
    Inspect,
    /// Verify the integrity of a snapshot file.
    Verify {
        /// Defaults to the configured snapshot.
        snapshot_path: Option<PathBuf>,
    },
    /// Print a Merkle inclusion proof for one leaf.
    Prove {
        #[command(subcommand)]
        target: ProveTarget,
    },
    /// Print a deterministic replay proof for snapshot + WAL.
    Proof,
    /// Fold the WAL into a new snapshot.
    Checkpoint,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "stoken_cli=info,stoken_persistence=info,stoken_kernel=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut cfg = LedgerConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.dir {
        cfg.data_dir = dir;
    }
    tracing::debug!(?cfg, "configuration loaded");

    match cli.command {
        Commands::Genesis { input } => genesis::run(&cfg, input.as_deref()).map(|_| ()),
        Commands::Submit { from, name, inputs } => submit::run(&cfg, &from, &name, &inputs).map(|_| ()),
        Commands::Replay => replay::run(&cfg).map(|_| ()),
        Commands::Inspect => inspect::run(&cfg),
        Commands::Verify { snapshot_path } => {
            let path = snapshot_path.unwrap_or_else(|| cfg.paths().snapshot);
            verify::run(&path).map(|_| ())
        }
        Commands::Prove { target } => prove::run(&cfg, &target).map(|_| ()),
        Commands::Proof => proof::run(&cfg).map(|_| ()),
        Commands::Checkpoint => checkpoint::run(&cfg).map(|_| ()),
    }
}
