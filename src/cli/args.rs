//! CLI argument definitions using clap
//!
//! Commands:
//! - oriontwin init --config <path>
//! - oriontwin run --config <path> [--input <file>]
//! - oriontwin simulate --config <path> [--ticks N] [--seed S]
//! - oriontwin verify --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// oriontwin - A strict, deterministic digital twin runtime
#[derive(Parser, Debug)]
#[command(name = "oriontwin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the configuration and prepare the chain directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./oriontwin.yaml")]
        config: PathBuf,
    },

    /// Stream snapshots through the twin, one state line per snapshot
    Run {
        /// Path to configuration file
        #[arg(long, default_value = "./oriontwin.yaml")]
        config: PathBuf,

        /// Snapshot JSONL file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Drive the twin with seeded synthetic telemetry
    Simulate {
        /// Path to configuration file
        #[arg(long, default_value = "./oriontwin.yaml")]
        config: PathBuf,

        /// Number of synthetic snapshots
        #[arg(long, default_value_t = 15)]
        ticks: u64,

        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Verify the durable proof chain and exit non-zero on corruption
    Verify {
        /// Path to configuration file
        #[arg(long, default_value = "./oriontwin.yaml")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
