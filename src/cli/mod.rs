//! CLI module for oriontwin
//!
//! Provides the command-line interface:
//! - init: validate config, prepare the chain directory
//! - run: stream snapshots through the twin
//! - simulate: drive the twin with seeded synthetic telemetry
//! - verify: check the durable proof chain

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, run_loop, simulate, verify};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_line, write_state};
