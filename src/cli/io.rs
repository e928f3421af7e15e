//! CLI output handling
//!
//! State output is JSONL on stdout: one twin state per sync. UTF-8 only.

use std::io::{self, Write};

use crate::twin::TwinState;

use super::errors::CliResult;

/// Write one twin state as a JSON line to stdout
pub fn write_state(state: &TwinState) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, state)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Write a plain line to stdout (simulate's table output)
pub fn write_line(line: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", line)?;
    stdout.flush()?;
    Ok(())
}
