//! Snapshot stream reader
//!
//! Input is JSONL: one snapshot object per line, UTF-8, blank lines
//! ignored. The reader is strict — the first malformed line aborts the
//! stream with its line number rather than being skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::errors::{TelemetryError, TelemetryResult};
use super::snapshot::PhysicalSnapshot;

/// Streaming JSONL snapshot reader
#[derive(Debug)]
pub struct SnapshotReader<R: BufRead> {
    source: R,
    /// Label used in IO errors ("-" for stdin)
    path: String,
    line: u64,
}

impl SnapshotReader<BufReader<File>> {
    /// Open a snapshot stream from a file path
    pub fn from_path(path: &Path) -> TelemetryResult<Self> {
        let file = File::open(path).map_err(|e| TelemetryError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self {
            source: BufReader::new(file),
            path: path.display().to_string(),
            line: 0,
        })
    }
}

impl SnapshotReader<BufReader<io::Stdin>> {
    /// Read snapshots from stdin
    pub fn from_stdin() -> Self {
        Self {
            source: BufReader::new(io::stdin()),
            path: "-".to_string(),
            line: 0,
        }
    }
}

impl<R: BufRead> SnapshotReader<R> {
    /// Wrap an arbitrary buffered reader (used by tests)
    pub fn from_reader(source: R) -> Self {
        Self {
            source,
            path: "<reader>".to_string(),
            line: 0,
        }
    }

    /// Read the next snapshot.
    ///
    /// Returns `Ok(None)` at end of stream. Blank lines are skipped and do
    /// not count as snapshots, but do count for line numbering.
    pub fn read_next(&mut self) -> TelemetryResult<Option<PhysicalSnapshot>> {
        loop {
            let mut buf = String::new();
            let bytes = self.source.read_line(&mut buf).map_err(|e| TelemetryError::Io {
                path: self.path.clone(),
                source: e,
            })?;

            if bytes == 0 {
                return Ok(None);
            }
            self.line += 1;

            if buf.trim().is_empty() {
                continue;
            }

            let snapshot = serde_json::from_str(&buf).map_err(|e| TelemetryError::Parse {
                line: self.line,
                source: e,
            })?;
            return Ok(Some(snapshot));
        }
    }
}
