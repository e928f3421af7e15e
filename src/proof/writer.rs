//! Proof chain writer with fsync enforcement
//!
//! Per CHAIN.md §3:
//! - Every file append is followed by fsync
//! - No batching
//! - No async durability
//!
//! Reopening a file chain verifies the existing records and resumes
//! sequence numbering from the durable tail; a twin never appends onto a
//! chain it cannot verify.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::awareness::AwarenessLevel;

use super::errors::{ChainError, ChainResult};
use super::reader::read_chain_file;
use super::record::{ProofRecord, GENESIS_PREV_HASH};
use super::verifier::verify_records;

#[derive(Debug)]
enum Sink {
    /// Chain disabled in configuration; appends are no-ops
    Disabled,
    /// Records held in process memory only
    Memory(Vec<ProofRecord>),
    /// Append-only JSONL file, fsync per append
    File { path: PathBuf, file: File },
}

/// Appender for the proof chain
#[derive(Debug)]
pub struct ChainWriter {
    twin_id: String,
    next_sequence: u64,
    head_hash: String,
    sink: Sink,
}

impl ChainWriter {
    /// A writer that records nothing (proof_chain.enabled = false)
    pub fn disabled(twin_id: impl Into<String>) -> Self {
        Self {
            twin_id: twin_id.into(),
            next_sequence: 1,
            head_hash: GENESIS_PREV_HASH.to_string(),
            sink: Sink::Disabled,
        }
    }

    /// An in-memory writer (proof_chain.storage = memory)
    pub fn in_memory(twin_id: impl Into<String>) -> Self {
        Self {
            twin_id: twin_id.into(),
            next_sequence: 1,
            head_hash: GENESIS_PREV_HASH.to_string(),
            sink: Sink::Memory(Vec::new()),
        }
    }

    /// Open or resume a file-backed chain (proof_chain.storage = file).
    ///
    /// Existing records are verified before the writer accepts appends;
    /// corruption here is fatal.
    pub fn open_file(twin_id: impl Into<String>, path: &Path) -> ChainResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    ChainError::io_error(
                        format!("Failed to create chain directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let existing = read_chain_file(path)?;
        let summary = verify_records(&existing)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                ChainError::io_error(format!("Failed to open chain file: {}", path.display()), e)
            })?;

        Ok(Self {
            twin_id: twin_id.into(),
            next_sequence: summary.records + 1,
            head_hash: summary
                .head_hash
                .unwrap_or_else(|| GENESIS_PREV_HASH.to_string()),
            sink: Sink::File {
                path: path.to_path_buf(),
                file,
            },
        })
    }

    /// Whether appends produce records
    pub fn is_enabled(&self) -> bool {
        !matches!(self.sink, Sink::Disabled)
    }

    /// The next sequence number that will be assigned
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Hash of the last appended record; `None` for an empty or disabled
    /// chain
    pub fn head_hash(&self) -> Option<&str> {
        if self.next_sequence > 1 {
            Some(&self.head_hash)
        } else {
            None
        }
    }

    /// In-memory records, when memory storage is configured
    pub fn records(&self) -> Option<&[ProofRecord]> {
        match &self.sink {
            Sink::Memory(records) => Some(records),
            _ => None,
        }
    }

    /// Append an assessment to the chain.
    ///
    /// Returns the appended record, or `None` when the chain is disabled.
    /// For file chains the record is durable (fsynced) before this returns.
    pub fn append(
        &mut self,
        timestamp: &str,
        score: f64,
        level: AwarenessLevel,
        anomalies: u32,
    ) -> ChainResult<Option<ProofRecord>> {
        if matches!(self.sink, Sink::Disabled) {
            return Ok(None);
        }

        let record = ProofRecord::build(
            self.next_sequence,
            self.twin_id.clone(),
            timestamp,
            score,
            level,
            anomalies,
            self.head_hash.clone(),
        );

        match &mut self.sink {
            Sink::Disabled => unreachable!("checked above"),
            Sink::Memory(records) => {
                records.push(record.clone());
            }
            Sink::File { path, file } => {
                let line = serde_json::to_string(&record).map_err(|e| {
                    ChainError::corruption_at_sequence(
                        record.sequence,
                        format!("Unserializable record: {}", e),
                    )
                })?;

                file.write_all(line.as_bytes())
                    .and_then(|_| file.write_all(b"\n"))
                    .map_err(|e| {
                        ChainError::append_failed(
                            format!(
                                "Failed to append record {} to {}",
                                record.sequence,
                                path.display()
                            ),
                            e,
                        )
                    })?;

                // fsync is mandatory and FATAL if it fails
                file.sync_all().map_err(|e| {
                    ChainError::fsync_failed(
                        format!("fsync failed after append at sequence {}", record.sequence),
                        e,
                    )
                })?;
            }
        }

        // Only advance the tail after the record is durable
        self.head_hash = record.hash.clone();
        self.next_sequence += 1;

        Ok(Some(record))
    }
}
