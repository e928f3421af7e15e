//! Proof chain reader
//!
//! Chain files are JSONL: one proof record per line. The reader is strict;
//! a line that fails to parse is chain corruption, not a skippable entry.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::errors::{ChainError, ChainResult};
use super::record::ProofRecord;

/// Sequential reader over a chain file
pub struct ChainReader {
    source: BufReader<File>,
    line: u64,
}

impl ChainReader {
    /// Open a chain file for reading
    pub fn open(path: &Path) -> ChainResult<Self> {
        let file = File::open(path).map_err(|e| {
            ChainError::io_error(format!("Failed to open chain file: {}", path.display()), e)
        })?;
        Ok(Self {
            source: BufReader::new(file),
            line: 0,
        })
    }

    /// Read the next record; `Ok(None)` at end of file
    pub fn read_next(&mut self) -> ChainResult<Option<ProofRecord>> {
        loop {
            let mut buf = String::new();
            let bytes = self.source.read_line(&mut buf).map_err(|e| {
                ChainError::io_error(format!("Failed to read chain at line {}", self.line + 1), e)
            })?;

            if bytes == 0 {
                return Ok(None);
            }
            self.line += 1;

            if buf.trim().is_empty() {
                continue;
            }

            let record: ProofRecord = serde_json::from_str(&buf).map_err(|e| {
                ChainError::corruption_at_line(self.line, format!("Unparseable record: {}", e))
            })?;
            return Ok(Some(record));
        }
    }
}

/// Read a whole chain file into memory.
///
/// A missing file is an empty chain (a fresh twin has appended nothing yet).
pub fn read_chain_file(path: &Path) -> ChainResult<Vec<ProofRecord>> {
    match path.metadata() {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(ChainError::io_error(
                format!("Failed to stat chain file: {}", path.display()),
                e,
            ))
        }
        Ok(_) => {}
    }

    let mut reader = ChainReader::open(path)?;
    let mut records = Vec::new();
    while let Some(record) = reader.read_next()? {
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awareness::AwarenessLevel;
    use crate::proof::record::GENESIS_PREV_HASH;
    use std::io::Write;

    fn sample_line() -> String {
        let record = ProofRecord::build(
            1,
            "DT-01",
            "2026-01-01T00:00:00Z",
            0.5,
            AwarenessLevel::C2Emerging,
            0,
            GENESIS_PREV_HASH,
        );
        serde_json::to_string(&record).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_chain() {
        let dir = tempfile::TempDir::new().unwrap();
        let records = read_chain_file(&dir.path().join("chain.log")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_reads_records() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chain.log");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", sample_line()).unwrap();

        let records = read_chain_file(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence, 1);
    }

    #[test]
    fn test_unparseable_line_is_corruption() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chain.log");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", sample_line()).unwrap();
        writeln!(file, "{{half a record").unwrap();

        let err = read_chain_file(&path).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.details(), Some("line: 2"));
    }
}
