//! Proof chain verification
//!
//! Per CHAIN.md §4, a chain is valid when:
//! - sequence numbers start at 1 and increase by exactly 1
//! - the first record's prev_hash is the genesis value
//! - every later record's prev_hash equals the preceding record's hash
//! - every record's hash matches its canonical payload
//!
//! Verification walks the whole chain and stops at the first violation.

use std::path::Path;

use super::errors::{ChainError, ChainResult};
use super::reader::read_chain_file;
use super::record::{ProofRecord, GENESIS_PREV_HASH};

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary {
    /// Number of records in the chain
    pub records: u64,
    /// Hash of the last record, if any
    pub head_hash: Option<String>,
}

/// Verify an in-memory chain
pub fn verify_records(records: &[ProofRecord]) -> ChainResult<ChainSummary> {
    let mut expected_prev = GENESIS_PREV_HASH.to_string();

    for (index, record) in records.iter().enumerate() {
        let expected_sequence = index as u64 + 1;
        if record.sequence != expected_sequence {
            return Err(ChainError::corruption_at_sequence(
                record.sequence,
                format!(
                    "Sequence gap: expected {}, found {}",
                    expected_sequence, record.sequence
                ),
            ));
        }

        if record.prev_hash != expected_prev {
            return Err(ChainError::corruption_at_sequence(
                record.sequence,
                "Broken linkage: prev_hash does not match preceding record",
            ));
        }

        if !record.verify_hash() {
            return Err(ChainError::corruption_at_sequence(
                record.sequence,
                "Hash mismatch: record does not match its canonical payload",
            ));
        }

        expected_prev = record.hash.clone();
    }

    Ok(ChainSummary {
        records: records.len() as u64,
        head_hash: records.last().map(|r| r.hash.clone()),
    })
}

/// Read and verify a chain file
pub fn verify_chain_file(path: &Path) -> ChainResult<ChainSummary> {
    let records = read_chain_file(path)?;
    verify_records(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awareness::AwarenessLevel;

    fn build_chain(len: u64) -> Vec<ProofRecord> {
        let mut records = Vec::new();
        let mut prev = GENESIS_PREV_HASH.to_string();
        for sequence in 1..=len {
            let record = ProofRecord::build(
                sequence,
                "DT-01",
                format!("2026-01-01T00:00:{:02}Z", sequence),
                0.4 + sequence as f64 * 0.01,
                AwarenessLevel::C1Functional,
                0,
                prev.clone(),
            );
            prev = record.hash.clone();
            records.push(record);
        }
        records
    }

    #[test]
    fn test_empty_chain_verifies() {
        let summary = verify_records(&[]).unwrap();
        assert_eq!(summary.records, 0);
        assert!(summary.head_hash.is_none());
    }

    #[test]
    fn test_valid_chain_verifies() {
        let records = build_chain(5);
        let summary = verify_records(&records).unwrap();
        assert_eq!(summary.records, 5);
        assert_eq!(summary.head_hash.as_deref(), Some(records[4].hash.as_str()));
    }

    #[test]
    fn test_wrong_genesis_detected() {
        let mut records = build_chain(1);
        records[0].prev_hash = "ff".repeat(32);
        records[0].hash = records[0].expected_hash();
        let err = verify_records(&records).unwrap_err();
        assert!(format!("{}", err).contains("Broken linkage"));
    }

    #[test]
    fn test_sequence_gap_detected() {
        let mut records = build_chain(3);
        records[2].sequence = 5;
        let err = verify_records(&records).unwrap_err();
        assert!(format!("{}", err).contains("Sequence gap"));
    }

    #[test]
    fn test_tampered_score_detected() {
        let mut records = build_chain(3);
        records[1].score = 0.999999;
        let err = verify_records(&records).unwrap_err();
        assert!(format!("{}", err).contains("Hash mismatch"));
        assert_eq!(err.details(), Some("sequence: 2"));
    }

    #[test]
    fn test_relinked_tampering_detected() {
        // Rewriting a record AND its hash still breaks the next link
        let mut records = build_chain(3);
        records[1].score = 0.999999;
        records[1].hash = records[1].expected_hash();
        let err = verify_records(&records).unwrap_err();
        assert!(format!("{}", err).contains("Broken linkage"));
        assert_eq!(err.details(), Some("sequence: 3"));
    }
}
