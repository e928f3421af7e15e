//! Proof record structure and hashing
//!
//! Per CHAIN.md §2, each assessment produces one record:
//! - sequence (starts at 1, strictly monotonic)
//! - twin_id, timestamp (snapshot time), score (rounded to 6 decimals),
//!   level, anomalies
//! - prev_hash (64 zeros for the genesis record)
//! - hash: lowercase hex SHA-256 of the canonical JSON of all other fields
//!
//! Canonical JSON means object keys in lexicographic order with no
//! insignificant whitespace. Hashing the canonical form makes record
//! identity independent of struct field order.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::awareness::AwarenessLevel;

/// prev_hash of the first record in a chain
pub const GENESIS_PREV_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Round a score to the 6 decimals stored in proof records
pub fn round_score(score: f64) -> f64 {
    (score * 1e6).round() / 1e6
}

/// One link in the proof chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// Position in the chain, starting at 1
    pub sequence: u64,
    /// Twin that produced the assessment
    pub twin_id: String,
    /// Timestamp of the snapshot that was assessed
    pub timestamp: String,
    /// Assessment score, rounded to 6 decimals
    pub score: f64,
    /// Awareness level label
    pub level: AwarenessLevel,
    /// Anomalies detected during the sync
    pub anomalies: u32,
    /// Hash of the preceding record (genesis: all zeros)
    pub prev_hash: String,
    /// SHA-256 over the canonical payload
    pub hash: String,
}

impl ProofRecord {
    /// Build a record, computing its hash from the canonical payload
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        sequence: u64,
        twin_id: impl Into<String>,
        timestamp: impl Into<String>,
        score: f64,
        level: AwarenessLevel,
        anomalies: u32,
        prev_hash: impl Into<String>,
    ) -> Self {
        let mut record = Self {
            sequence,
            twin_id: twin_id.into(),
            timestamp: timestamp.into(),
            score: round_score(score),
            level,
            anomalies,
            prev_hash: prev_hash.into(),
            hash: String::new(),
        };
        record.hash = record.expected_hash();
        record
    }

    /// Canonical JSON payload over which the hash is computed.
    ///
    /// serde_json object maps are BTreeMap-backed, so serializing a Value
    /// yields lexicographically sorted keys.
    pub fn canonical_payload(&self) -> String {
        let payload = serde_json::json!({
            "anomalies": self.anomalies,
            "level": self.level,
            "prev_hash": &self.prev_hash,
            "score": self.score,
            "sequence": self.sequence,
            "timestamp": &self.timestamp,
            "twin_id": &self.twin_id,
        });
        payload.to_string()
    }

    /// Recompute the hash this record should carry
    pub fn expected_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_payload().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Whether the stored hash matches the canonical payload
    pub fn verify_hash(&self) -> bool {
        self.hash == self.expected_hash()
    }
}
