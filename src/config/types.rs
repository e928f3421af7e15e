//! Configuration structure per CONFIG.md
//!
//! The config file is YAML with three sections:
//!
//! ```yaml
//! twin:
//!   name: DT-KUKA-KR6-01
//!   physical_id: robot-arm-kuka-kr6
//!   sync_rate_hz: 100
//! consciousness:
//!   measurement_rate_hz: 10
//!   theories: [GWT, IIT, RPT, HOT, AST]
//!   indicators:
//!     situation_awareness: { source: sensor_fusion, weight: 0.25 }
//! proof_chain:
//!   enabled: true
//!   algorithm: sha256
//!   storage: file
//!   path: ./data/chain/chain.log
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::awareness::{IndicatorKind, Theory};

fn default_weight() -> f64 {
    1.0
}

fn default_enabled() -> bool {
    true
}

fn default_algorithm() -> String {
    "sha256".to_string()
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Twin identity and sync cadence
    pub twin: TwinSection,
    /// Awareness measurement settings
    pub consciousness: ConsciousnessSection,
    /// Proof chain settings
    #[serde(default)]
    pub proof_chain: ProofChainSection,
}

/// Twin identity and sync cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinSection {
    /// Twin identifier (appears in every state and proof record)
    pub name: String,
    /// Identifier of the physical counterpart; snapshots from any other
    /// device are rejected at sync time
    pub physical_id: String,
    /// Snapshot ingestion rate
    pub sync_rate_hz: f64,
}

/// Awareness measurement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsciousnessSection {
    /// Assessment rate; must not exceed the sync rate
    pub measurement_rate_hz: f64,

    /// Theory tags claimed by this deployment (provenance only)
    #[serde(default)]
    pub theories: Vec<Theory>,

    /// Per-indicator source labels and weights; omitted indicators
    /// weigh 1.0
    #[serde(default)]
    pub indicators: BTreeMap<IndicatorKind, IndicatorSpec>,
}

/// Source label and weight for one indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    /// Free-form provenance label (e.g. "sensor_fusion")
    pub source: String,
    /// Non-negative scoring weight
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Where proof records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// In-process only; records are lost on exit
    #[default]
    Memory,
    /// Append-only JSONL file with fsync per append
    File,
}

/// Proof chain settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofChainSection {
    /// Whether assessments append proof records at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Hash algorithm; only "sha256" is accepted
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Storage mode
    #[serde(default)]
    pub storage: StorageMode,

    /// Chain file path; required when storage is `file`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for ProofChainSection {
    fn default() -> Self {
        Self {
            enabled: true,
            algorithm: default_algorithm(),
            storage: StorageMode::Memory,
            path: None,
        }
    }
}

impl Config {
    /// Assessment cadence in sync ticks.
    ///
    /// Per SYNC.md §2: assessment runs every
    /// `max(1, round(sync_rate_hz / measurement_rate_hz))`-th tick, so equal
    /// rates assess on every sync.
    pub fn assess_interval(&self) -> u64 {
        let ratio = self.twin.sync_rate_hz / self.consciousness.measurement_rate_hz;
        (ratio.round() as u64).max(1)
    }

    /// Effective weight for every indicator, with omitted ones at 1.0
    pub fn indicator_weights(&self) -> BTreeMap<IndicatorKind, f64> {
        IndicatorKind::ALL
            .iter()
            .map(|kind| {
                let weight = self
                    .consciousness
                    .indicators
                    .get(kind)
                    .map(|spec| spec.weight)
                    .unwrap_or(1.0);
                (*kind, weight)
            })
            .collect()
    }

    /// Chain file path, when file storage is configured
    pub fn chain_path(&self) -> Option<&Path> {
        self.proof_chain.path.as_deref()
    }
}
