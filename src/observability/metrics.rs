//! Metrics registry for oriontwin
//!
//! Per OBSERVABILITY.md:
//! - Counters only (no gauges, no histograms)
//! - Monotonic increase
//! - Reset only on process start
//! - Thread-safe but lock-minimal

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics registry containing all operational counters.
///
/// All counters use atomic operations with Relaxed ordering; exact
/// cross-thread visibility ordering is not required for counters.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Snapshots applied through sync
    syncs_applied: AtomicU64,
    /// Awareness assessments completed
    assessments_completed: AtomicU64,
    /// Total anomalies detected across all syncs
    anomalies_detected: AtomicU64,
    /// Proof records appended to the chain
    proofs_appended: AtomicU64,
    /// Awareness level changes between consecutive assessments
    level_transitions: AtomicU64,
    /// Chain verification runs
    verify_runs: AtomicU64,
    /// Chain verification failures
    verify_failures: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment snapshots applied
    pub fn increment_syncs(&self) {
        self.syncs_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment assessments completed
    pub fn increment_assessments(&self) {
        self.assessments_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Add detected anomalies
    pub fn add_anomalies(&self, count: u64) {
        self.anomalies_detected.fetch_add(count, Ordering::Relaxed);
    }

    /// Increment proof records appended
    pub fn increment_proofs(&self) {
        self.proofs_appended.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment awareness level transitions
    pub fn increment_level_transitions(&self) {
        self.level_transitions.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment verification runs
    pub fn increment_verify_runs(&self) {
        self.verify_runs.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment verification failures
    pub fn increment_verify_failures(&self) {
        self.verify_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            syncs_applied: self.syncs_applied.load(Ordering::Relaxed),
            assessments_completed: self.assessments_completed.load(Ordering::Relaxed),
            anomalies_detected: self.anomalies_detected.load(Ordering::Relaxed),
            proofs_appended: self.proofs_appended.load(Ordering::Relaxed),
            level_transitions: self.level_transitions.load(Ordering::Relaxed),
            verify_runs: self.verify_runs.load(Ordering::Relaxed),
            verify_failures: self.verify_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub syncs_applied: u64,
    pub assessments_completed: u64,
    pub anomalies_detected: u64,
    pub proofs_appended: u64,
    pub level_transitions: u64,
    pub verify_runs: u64,
    pub verify_failures: u64,
}

impl MetricsSnapshot {
    /// Render counters as log fields with deterministic values
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("syncs_applied", self.syncs_applied.to_string()),
            (
                "assessments_completed",
                self.assessments_completed.to_string(),
            ),
            ("anomalies_detected", self.anomalies_detected.to_string()),
            ("proofs_appended", self.proofs_appended.to_string()),
            ("level_transitions", self.level_transitions.to_string()),
            ("verify_runs", self.verify_runs.to_string()),
            ("verify_failures", self.verify_failures.to_string()),
        ]
    }
}
