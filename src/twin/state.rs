//! Twin state emitted after each sync

use serde::{Deserialize, Serialize};

use crate::awareness::AwarenessLevel;

/// Round a value to the 4 decimals carried in twin states
pub(crate) fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

/// The twin's view of itself after one sync tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinState {
    /// Twin identifier
    pub twin_id: String,
    /// How closely the last prediction matched this snapshot, rounded to 4
    /// decimals
    pub sync_accuracy: f64,
    /// Predictive track record, rounded to 4 decimals
    pub prediction_accuracy: f64,
    /// Step anomalies detected in this snapshot
    pub anomalies_detected: u32,
    /// Awareness level from the most recent assessment
    pub consciousness_level: AwarenessLevel,
    /// Score from the most recent assessment, rounded to 4 decimals
    pub consciousness_score: f64,
    /// Proof hash from the most recent assessment; empty when the chain is
    /// disabled
    pub proof_hash: String,
    /// Whether this tick ran an assessment or carried the previous one
    pub measured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(0.5), 0.5);
        assert_eq!(round4(0.0), 0.0);
    }

    #[test]
    fn test_state_serializes_level_label() {
        let state = TwinState {
            twin_id: "DT-01".into(),
            sync_accuracy: 0.5,
            prediction_accuracy: 0.3,
            anomalies_detected: 0,
            consciousness_level: AwarenessLevel::C1Functional,
            consciousness_score: 0.35,
            proof_hash: String::new(),
            measured: true,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"C-1 Functional\""));

        let back: TwinState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
