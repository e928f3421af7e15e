//! Awareness indicator computation
//!
//! Per SCORING.md, an assessment evaluates six indicators, each in [0, 1].
//! Two of them (situation awareness and prediction) come from the sync loop;
//! the four computed here are pure functions of the snapshot and the twin's
//! recent assessment history. All computations are deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::telemetry::PhysicalSnapshot;

/// The fixed indicator set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// How closely the predicted sensor state matched the observed one
    SituationAwareness,
    /// How much assessment history the twin has accumulated
    SelfMonitoring,
    /// How coherent the sensor readings are with each other
    Integration,
    /// How much predictive track record the twin has accumulated
    Prediction,
    /// How much of the device's health budget remains
    Attention,
    /// How stable recent scores have been
    Consistency,
}

impl IndicatorKind {
    /// All indicators in canonical order
    pub const ALL: [IndicatorKind; 6] = [
        IndicatorKind::SituationAwareness,
        IndicatorKind::SelfMonitoring,
        IndicatorKind::Integration,
        IndicatorKind::Prediction,
        IndicatorKind::Attention,
        IndicatorKind::Consistency,
    ];

    /// Returns the name used in configuration and output
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::SituationAwareness => "situation_awareness",
            IndicatorKind::SelfMonitoring => "self_monitoring",
            IndicatorKind::Integration => "integration",
            IndicatorKind::Prediction => "prediction",
            IndicatorKind::Attention => "attention",
            IndicatorKind::Consistency => "consistency",
        }
    }
}

/// One assessment's indicator values, keyed in canonical order
pub type IndicatorVector = BTreeMap<IndicatorKind, f64>;

/// Self-monitoring: saturates after ten completed assessments.
pub fn self_monitoring(prior_assessments: u64) -> f64 {
    (prior_assessments as f64 / 10.0).min(1.0)
}

/// Sensor integration: one minus the coefficient of variation of the
/// snapshot's sensor values, clamped to [0, 1].
///
/// Edge cases per SCORING.md §3: no sensors → 0.0, a single sensor → 0.3,
/// zero mean → 0.0.
pub fn sensor_integration(snapshot: &PhysicalSnapshot) -> f64 {
    let values: Vec<f64> = snapshot.sensors.values().copied().collect();
    if values.is_empty() {
        return 0.0;
    }
    if values.len() < 2 {
        return 0.3;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean == 0.0 {
        return 0.0;
    }

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let cv = variance.sqrt() / mean.abs();
    (1.0 - cv).clamp(0.0, 1.0)
}

/// Attention: tracks device health, clamped to [0, 1].
pub fn attention_focus(health: f64) -> f64 {
    health.clamp(0.0, 1.0)
}

/// Behavioral consistency: inverse variance of the last five scores.
///
/// With fewer than three prior scores there is no track record to judge,
/// so the indicator sits at the neutral 0.5.
pub fn behavioral_consistency(prior_scores: &[f64]) -> f64 {
    if prior_scores.len() < 3 {
        return 0.5;
    }

    let recent = &prior_scores[prior_scores.len().saturating_sub(5)..];
    let mean = recent.iter().sum::<f64>() / recent.len() as f64;
    let variance = recent.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / recent.len() as f64;
    (1.0 - variance * 10.0).max(0.0)
}
