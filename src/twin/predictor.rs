//! Next-state prediction and sync accuracy
//!
//! Per SYNC.md §3, the predictor extrapolates each sensor half a step along
//! its last observed trend. Sync accuracy then measures how close the
//! previous prediction landed: per shared sensor, `1 - min(1, |error|)`,
//! averaged.

use std::collections::BTreeMap;

use crate::telemetry::PhysicalSnapshot;

/// Damping applied to the per-sensor trend when extrapolating
const TREND_DAMPING: f64 = 0.5;

/// Predicted sensor values for the next snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SensorPrediction {
    /// Predicted value per sensor name
    pub sensors: BTreeMap<String, f64>,
}

/// Predict the next snapshot's sensor values.
///
/// With no previous snapshot the prediction is the current reading; a
/// sensor absent from the previous snapshot is treated as trendless.
pub fn predict_next(
    current: &PhysicalSnapshot,
    previous: Option<&PhysicalSnapshot>,
) -> SensorPrediction {
    let mut sensors = BTreeMap::new();

    for (name, value) in &current.sensors {
        let predicted = match previous {
            Some(prev) => {
                let prev_value = prev.sensors.get(name).copied().unwrap_or(*value);
                let trend = value - prev_value;
                value + trend * TREND_DAMPING
            }
            None => *value,
        };
        sensors.insert(name.clone(), predicted);
    }

    SensorPrediction { sensors }
}

/// Score the previous prediction against the observed snapshot.
///
/// No prediction yet → the neutral 0.5. Sensors are compared only where
/// prediction and observation share a key; no shared keys → 0.0.
pub fn sync_accuracy(prediction: Option<&SensorPrediction>, snapshot: &PhysicalSnapshot) -> f64 {
    let prediction = match prediction {
        Some(p) => p,
        None => return 0.5,
    };

    let mut errors = Vec::new();
    for (name, predicted) in &prediction.sensors {
        if let Some(actual) = snapshot.sensors.get(name) {
            let error = (predicted - actual).abs();
            errors.push(1.0 - error.min(1.0));
        }
    }

    errors.iter().sum::<f64>() / errors.len().max(1) as f64
}
