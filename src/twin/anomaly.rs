//! Step anomaly detection
//!
//! A sensor that moves more than the step threshold between two consecutive
//! snapshots counts as one anomaly. Sensors appearing or disappearing
//! between snapshots are not anomalies; only shared keys are compared.

use crate::telemetry::PhysicalSnapshot;

/// Absolute per-tick delta above which a sensor counts as anomalous
pub const STEP_THRESHOLD: f64 = 0.5;

/// Count step anomalies between the previous and current snapshot.
///
/// With no previous snapshot there is nothing to compare against.
pub fn count_step_anomalies(
    current: &PhysicalSnapshot,
    previous: Option<&PhysicalSnapshot>,
) -> u32 {
    let previous = match previous {
        Some(p) => p,
        None => return 0,
    };

    let mut anomalies = 0;
    for (name, value) in &current.sensors {
        if let Some(prev_value) = previous.sensors.get(name) {
            if (value - prev_value).abs() > STEP_THRESHOLD {
                anomalies += 1;
            }
        }
    }
    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, f64)]) -> PhysicalSnapshot {
        let mut s = PhysicalSnapshot::new("dev-1", "2026-01-01T00:00:00Z");
        for (name, value) in pairs {
            s.sensors.insert((*name).to_string(), *value);
        }
        s
    }

    #[test]
    fn test_first_snapshot_has_no_anomalies() {
        let current = snapshot(&[("a", 100.0)]);
        assert_eq!(count_step_anomalies(&current, None), 0);
    }

    #[test]
    fn test_small_changes_are_not_anomalous() {
        let previous = snapshot(&[("a", 1.0), ("b", 2.0)]);
        let current = snapshot(&[("a", 1.4), ("b", 1.6)]);
        assert_eq!(count_step_anomalies(&current, Some(&previous)), 0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let previous = snapshot(&[("a", 1.0)]);
        let current = snapshot(&[("a", 1.5)]);
        assert_eq!(count_step_anomalies(&current, Some(&previous)), 0);

        let current = snapshot(&[("a", 1.501)]);
        assert_eq!(count_step_anomalies(&current, Some(&previous)), 1);
    }

    #[test]
    fn test_counts_each_jumping_sensor() {
        let previous = snapshot(&[("a", 0.0), ("b", 0.0), ("c", 0.0)]);
        let current = snapshot(&[("a", 1.0), ("b", -1.0), ("c", 0.2)]);
        assert_eq!(count_step_anomalies(&current, Some(&previous)), 2);
    }

    #[test]
    fn test_new_sensors_are_not_anomalous() {
        let previous = snapshot(&[("a", 0.0)]);
        let current = snapshot(&[("a", 0.1), ("brand_new", 99.0)]);
        assert_eq!(count_step_anomalies(&current, Some(&previous)), 0);
    }
}
