//! The conscious digital twin
//!
//! Per SYNC.md, one sync tick:
//! 1. rejects snapshots from the wrong device
//! 2. scores the previous prediction against the observed snapshot
//! 3. counts step anomalies against the previous snapshot
//! 4. on measurement ticks, runs an awareness assessment and appends a
//!    proof record
//! 5. predicts the next snapshot
//!
//! All state lives in this struct; the same snapshot stream always produces
//! the same states and the same proof hashes.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::awareness::{
    attention_focus, behavioral_consistency, self_monitoring, sensor_integration, Assessment,
    AwarenessLevel, IndicatorKind, IndicatorVector,
};
use crate::config::Config;
use crate::observability::MetricsRegistry;
use crate::proof::ChainWriter;
use crate::telemetry::PhysicalSnapshot;

use super::anomaly::count_step_anomalies;
use super::errors::{TwinError, TwinResult};
use super::predictor::{predict_next, sync_accuracy, SensorPrediction};
use super::state::{round4, TwinState};

/// Retained snapshots; only the most recent one feeds any computation
const HISTORY_CAP: usize = 256;

/// Retained assessment scores; consistency reads the last five
const SCORE_CAP: usize = 16;

/// A digital twin that measures its own awareness
pub struct ConsciousTwin {
    twin_id: String,
    physical_id: String,
    weights: std::collections::BTreeMap<IndicatorKind, f64>,
    assess_interval: u64,

    history: VecDeque<PhysicalSnapshot>,
    snapshots_seen: u64,
    prior_scores: VecDeque<f64>,
    assessments: u64,
    last_prediction: Option<SensorPrediction>,
    last_measurement: Option<(f64, AwarenessLevel, String)>,
    ticks: u64,

    chain: ChainWriter,
    metrics: Arc<MetricsRegistry>,
}

impl ConsciousTwin {
    /// Create a twin from a validated configuration
    pub fn new(config: &Config, chain: ChainWriter, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            twin_id: config.twin.name.clone(),
            physical_id: config.twin.physical_id.clone(),
            weights: config.indicator_weights(),
            assess_interval: config.assess_interval(),
            history: VecDeque::new(),
            snapshots_seen: 0,
            prior_scores: VecDeque::new(),
            assessments: 0,
            last_prediction: None,
            last_measurement: None,
            ticks: 0,
            chain,
            metrics,
        }
    }

    /// Twin identifier
    pub fn twin_id(&self) -> &str {
        &self.twin_id
    }

    /// Number of completed assessments
    pub fn assessments(&self) -> u64 {
        self.assessments
    }

    /// The proof chain writer (read access for summaries)
    pub fn chain(&self) -> &ChainWriter {
        &self.chain
    }

    /// Synchronize with one snapshot and return the resulting twin state
    pub fn sync(&mut self, snapshot: PhysicalSnapshot) -> TwinResult<TwinState> {
        if snapshot.device_id != self.physical_id {
            return Err(TwinError::DeviceMismatch {
                expected: self.physical_id.clone(),
                actual: snapshot.device_id,
            });
        }

        self.ticks += 1;
        self.snapshots_seen += 1;

        let accuracy = sync_accuracy(self.last_prediction.as_ref(), &snapshot);

        let prediction_accuracy = if self.snapshots_seen < 3 {
            0.3
        } else {
            (self.snapshots_seen as f64 / 20.0).min(1.0)
        };

        let (anomalies, next_prediction) = {
            let previous = self.history.back();
            (
                count_step_anomalies(&snapshot, previous),
                predict_next(&snapshot, previous),
            )
        };

        // Measurement cadence: tick 1 always assesses, then every Nth tick
        let measured = (self.ticks - 1) % self.assess_interval == 0;

        let (score, level, proof_hash) = if measured {
            let assessment = self.assess(&snapshot, accuracy, prediction_accuracy);

            let record = self.chain.append(
                &snapshot.timestamp,
                assessment.score,
                assessment.level,
                anomalies,
            )?;
            let proof_hash = record.map(|r| r.hash).unwrap_or_default();
            if !proof_hash.is_empty() {
                self.metrics.increment_proofs();
            }

            if let Some((_, previous_level, _)) = &self.last_measurement {
                if *previous_level != assessment.level {
                    self.metrics.increment_level_transitions();
                }
            }

            let score = round4(assessment.score);
            self.prior_scores.push_back(score);
            if self.prior_scores.len() > SCORE_CAP {
                self.prior_scores.pop_front();
            }
            self.assessments += 1;
            self.metrics.increment_assessments();
            self.last_measurement = Some((score, assessment.level, proof_hash.clone()));

            (score, assessment.level, proof_hash)
        } else {
            match &self.last_measurement {
                Some((score, level, hash)) => (*score, *level, hash.clone()),
                // Unreachable in practice: tick 1 always measures
                None => (0.0, AwarenessLevel::C0Reactive, String::new()),
            }
        };

        self.last_prediction = Some(next_prediction);
        self.history.push_back(snapshot);
        if self.history.len() > HISTORY_CAP {
            self.history.pop_front();
        }

        self.metrics.increment_syncs();
        self.metrics.add_anomalies(anomalies as u64);

        Ok(TwinState {
            twin_id: self.twin_id.clone(),
            sync_accuracy: round4(accuracy),
            prediction_accuracy: round4(prediction_accuracy),
            anomalies_detected: anomalies,
            consciousness_level: level,
            consciousness_score: score,
            proof_hash,
            measured,
        })
    }

    /// Evaluate the six indicators and score them
    fn assess(
        &self,
        snapshot: &PhysicalSnapshot,
        accuracy: f64,
        prediction_accuracy: f64,
    ) -> Assessment {
        let prior: Vec<f64> = self.prior_scores.iter().copied().collect();

        let mut indicators = IndicatorVector::new();
        indicators.insert(IndicatorKind::SituationAwareness, accuracy);
        indicators.insert(
            IndicatorKind::SelfMonitoring,
            self_monitoring(self.assessments),
        );
        indicators.insert(IndicatorKind::Integration, sensor_integration(snapshot));
        indicators.insert(IndicatorKind::Prediction, prediction_accuracy);
        indicators.insert(
            IndicatorKind::Attention,
            attention_focus(snapshot.health),
        );
        indicators.insert(
            IndicatorKind::Consistency,
            behavioral_consistency(&prior),
        );

        Assessment::from_indicators(indicators, &self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::verify_records;

    fn test_config(yaml: &str) -> Config {
        Config::from_yaml(yaml).unwrap()
    }

    fn per_tick_config() -> Config {
        test_config(
            r#"
twin:
  name: DT-01
  physical_id: dev-01
  sync_rate_hz: 10
consciousness:
  measurement_rate_hz: 10
"#,
        )
    }

    fn twin_with(config: &Config) -> ConsciousTwin {
        ConsciousTwin::new(
            config,
            ChainWriter::in_memory(&config.twin.name),
            Arc::new(MetricsRegistry::new()),
        )
    }

    fn snapshot_at(tick: u64, pairs: &[(&str, f64)]) -> PhysicalSnapshot {
        let mut s = PhysicalSnapshot::new("dev-01", format!("2026-01-01T00:00:{:02}Z", tick));
        for (name, value) in pairs {
            s.sensors.insert((*name).to_string(), *value);
        }
        s
    }

    #[test]
    fn test_rejects_wrong_device() {
        let config = per_tick_config();
        let mut twin = twin_with(&config);

        let mut snapshot = snapshot_at(0, &[("a", 1.0)]);
        snapshot.device_id = "someone-elses-robot".into();

        let err = twin.sync(snapshot).unwrap_err();
        assert_eq!(err.code(), "ORION_TWIN_DEVICE_MISMATCH");
        assert_eq!(twin.assessments(), 0);
    }

    #[test]
    fn test_first_tick_defaults() {
        let config = per_tick_config();
        let mut twin = twin_with(&config);

        let state = twin.sync(snapshot_at(0, &[("a", 1.0), ("b", 1.1)])).unwrap();

        // No prediction yet, no track record yet
        assert_eq!(state.sync_accuracy, 0.5);
        assert_eq!(state.prediction_accuracy, 0.3);
        assert_eq!(state.anomalies_detected, 0);
        assert!(state.measured);
        assert!(!state.proof_hash.is_empty());
    }

    #[test]
    fn test_steady_stream_raises_score() {
        let config = per_tick_config();
        let mut twin = twin_with(&config);

        let mut first_score = None;
        let mut last_score = 0.0;
        for tick in 0..20 {
            let state = twin
                .sync(snapshot_at(tick, &[("a", 1.0), ("b", 1.05), ("c", 0.95)]))
                .unwrap();
            first_score.get_or_insert(state.consciousness_score);
            last_score = state.consciousness_score;
        }

        assert!(last_score > first_score.unwrap());
        assert_eq!(twin.assessments(), 20);
    }

    #[test]
    fn test_anomaly_counted_on_step() {
        let config = per_tick_config();
        let mut twin = twin_with(&config);

        twin.sync(snapshot_at(0, &[("a", 1.0)])).unwrap();
        let state = twin.sync(snapshot_at(1, &[("a", 2.0)])).unwrap();
        assert_eq!(state.anomalies_detected, 1);
    }

    #[test]
    fn test_chain_grows_with_assessments() {
        let config = per_tick_config();
        let mut twin = twin_with(&config);

        for tick in 0..5 {
            twin.sync(snapshot_at(tick, &[("a", 1.0)])).unwrap();
        }

        let records = twin.chain().records().unwrap().to_vec();
        assert_eq!(records.len(), 5);
        verify_records(&records).unwrap();
    }

    #[test]
    fn test_measurement_cadence() {
        let config = test_config(
            r#"
twin:
  name: DT-01
  physical_id: dev-01
  sync_rate_hz: 30
consciousness:
  measurement_rate_hz: 10
"#,
        );
        assert_eq!(config.assess_interval(), 3);
        let mut twin = twin_with(&config);

        let mut measured_ticks = Vec::new();
        for tick in 0..9 {
            let state = twin.sync(snapshot_at(tick, &[("a", 1.0)])).unwrap();
            if state.measured {
                measured_ticks.push(tick);
            }
        }

        assert_eq!(measured_ticks, vec![0, 3, 6]);
        assert_eq!(twin.assessments(), 3);

        // Non-measurement ticks carry the previous assessment forward
        let carried = twin.sync(snapshot_at(9, &[("a", 1.0)])).unwrap();
        assert!(carried.measured);
        let idle = twin.sync(snapshot_at(10, &[("a", 1.0)])).unwrap();
        assert!(!idle.measured);
        assert_eq!(idle.consciousness_score, carried.consciousness_score);
        assert_eq!(idle.proof_hash, carried.proof_hash);
    }

    #[test]
    fn test_disabled_chain_leaves_hash_empty() {
        let config = per_tick_config();
        let mut twin = ConsciousTwin::new(
            &config,
            ChainWriter::disabled(&config.twin.name),
            Arc::new(MetricsRegistry::new()),
        );

        let state = twin.sync(snapshot_at(0, &[("a", 1.0)])).unwrap();
        assert!(state.measured);
        assert!(state.proof_hash.is_empty());
    }

    #[test]
    fn test_metrics_track_sync_loop() {
        let config = per_tick_config();
        let metrics = Arc::new(MetricsRegistry::new());
        let mut twin = ConsciousTwin::new(
            &config,
            ChainWriter::in_memory(&config.twin.name),
            Arc::clone(&metrics),
        );

        twin.sync(snapshot_at(0, &[("a", 1.0)])).unwrap();
        twin.sync(snapshot_at(1, &[("a", 2.0)])).unwrap();

        let snap = metrics.snapshot();
        assert_eq!(snap.syncs_applied, 2);
        assert_eq!(snap.assessments_completed, 2);
        assert_eq!(snap.proofs_appended, 2);
        assert_eq!(snap.anomalies_detected, 1);
    }
}
