//! Physical snapshot structure
//!
//! One snapshot is the unit of synchronization: the observed state of the
//! physical device at a point in time. Sensor and actuator maps are ordered
//! (BTreeMap) so every downstream computation and serialization is
//! deterministic regardless of input key order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_health() -> f64 {
    1.0
}

/// Observed state of the physical device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSnapshot {
    /// Identifier of the physical device
    pub device_id: String,

    /// Named sensor readings
    #[serde(default)]
    pub sensors: BTreeMap<String, f64>,

    /// Named actuator positions
    #[serde(default)]
    pub actuators: BTreeMap<String, f64>,

    /// Device health in [0, 1]; absent means fully healthy
    #[serde(default = "default_health")]
    pub health: f64,

    /// Observation timestamp, RFC3339
    pub timestamp: String,
}

impl PhysicalSnapshot {
    /// Create an empty snapshot for the given device and timestamp
    pub fn new(device_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            sensors: BTreeMap::new(),
            actuators: BTreeMap::new(),
            health: 1.0,
            timestamp: timestamp.into(),
        }
    }

    /// Add a sensor reading (builder style)
    pub fn with_sensor(mut self, name: impl Into<String>, value: f64) -> Self {
        self.sensors.insert(name.into(), value);
        self
    }

    /// Add an actuator position (builder style)
    pub fn with_actuator(mut self, name: impl Into<String>, value: f64) -> Self {
        self.actuators.insert(name.into(), value);
        self
    }

    /// Set the health value (builder style)
    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health;
        self
    }
}
