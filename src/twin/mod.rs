//! Digital twin synchronization core
//!
//! The twin mirrors one physical device. Each sync tick ingests a snapshot,
//! scores the previous prediction, counts step anomalies, assesses
//! awareness on the configured cadence, and appends the assessment to the
//! proof chain.

mod anomaly;
mod errors;
mod predictor;
mod state;
mod sync;

pub use anomaly::{count_step_anomalies, STEP_THRESHOLD};
pub use errors::{TwinError, TwinResult};
pub use predictor::{predict_next, sync_accuracy, SensorPrediction};
pub use state::TwinState;
pub use sync::ConsciousTwin;
