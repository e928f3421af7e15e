//! Awareness measurement for the digital twin
//!
//! Per SCORING.md, an assessment turns one synchronized snapshot plus the
//! twin's recent history into six indicator values, a weighted score, and a
//! level band (C-0 Reactive through C-4 Transcendent). All functions here
//! are pure and deterministic; the sync loop in `twin` drives them.

mod indicators;
mod score;
mod theories;

pub use indicators::{
    attention_focus, behavioral_consistency, self_monitoring, sensor_integration, IndicatorKind,
    IndicatorVector,
};
pub use score::{Assessment, AwarenessLevel};
pub use theories::Theory;
