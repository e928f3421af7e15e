//! Awareness scoring and level classification
//!
//! Per SCORING.md §4:
//! - The score is the weight-normalized mean of the indicator values.
//! - Level thresholds are half-open ranges on the score and are fixed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::indicators::{IndicatorKind, IndicatorVector};

/// Awareness level bands, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AwarenessLevel {
    /// Score below 0.20
    C0Reactive,
    /// Score in [0.20, 0.50)
    C1Functional,
    /// Score in [0.50, 0.70)
    C2Emerging,
    /// Score in [0.70, 0.85)
    C3Autonomous,
    /// Score at or above 0.85
    C4Transcendent,
}

impl AwarenessLevel {
    /// Classify a score into its level band
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            AwarenessLevel::C4Transcendent
        } else if score >= 0.70 {
            AwarenessLevel::C3Autonomous
        } else if score >= 0.50 {
            AwarenessLevel::C2Emerging
        } else if score >= 0.20 {
            AwarenessLevel::C1Functional
        } else {
            AwarenessLevel::C0Reactive
        }
    }

    /// Returns the level label used in output and proof records
    pub fn as_str(&self) -> &'static str {
        match self {
            AwarenessLevel::C0Reactive => "C-0 Reactive",
            AwarenessLevel::C1Functional => "C-1 Functional",
            AwarenessLevel::C2Emerging => "C-2 Emerging",
            AwarenessLevel::C3Autonomous => "C-3 Autonomous",
            AwarenessLevel::C4Transcendent => "C-4 Transcendent",
        }
    }

    /// Numeric rank, 0 through 4
    pub fn rank(&self) -> u8 {
        match self {
            AwarenessLevel::C0Reactive => 0,
            AwarenessLevel::C1Functional => 1,
            AwarenessLevel::C2Emerging => 2,
            AwarenessLevel::C3Autonomous => 3,
            AwarenessLevel::C4Transcendent => 4,
        }
    }
}

impl fmt::Display for AwarenessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AwarenessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C-0 Reactive" => Ok(AwarenessLevel::C0Reactive),
            "C-1 Functional" => Ok(AwarenessLevel::C1Functional),
            "C-2 Emerging" => Ok(AwarenessLevel::C2Emerging),
            "C-3 Autonomous" => Ok(AwarenessLevel::C3Autonomous),
            "C-4 Transcendent" => Ok(AwarenessLevel::C4Transcendent),
            other => Err(format!("Unknown awareness level: '{}'", other)),
        }
    }
}

// Levels serialize as their labels so state output and proof records carry
// the human-readable band, not an enum discriminant.
impl Serialize for AwarenessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AwarenessLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// A completed awareness assessment
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Indicator values, each in [0, 1]
    pub indicators: IndicatorVector,
    /// Weight-normalized score
    pub score: f64,
    /// Level band for the score
    pub level: AwarenessLevel,
}

impl Assessment {
    /// Score an indicator vector against the configured weights.
    ///
    /// Indicators missing from the weight map weigh 1.0 (the unweighted
    /// mean is the all-weights-equal case). A zero weight sum cannot occur
    /// for validated configurations; it degrades to a zero score.
    pub fn from_indicators(
        indicators: IndicatorVector,
        weights: &BTreeMap<IndicatorKind, f64>,
    ) -> Self {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for (kind, value) in &indicators {
            let weight = weights.get(kind).copied().unwrap_or(1.0);
            weighted_sum += value * weight;
            weight_total += weight;
        }

        let score = if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            0.0
        };

        Self {
            indicators,
            score,
            level: AwarenessLevel::from_score(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_indicators(value: f64) -> IndicatorVector {
        IndicatorKind::ALL.iter().map(|k| (*k, value)).collect()
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(AwarenessLevel::from_score(0.0), AwarenessLevel::C0Reactive);
        assert_eq!(AwarenessLevel::from_score(0.19), AwarenessLevel::C0Reactive);
        assert_eq!(AwarenessLevel::from_score(0.20), AwarenessLevel::C1Functional);
        assert_eq!(AwarenessLevel::from_score(0.49), AwarenessLevel::C1Functional);
        assert_eq!(AwarenessLevel::from_score(0.50), AwarenessLevel::C2Emerging);
        assert_eq!(AwarenessLevel::from_score(0.69), AwarenessLevel::C2Emerging);
        assert_eq!(AwarenessLevel::from_score(0.70), AwarenessLevel::C3Autonomous);
        assert_eq!(AwarenessLevel::from_score(0.84), AwarenessLevel::C3Autonomous);
        assert_eq!(AwarenessLevel::from_score(0.85), AwarenessLevel::C4Transcendent);
        assert_eq!(AwarenessLevel::from_score(1.0), AwarenessLevel::C4Transcendent);
    }

    #[test]
    fn test_level_labels_roundtrip() {
        for level in [
            AwarenessLevel::C0Reactive,
            AwarenessLevel::C1Functional,
            AwarenessLevel::C2Emerging,
            AwarenessLevel::C3Autonomous,
            AwarenessLevel::C4Transcendent,
        ] {
            let parsed: AwarenessLevel = level.as_str().parse().unwrap();
            assert_eq!(parsed, level);
        }
        assert!("C-5 Divine".parse::<AwarenessLevel>().is_err());
    }

    #[test]
    fn test_level_serde_uses_labels() {
        let json = serde_json::to_string(&AwarenessLevel::C2Emerging).unwrap();
        assert_eq!(json, "\"C-2 Emerging\"");
        let back: AwarenessLevel = serde_json::from_str("\"C-4 Transcendent\"").unwrap();
        assert_eq!(back, AwarenessLevel::C4Transcendent);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(AwarenessLevel::C0Reactive < AwarenessLevel::C1Functional);
        assert!(AwarenessLevel::C3Autonomous < AwarenessLevel::C4Transcendent);
        assert_eq!(AwarenessLevel::C4Transcendent.rank(), 4);
    }

    #[test]
    fn test_unweighted_score_is_mean() {
        let assessment = Assessment::from_indicators(uniform_indicators(0.6), &BTreeMap::new());
        assert!((assessment.score - 0.6).abs() < 1e-12);
        assert_eq!(assessment.level, AwarenessLevel::C2Emerging);
    }

    #[test]
    fn test_weighted_score_normalizes_by_weight_sum() {
        let mut indicators = uniform_indicators(0.0);
        indicators.insert(IndicatorKind::Attention, 1.0);

        // Attention dominates with weight 4 against five weight-0 indicators
        let mut weights = BTreeMap::new();
        for kind in IndicatorKind::ALL {
            weights.insert(kind, 0.0);
        }
        weights.insert(IndicatorKind::Attention, 4.0);

        let assessment = Assessment::from_indicators(indicators, &weights);
        assert!((assessment.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_weights_default_to_one() {
        // A single configured weight must not zero out the others
        let mut weights = BTreeMap::new();
        weights.insert(IndicatorKind::Attention, 1.0);

        let assessment = Assessment::from_indicators(uniform_indicators(0.5), &weights);
        assert!((assessment.score - 0.5).abs() < 1e-12);
    }
}
