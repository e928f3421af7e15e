//! Consciousness theory tags
//!
//! The configuration lists which theoretical framings a deployment claims to
//! draw on. Tags are validated against the known set; they carry no
//! computation of their own and are recorded for provenance only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Known theory tags accepted in `consciousness.theories`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Theory {
    /// Global workspace theory
    #[serde(rename = "GWT")]
    Gwt,
    /// Integrated information theory
    #[serde(rename = "IIT")]
    Iit,
    /// Recurrent processing theory
    #[serde(rename = "RPT")]
    Rpt,
    /// Higher-order thought theory
    #[serde(rename = "HOT")]
    Hot,
    /// Attention schema theory
    #[serde(rename = "AST")]
    Ast,
}

impl Theory {
    /// Returns the tag string used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Theory::Gwt => "GWT",
            Theory::Iit => "IIT",
            Theory::Rpt => "RPT",
            Theory::Hot => "HOT",
            Theory::Ast => "AST",
        }
    }
}

impl fmt::Display for Theory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GWT" => Ok(Theory::Gwt),
            "IIT" => Ok(Theory::Iit),
            "RPT" => Ok(Theory::Rpt),
            "HOT" => Ok(Theory::Hot),
            "AST" => Ok(Theory::Ast),
            other => Err(format!("Unknown theory tag: '{}'", other)),
        }
    }
}
