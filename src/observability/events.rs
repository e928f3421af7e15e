//! Observability events for oriontwin
//!
//! Per OBSERVABILITY.md, this module defines all observable lifecycle
//! events. Events are explicit and typed.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & configuration
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Data directory initialized
    InitComplete,

    // Proof chain
    /// Proof chain opened (mode and resume point in fields)
    ChainOpened,
    /// Chain corruption detected (FATAL)
    ChainCorruption,

    // Run loop
    /// Sync loop started
    RunStart,
    /// Sync loop complete
    RunComplete,

    // Simulation
    /// Simulation started
    SimulateStart,
    /// Simulation complete
    SimulateComplete,

    // Verification
    /// Chain verification started
    VerifyStart,
    /// Chain verification complete
    VerifyComplete,
}

impl Event {
    /// Returns the event name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::InitComplete => "INIT_COMPLETE",
            Event::ChainOpened => "CHAIN_OPENED",
            Event::ChainCorruption => "CHAIN_CORRUPTION",
            Event::RunStart => "RUN_START",
            Event::RunComplete => "RUN_COMPLETE",
            Event::SimulateStart => "SIMULATE_START",
            Event::SimulateComplete => "SIMULATE_COMPLETE",
            Event::VerifyStart => "VERIFY_START",
            Event::VerifyComplete => "VERIFY_COMPLETE",
        }
    }

    /// Whether this event indicates an unrecoverable condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ChainCorruption)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        for event in [
            Event::ConfigLoaded,
            Event::ChainOpened,
            Event::RunStart,
            Event::VerifyComplete,
        ] {
            let name = event.as_str();
            assert!(name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_only_corruption_is_fatal() {
        assert!(Event::ChainCorruption.is_fatal());
        assert!(!Event::RunComplete.is_fatal());
        assert!(!Event::VerifyComplete.is_fatal());
    }
}
