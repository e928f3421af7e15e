//! oriontwin - A strict, deterministic digital twin runtime
//!
//! A digital twin that mirrors a physical device from telemetry snapshots,
//! measures its own awareness from a fixed indicator set, and records every
//! measurement in a SHA-256 proof chain.

pub mod awareness;
pub mod cli;
pub mod config;
pub mod observability;
pub mod proof;
pub mod telemetry;
pub mod twin;
