//! Telemetry ingestion
//!
//! Snapshots of the physical device arrive as JSONL (one object per line)
//! from a file or stdin. The stream is strict: a malformed line aborts the
//! run with its line number.

mod errors;
mod reader;
mod snapshot;

pub use errors::{TelemetryError, TelemetryResult};
pub use reader::SnapshotReader;
pub use snapshot::PhysicalSnapshot;
