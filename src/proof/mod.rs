//! SHA-256 proof chain
//!
//! Every awareness assessment appends one hash-linked record, so the
//! measurement history of a twin can be verified after the fact: any edit
//! to a durable record breaks either its own hash or the next record's
//! linkage. See CHAIN.md for the record format and append rules.

mod errors;
mod reader;
mod record;
mod verifier;
mod writer;

pub use errors::{ChainError, ChainErrorCode, ChainResult, Severity};
pub use reader::{read_chain_file, ChainReader};
pub use record::{round_score, ProofRecord, GENESIS_PREV_HASH};
pub use verifier::{verify_chain_file, verify_records, ChainSummary};
pub use writer::ChainWriter;
