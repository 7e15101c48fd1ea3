//! Sleuth detection engine.
//!
//! A single background worker drains a FIFO intake queue, compares each new
//! submission against every stored one with the token matchers, applies
//! the flag policy, and appends the submission to the store.

pub mod checker;
pub mod intake;
pub mod matching;
pub mod pass;
pub mod policy;
pub mod stats;
pub mod store;

pub use checker::{CheckerBuilder, PlagiarismChecker};
pub use intake::WorkerState;
pub use stats::EngineStats;
