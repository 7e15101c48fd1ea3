//! Core types, traits, errors, config, events, and tracing for Sleuth.
//!
//! Everything the detection engine shares with its embedders lives here:
//! submissions and their identifiers, the tokenizer and clock capabilities,
//! the event/flag handler trait, and the layered configuration.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;
