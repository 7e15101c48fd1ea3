//! Capabilities the engine consumes from its embedder.

pub mod clock;
pub mod tokenizer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use tokenizer::{Token, Tokenizer};
