//! Event system for Sleuth.
//! Trait with no-op defaults, synchronous dispatch, zero overhead when empty.
//!
//! Owner flag hooks are events too: `on_student_flagged` and
//! `on_professor_flagged` are how an embedder learns that a submission's
//! owners must be notified.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::DetectionEventHandler;
