//! Messages on the intake channel.

use std::sync::Arc;

use sleuth_core::types::Submission;

/// Work items for the intake worker.
#[derive(Debug)]
pub enum IntakeCommand {
    /// Compare against the store, flag, then append.
    Submit(Arc<Submission>),
    /// Finish whatever is still queued, then exit.
    Shutdown,
}
