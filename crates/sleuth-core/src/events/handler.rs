//! DetectionEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling detection events.
///
/// Handlers only override what they care about. `Send + Sync` is required
/// because the worker thread invokes them.
pub trait DetectionEventHandler: Send + Sync {
    // ---- Owner hooks ----
    fn on_student_flagged(&self, _event: &FlagEvent) {}
    fn on_professor_flagged(&self, _event: &FlagEvent) {}

    // ---- Intake ----
    fn on_submission_queued(&self, _event: &SubmissionQueuedEvent) {}

    // ---- Comparison passes ----
    fn on_pass_complete(&self, _report: &PassReport) {}
    fn on_pass_failed(&self, _event: &PassFailedEvent) {}
}
