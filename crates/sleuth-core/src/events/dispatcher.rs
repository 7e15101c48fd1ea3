//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::DetectionEventHandler;
use super::types::*;
use crate::errors::panic_message;
use crate::types::OwnerRole;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn DetectionEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn DetectionEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not prevent later handlers
    /// from receiving the event.
    fn emit<F: Fn(&dyn DetectionEventHandler)>(&self, event: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if let Err(panic) = result {
                tracing::warn!(
                    event,
                    panic = %panic_message(panic.as_ref()),
                    "event handler panicked"
                );
            }
        }
    }

    // ---- Owner hooks ----
    pub fn emit_flag(&self, event: &FlagEvent) {
        match event.role {
            OwnerRole::Student => self.emit("student_flagged", |h| h.on_student_flagged(event)),
            OwnerRole::Professor => {
                self.emit("professor_flagged", |h| h.on_professor_flagged(event))
            }
        }
    }

    // ---- Intake ----
    pub fn emit_submission_queued(&self, event: &SubmissionQueuedEvent) {
        self.emit("submission_queued", |h| h.on_submission_queued(event));
    }

    // ---- Comparison passes ----
    pub fn emit_pass_complete(&self, report: &PassReport) {
        self.emit("pass_complete", |h| h.on_pass_complete(report));
    }

    pub fn emit_pass_failed(&self, event: &PassFailedEvent) {
        self.emit("pass_failed", |h| h.on_pass_failed(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
