//! The intake worker loop.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crossbeam_channel::Receiver;
use sleuth_core::config::DetectionThresholds;
use sleuth_core::errors::{panic_message, EngineError, ErrorCode};
use sleuth_core::events::types::{FlagReason, PassFailedEvent};
use sleuth_core::events::EventDispatcher;
use sleuth_core::traits::Tokenizer;
use sleuth_core::types::Submission;

use super::commands::IntakeCommand;
use super::state::{StateCell, WorkerState};
use crate::pass;
use crate::policy::{FlagPolicy, Ledger};
use crate::stats::StatsCounters;
use crate::store::SubmissionStore;

/// State shared between the checker handle (producers) and the worker.
pub(crate) struct WorkerContext {
    pub(crate) thresholds: DetectionThresholds,
    pub(crate) tokenizer: Arc<dyn Tokenizer>,
    pub(crate) ledger: Mutex<Ledger>,
    pub(crate) store: SubmissionStore,
    pub(crate) events: EventDispatcher,
    pub(crate) stats: StatsCounters,
    pub(crate) state: StateCell,
}

/// Drain `intake` until shutdown is requested or every sender is gone,
/// then finish anything still queued and stop.
pub(crate) fn run(ctx: Arc<WorkerContext>, intake: Receiver<IntakeCommand>) {
    tracing::info!(corpus_size = ctx.store.len(), "intake worker started");

    while let Ok(IntakeCommand::Submit(submission)) = intake.recv() {
        process(&ctx, submission);
    }

    ctx.state.set(WorkerState::Draining);
    let mut drained = 0usize;
    while let Ok(command) = intake.try_recv() {
        if let IntakeCommand::Submit(submission) = command {
            process(&ctx, submission);
            drained += 1;
        }
    }

    ctx.state.set(WorkerState::Stopped);
    tracing::info!(
        drained,
        corpus_size = ctx.store.len(),
        "intake worker stopped"
    );
}

/// Run one submission's pass. Failures are contained here so the worker
/// keeps serving the queue.
fn process(ctx: &WorkerContext, submission: Arc<Submission>) {
    let started = Instant::now();
    let corpus = ctx.store.snapshot();
    tracing::debug!(
        submission = %submission.id(),
        corpus_size = corpus.len(),
        "comparison pass started"
    );

    let evaluated = catch_unwind(AssertUnwindSafe(|| {
        pass::evaluate(&submission, &corpus, ctx.tokenizer.as_ref(), &ctx.thresholds)
    }))
    .unwrap_or_else(|panic| {
        Err(EngineError::WorkerPanicked {
            message: panic_message(panic.as_ref()),
        })
    });

    let verdict = match evaluated {
        Ok(verdict) => verdict,
        Err(error) => {
            fail(ctx, &submission, &error);
            return;
        }
    };

    let policy = FlagPolicy::new(&ctx.ledger, &ctx.events, ctx.thresholds.proximity_secs);
    let flags = pass::apply(&verdict, &submission, &policy);
    for record in &flags {
        ctx.stats
            .record_flag(record.notified.len(), record.reason == FlagReason::Patchwork);
    }

    ctx.store.append(Arc::clone(&submission));
    ctx.stats.record_processed();

    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let report = verdict.into_report(&submission, flags, duration_ms);
    tracing::info!(
        submission = %submission.id(),
        corpus_size = report.compared,
        skipped = report.skipped,
        pattern_total = report.pattern_total,
        distinct_offsets = report.distinct_offsets,
        flags_raised = report.flags.len(),
        pass_duration_ms = report.duration_ms,
        "comparison pass complete"
    );
    ctx.events.emit_pass_complete(&report);
}

fn fail(ctx: &WorkerContext, submission: &Submission, error: &EngineError) {
    ctx.stats.record_failed();
    tracing::warn!(
        submission = %submission.id(),
        error_code = error.error_code(),
        error = %error,
        "comparison pass failed, submission skipped"
    );
    ctx.events.emit_pass_failed(&PassFailedEvent {
        submission_id: submission.id(),
        error_code: error.error_code(),
        message: error.to_string(),
    });
}
