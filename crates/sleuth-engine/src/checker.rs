//! PlagiarismChecker, the engine handle producers talk to.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use sleuth_core::config::{DetectionThresholds, SleuthConfig};
use sleuth_core::constants::DEFAULT_WORKER_THREAD_NAME;
use sleuth_core::errors::{panic_message, EngineError};
use sleuth_core::events::types::SubmissionQueuedEvent;
use sleuth_core::events::{DetectionEventHandler, EventDispatcher};
use sleuth_core::traits::{Clock, SystemClock, Tokenizer};
use sleuth_core::types::{Arrival, Submission, SubmissionId};

use crate::intake::state::StateCell;
use crate::intake::{worker, IntakeCommand, WorkerContext, WorkerState};
use crate::policy::ledger::lock_ledger;
use crate::policy::Ledger;
use crate::stats::{EngineStats, StatsCounters};
use crate::store::SubmissionStore;

/// Asynchronous plagiarism checker.
///
/// `add_submission` records the arrival time and enqueues; a dedicated
/// worker thread compares each queued submission against every stored one
/// in FIFO order, raises flags through the registered handlers, and appends
/// it to the store. Dropping the checker (or calling `shutdown`) finishes
/// everything already queued before the worker exits.
///
/// The handle is `Sync`: any number of threads may submit concurrently.
pub struct PlagiarismChecker {
    ctx: Arc<WorkerContext>,
    clock: Arc<dyn Clock>,
    origin_secs: i64,
    intake: Option<Sender<IntakeCommand>>,
    worker: Option<JoinHandle<()>>,
}

/// Builder for [`PlagiarismChecker`].
pub struct CheckerBuilder {
    tokenizer: Arc<dyn Tokenizer>,
    thresholds: DetectionThresholds,
    thread_name: String,
    seeds: Vec<Submission>,
    clock: Option<Arc<dyn Clock>>,
    events: EventDispatcher,
}

impl CheckerBuilder {
    fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            tokenizer,
            thresholds: DetectionThresholds::default(),
            thread_name: DEFAULT_WORKER_THREAD_NAME.to_string(),
            seeds: Vec::new(),
            clock: None,
            events: EventDispatcher::new(),
        }
    }

    /// Take thresholds and the worker thread name from a resolved config.
    pub fn config(mut self, config: &SleuthConfig) -> Self {
        self.thresholds = config.detection.thresholds();
        self.thread_name = config.worker.effective_thread_name();
        self
    }

    pub fn thresholds(mut self, thresholds: DetectionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Add a pre-existing submission. Seeds start in the store, unflagged,
    /// with no real arrival time.
    pub fn seed(mut self, submission: Submission) -> Self {
        self.seeds.push(submission);
        self
    }

    pub fn seeds(mut self, submissions: impl IntoIterator<Item = Submission>) -> Self {
        self.seeds.extend(submissions);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Register a handler for owner hooks and pass events.
    pub fn handler(mut self, handler: Arc<dyn DetectionEventHandler>) -> Self {
        self.events.register(handler);
        self
    }

    /// Validate thresholds and start the worker thread.
    pub fn build(self) -> Result<PlagiarismChecker, EngineError> {
        self.thresholds.validate()?;

        let mut ledger = Ledger::new();
        let seeds: Vec<Arc<Submission>> = self
            .seeds
            .into_iter()
            .map(|submission| {
                ledger.record_seed(submission.id());
                Arc::new(submission)
            })
            .collect();

        let ctx = Arc::new(WorkerContext {
            thresholds: self.thresholds,
            tokenizer: self.tokenizer,
            ledger: Mutex::new(ledger),
            store: SubmissionStore::new(seeds),
            events: self.events,
            stats: StatsCounters::default(),
            state: StateCell::new(WorkerState::Running),
        });

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock::new()) as Arc<dyn Clock>);
        let origin_secs = clock.now_secs();

        let (tx, rx) = crossbeam_channel::unbounded();
        let worker_ctx = Arc::clone(&ctx);
        let worker = std::thread::Builder::new()
            .name(self.thread_name)
            .spawn(move || worker::run(worker_ctx, rx))
            .map_err(|e| EngineError::WorkerSpawn {
                message: e.to_string(),
            })?;

        Ok(PlagiarismChecker {
            ctx,
            clock,
            origin_secs,
            intake: Some(tx),
            worker: Some(worker),
        })
    }
}

impl PlagiarismChecker {
    pub fn builder(tokenizer: Arc<dyn Tokenizer>) -> CheckerBuilder {
        CheckerBuilder::new(tokenizer)
    }

    /// Empty checker with default thresholds.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Result<Self, EngineError> {
        Self::builder(tokenizer).build()
    }

    /// Checker whose store starts with `seeds`.
    pub fn with_seeds(
        tokenizer: Arc<dyn Tokenizer>,
        seeds: impl IntoIterator<Item = Submission>,
    ) -> Result<Self, EngineError> {
        Self::builder(tokenizer).seeds(seeds).build()
    }

    /// Queue a submission for checking. Returns as soon as it is enqueued;
    /// outcomes are observed only through the registered handlers.
    ///
    /// The arrival time is recorded and the submission queued under the
    /// ledger lock, so concurrent producers get arrivals in queue order.
    pub fn add_submission(&self, submission: Submission) -> Result<(), EngineError> {
        let intake = self.intake.as_ref().ok_or(EngineError::WorkerGone)?;
        let id = submission.id();
        let secs = self.clock.now_secs().saturating_sub(self.origin_secs);

        let queue_depth = {
            let mut ledger = lock_ledger(&self.ctx.ledger);
            ledger.record_arrival(id, secs);
            intake
                .send(IntakeCommand::Submit(Arc::new(submission)))
                .map_err(|_| EngineError::WorkerGone)?;
            intake.len()
        };

        tracing::debug!(submission = %id, arrival_secs = secs, queue_depth, "submission queued");
        self.ctx.events.emit_submission_queued(&SubmissionQueuedEvent {
            submission_id: id,
            arrival: Arrival::At(secs),
            queue_depth,
        });
        Ok(())
    }

    pub fn is_flagged(&self, id: SubmissionId) -> bool {
        lock_ledger(&self.ctx.ledger).is_flagged(id)
    }

    /// Recorded arrival of `id`, `None` if the checker never saw it.
    pub fn arrival(&self, id: SubmissionId) -> Option<Arrival> {
        let ledger = lock_ledger(&self.ctx.ledger);
        ledger.knows(id).then(|| ledger.arrival(id))
    }

    /// Ids in the store, in processing order.
    pub fn processed_ids(&self) -> Vec<SubmissionId> {
        self.ctx.store.ids()
    }

    pub fn corpus_len(&self) -> usize {
        self.ctx.store.len()
    }

    /// Submissions queued but not yet picked up by the worker.
    pub fn queue_depth(&self) -> usize {
        self.intake.as_ref().map_or(0, |tx| tx.len())
    }

    pub fn state(&self) -> WorkerState {
        self.ctx.state.get()
    }

    pub fn thresholds(&self) -> DetectionThresholds {
        self.ctx.thresholds
    }

    pub fn stats(&self) -> EngineStats {
        self.ctx.stats.snapshot()
    }

    /// Stop accepting work, finish everything queued, and join the worker.
    pub fn shutdown(mut self) -> Result<EngineStats, EngineError> {
        self.stop_worker()?;
        Ok(self.stats())
    }

    fn stop_worker(&mut self) -> Result<(), EngineError> {
        if let Some(intake) = self.intake.take() {
            // A send error means the worker already exited; join reports why.
            let _ = intake.send(IntakeCommand::Shutdown);
        }
        if let Some(handle) = self.worker.take() {
            handle.join().map_err(|panic| EngineError::WorkerPanicked {
                message: panic_message(panic.as_ref()),
            })?;
        }
        Ok(())
    }
}

impl Drop for PlagiarismChecker {
    fn drop(&mut self) {
        if let Err(e) = self.stop_worker() {
            tracing::error!(error = %e, "intake worker did not shut down cleanly");
        }
    }
}

impl std::fmt::Debug for PlagiarismChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlagiarismChecker")
            .field("state", &self.state())
            .field("corpus_len", &self.corpus_len())
            .field("queue_depth", &self.queue_depth())
            .field("thresholds", &self.ctx.thresholds)
            .finish()
    }
}
