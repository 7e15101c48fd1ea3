//! Event payload types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::{Arrival, OwnerId, OwnerRole, Submission, SubmissionId};

/// Why a submission was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagReason {
    /// Shares an exact token run with a stored submission.
    ExactRun,
    /// Reached the per-pair pattern match cap against a stored submission.
    PatternMatches,
    /// Stored submission flagged because a close-in-time arrival matched it.
    CrossFlag,
    /// Many small matches pooled across the whole store.
    Patchwork,
}

/// Payload for `on_student_flagged` / `on_professor_flagged`.
#[derive(Debug, Clone)]
pub struct FlagEvent {
    pub submission: Arc<Submission>,
    pub owner: OwnerId,
    pub role: OwnerRole,
    pub reason: FlagReason,
    /// The other side of a pairwise match. `None` for patchwork flags.
    pub counterpart: Option<SubmissionId>,
}

/// Payload for `on_submission_queued`.
#[derive(Debug, Clone)]
pub struct SubmissionQueuedEvent {
    pub submission_id: SubmissionId,
    pub arrival: Arrival,
    pub queue_depth: usize,
}

/// One flagging action taken during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    pub submission_id: SubmissionId,
    pub reason: FlagReason,
    pub counterpart: Option<SubmissionId>,
    pub notified: Vec<OwnerRole>,
}

/// Payload for `on_pass_complete`: the outcome of comparing one new
/// submission against the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub submission_id: Option<SubmissionId>,
    /// Stored submissions compared against.
    pub compared: usize,
    /// Stored submissions skipped because their source failed to tokenize.
    pub skipped: usize,
    /// Pairs that shared an exact token run.
    pub exact_run_hits: usize,
    /// Pairs whose pattern count reached the cap.
    pub pattern_hits: usize,
    /// Pattern matches summed over pairs without an exact run.
    pub pattern_total: usize,
    /// Distinct offsets in the new submission touched by pattern matches.
    pub distinct_offsets: usize,
    pub patchwork: bool,
    pub flags: Vec<FlagRecord>,
    pub duration_ms: u64,
}

impl PassReport {
    /// True when this pass flagged `id`.
    pub fn flagged(&self, id: SubmissionId) -> bool {
        self.flags.iter().any(|f| f.submission_id == id)
    }
}

/// Payload for `on_pass_failed`.
#[derive(Debug, Clone)]
pub struct PassFailedEvent {
    pub submission_id: SubmissionId,
    pub error_code: &'static str,
    pub message: String,
}
