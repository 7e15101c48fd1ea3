//! Engine counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Snapshot of engine counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Submissions whose pass completed and that joined the store.
    pub processed: u64,
    /// Submissions whose pass failed; they never join the store.
    pub failed: u64,
    /// Distinct submissions flagged.
    pub submissions_flagged: u64,
    /// Owner hooks invoked (one per role per flagged submission).
    pub owner_notifications: u64,
    /// Flags raised by the patchwork rule.
    pub patchwork_flags: u64,
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    processed: AtomicU64,
    failed: AtomicU64,
    submissions_flagged: AtomicU64,
    owner_notifications: AtomicU64,
    patchwork_flags: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_flag(&self, notifications: usize, patchwork: bool) {
        self.submissions_flagged.fetch_add(1, Ordering::Relaxed);
        self.owner_notifications
            .fetch_add(notifications as u64, Ordering::Relaxed);
        if patchwork {
            self.patchwork_flags.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> EngineStats {
        EngineStats {
            processed: self.processed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            submissions_flagged: self.submissions_flagged.load(Ordering::Relaxed),
            owner_notifications: self.owner_notifications.load(Ordering::Relaxed),
            patchwork_flags: self.patchwork_flags.load(Ordering::Relaxed),
        }
    }
}
