//! Arrival timestamps and the flagged set, kept together behind one lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use sleuth_core::types::collections::{FxHashMap, FxHashSet};
use sleuth_core::types::{Arrival, SubmissionId};

/// Per-submission bookkeeping shared by producers and the worker.
///
/// Producers write arrivals at enqueue time; the worker reads arrivals and
/// flips flags. A flag never goes back to unset.
#[derive(Debug, Default)]
pub struct Ledger {
    arrivals: FxHashMap<SubmissionId, Arrival>,
    flagged: FxHashSet<SubmissionId>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pre-existing submission with no real arrival time.
    pub fn record_seed(&mut self, id: SubmissionId) {
        self.arrivals.insert(id, Arrival::Seeded);
    }

    pub fn record_arrival(&mut self, id: SubmissionId, secs: i64) {
        self.arrivals.insert(id, Arrival::At(secs));
    }

    /// Arrival of `id`. Unknown ids read as seeds, which exempts them from
    /// cross-flagging.
    pub fn arrival(&self, id: SubmissionId) -> Arrival {
        self.arrivals.get(&id).copied().unwrap_or(Arrival::Seeded)
    }

    pub fn knows(&self, id: SubmissionId) -> bool {
        self.arrivals.contains_key(&id)
    }

    pub fn is_flagged(&self, id: SubmissionId) -> bool {
        self.flagged.contains(&id)
    }

    /// Mark `id` flagged. Returns false if it already was.
    pub fn mark_flagged(&mut self, id: SubmissionId) -> bool {
        self.flagged.insert(id)
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }
}

/// Lock the ledger. A panic while holding the lock cannot leave a half
/// written entry behind, so a poisoned lock is entered anyway.
pub fn lock_ledger(ledger: &Mutex<Ledger>) -> MutexGuard<'_, Ledger> {
    ledger.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_transitions_once() {
        let mut ledger = Ledger::new();
        let id = SubmissionId(7);
        assert!(!ledger.is_flagged(id));
        assert!(ledger.mark_flagged(id));
        assert!(!ledger.mark_flagged(id));
        assert!(ledger.is_flagged(id));
        assert_eq!(ledger.flagged_count(), 1);
    }

    #[test]
    fn seeds_and_unknown_ids_read_as_seeded() {
        let mut ledger = Ledger::new();
        ledger.record_seed(SubmissionId(1));
        ledger.record_arrival(SubmissionId(2), 0);
        assert_eq!(ledger.arrival(SubmissionId(1)), Arrival::Seeded);
        assert_eq!(ledger.arrival(SubmissionId(2)), Arrival::At(0));
        assert_eq!(ledger.arrival(SubmissionId(3)), Arrival::Seeded);
        assert!(!ledger.knows(SubmissionId(3)));
    }
}
