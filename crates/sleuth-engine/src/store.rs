//! Append-only store of processed submissions.

use std::sync::{Arc, PoisonError, RwLock};

use sleuth_core::types::{Submission, SubmissionId};

/// Every submission whose comparison pass completed, in completion order.
///
/// Only the worker appends. Readers take snapshots, so a pass iterates a
/// stable corpus while outside callers keep reading.
#[derive(Debug, Default)]
pub struct SubmissionStore {
    entries: RwLock<Vec<Arc<Submission>>>,
}

impl SubmissionStore {
    pub fn new(seeds: Vec<Arc<Submission>>) -> Self {
        Self {
            entries: RwLock::new(seeds),
        }
    }

    /// Clone of the current corpus.
    pub fn snapshot(&self) -> Vec<Arc<Submission>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn append(&self, submission: Arc<Submission>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(submission);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids in store order.
    pub fn ids(&self) -> Vec<SubmissionId> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|s| s.id())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_unaffected_by_later_appends() {
        let store = SubmissionStore::new(vec![Arc::new(Submission::new(SubmissionId(1), "a"))]);
        let before = store.snapshot();
        store.append(Arc::new(Submission::new(SubmissionId(2), "b")));
        assert_eq!(before.len(), 1);
        assert_eq!(store.ids(), vec![SubmissionId(1), SubmissionId(2)]);
        assert!(!store.is_empty());
    }
}
