//! Who gets flagged, and when.

use std::sync::{Arc, Mutex};

use sleuth_core::events::types::{FlagEvent, FlagReason, FlagRecord};
use sleuth_core::events::EventDispatcher;
use sleuth_core::types::{OwnerRole, Submission, SubmissionId};

use super::ledger::{lock_ledger, Ledger};

/// Applies flag decisions for one comparison pass.
///
/// Decisions are taken and recorded under the ledger lock; owner hooks run
/// after the lock is released so a handler may query the engine.
pub struct FlagPolicy<'a> {
    ledger: &'a Mutex<Ledger>,
    events: &'a EventDispatcher,
    proximity_secs: i64,
}

impl<'a> FlagPolicy<'a> {
    pub fn new(ledger: &'a Mutex<Ledger>, events: &'a EventDispatcher, proximity_secs: i64) -> Self {
        Self {
            ledger,
            events,
            proximity_secs,
        }
    }

    /// Flag after `incoming` matched the stored `existing`.
    ///
    /// Nothing happens once `incoming` is already flagged. Otherwise its
    /// owners are notified. `existing` is notified too when both arrivals
    /// are real, closer than the proximity threshold, and `existing` is not
    /// yet flagged. Seeds are never cross-flagged.
    pub fn flag_pair(
        &self,
        existing: &Arc<Submission>,
        incoming: &Arc<Submission>,
        reason: FlagReason,
    ) -> Vec<FlagRecord> {
        let (flag_incoming, flag_existing) = {
            let mut ledger = lock_ledger(self.ledger);
            if ledger.is_flagged(incoming.id()) {
                return Vec::new();
            }
            let flag_incoming = incoming.has_owner() && ledger.mark_flagged(incoming.id());

            let existing_arrival = ledger.arrival(existing.id());
            let flag_existing = existing_arrival
                .within(ledger.arrival(incoming.id()), self.proximity_secs)
                && existing.has_owner()
                && !ledger.is_flagged(existing.id());
            if flag_existing {
                ledger.mark_flagged(existing.id());
            }
            (flag_incoming, flag_existing)
        };

        let mut records = Vec::with_capacity(2);
        if flag_incoming {
            records.push(self.notify_owners(incoming, reason, Some(existing.id())));
        }
        if flag_existing {
            records.push(self.notify_owners(existing, FlagReason::CrossFlag, Some(incoming.id())));
        }
        records
    }

    /// Flag `incoming` for patchwork copying unless it is already flagged.
    pub fn flag_patchwork(&self, incoming: &Arc<Submission>) -> Option<FlagRecord> {
        let newly_flagged = {
            let mut ledger = lock_ledger(self.ledger);
            incoming.has_owner() && ledger.mark_flagged(incoming.id())
        };
        newly_flagged.then(|| self.notify_owners(incoming, FlagReason::Patchwork, None))
    }

    fn notify_owners(
        &self,
        submission: &Arc<Submission>,
        reason: FlagReason,
        counterpart: Option<SubmissionId>,
    ) -> FlagRecord {
        let mut notified = Vec::with_capacity(2);
        for role in [OwnerRole::Student, OwnerRole::Professor] {
            let Some(owner) = submission.owner(role) else {
                continue;
            };
            tracing::info!(
                submission = %submission.id(),
                owner = %owner,
                role = role.name(),
                ?reason,
                counterpart = ?counterpart,
                "flagging owner"
            );
            self.events.emit_flag(&FlagEvent {
                submission: Arc::clone(submission),
                owner: owner.clone(),
                role,
                reason,
                counterpart,
            });
            notified.push(role);
        }
        FlagRecord {
            submission_id: submission.id(),
            reason,
            counterpart,
            notified,
        }
    }
}
