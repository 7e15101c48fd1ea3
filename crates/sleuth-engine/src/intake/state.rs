//! Worker lifecycle state.

use std::sync::atomic::{AtomicU8, Ordering};

use serde::Serialize;

/// Lifecycle of the intake worker.
///
/// `Running` from construction, `Draining` once shutdown was requested and
/// queued submissions are being finished, `Stopped` after the thread exits
/// its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    Running,
    Draining,
    Stopped,
}

#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new(state: WorkerState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    pub(crate) fn get(&self) -> WorkerState {
        match self.0.load(Ordering::Acquire) {
            0 => WorkerState::Running,
            1 => WorkerState::Draining,
            _ => WorkerState::Stopped,
        }
    }

    pub(crate) fn set(&self, state: WorkerState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_through_cell() {
        let cell = StateCell::new(WorkerState::Running);
        for state in [WorkerState::Draining, WorkerState::Stopped, WorkerState::Running] {
            cell.set(state);
            assert_eq!(cell.get(), state);
        }
    }
}
