//! Intake queue and the single background worker.
//!
//! Producers push onto an unbounded crossbeam channel, which never blocks.
//! One dedicated thread receives in FIFO order and runs each submission's
//! comparison pass to completion before taking the next.

pub mod commands;
pub mod state;
pub mod worker;

pub use commands::IntakeCommand;
pub use state::WorkerState;
pub(crate) use worker::WorkerContext;
