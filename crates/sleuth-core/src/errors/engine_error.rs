//! Detection engine errors.

use super::error_code::{self, ErrorCode};
use super::{ConfigError, TokenizeError};
use crate::types::SubmissionId;

/// Errors raised by the intake worker and the comparison pass.
///
/// Per-submission failures (`Tokenize`) never stop the worker; they are
/// logged and reported through `on_pass_failed`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to spawn intake worker: {message}")]
    WorkerSpawn { message: String },

    #[error("Intake worker is no longer accepting submissions")]
    WorkerGone,

    #[error("Intake worker panicked: {message}")]
    WorkerPanicked { message: String },

    #[error("Tokenizing submission {submission} failed: {source}")]
    Tokenize {
        submission: SubmissionId,
        #[source]
        source: TokenizeError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::WorkerSpawn { .. } => error_code::WORKER_SPAWN_FAILED,
            Self::WorkerGone => error_code::WORKER_GONE,
            Self::WorkerPanicked { .. } => error_code::WORKER_PANICKED,
            Self::Tokenize { source, .. } => source.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
