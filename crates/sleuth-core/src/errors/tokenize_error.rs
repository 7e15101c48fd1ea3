//! Tokenizer adapter errors.

use super::error_code::{self, ErrorCode};

/// Errors a `Tokenizer` implementation may report for one source text.
#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    #[error("Source is unreadable: {0}")]
    Unreadable(String),

    #[error("Invalid token at byte {offset}: {message}")]
    InvalidToken { offset: usize, message: String },

    #[error("Tokenizer failed: {0}")]
    Other(String),
}

impl ErrorCode for TokenizeError {
    fn error_code(&self) -> &'static str {
        error_code::TOKENIZE_ERROR
    }
}
