//! Tokenizer capability.

use crate::errors::TokenizeError;
use crate::types::SourceText;

/// A single normalized token code. Codes may be negative.
pub type Token = i32;

/// Turns source text into an ordered sequence of token codes.
///
/// Normalization (whitespace, identifier renaming) is entirely the
/// tokenizer's business; the engine compares codes verbatim. The engine
/// calls this once per submission per comparison pass and caches nothing.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, source: &SourceText) -> Result<Vec<Token>, TokenizeError>;
}

impl<F> Tokenizer for F
where
    F: Fn(&SourceText) -> Result<Vec<Token>, TokenizeError> + Send + Sync,
{
    fn tokenize(&self, source: &SourceText) -> Result<Vec<Token>, TokenizeError> {
        self(source)
    }
}
