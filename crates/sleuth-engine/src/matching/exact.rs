//! Exact-run detection.

use sleuth_core::traits::Token;

/// True iff some run of exactly `run_length` tokens in `existing` also
/// appears contiguously in `incoming`.
///
/// Brute force over every pair of start offsets, stopping at the first hit.
/// A zero `run_length` never matches.
pub fn has_exact_run(existing: &[Token], incoming: &[Token], run_length: usize) -> bool {
    if run_length == 0 || existing.len() < run_length || incoming.len() < run_length {
        return false;
    }
    existing
        .windows(run_length)
        .any(|run| incoming.windows(run_length).any(|other| run == other))
}
