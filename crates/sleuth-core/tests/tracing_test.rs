//! Tests for tracing setup.

use sleuth_core::tracing::init_tracing;

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!(corpus_size = 0usize, "tracing initialized twice");
}
