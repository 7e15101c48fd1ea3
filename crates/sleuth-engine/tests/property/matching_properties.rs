use proptest::prelude::*;
use sleuth_core::traits::Token;
use sleuth_core::types::collections::FxHashSet;
use sleuth_engine::matching::{count_pattern_matches, has_exact_run};

/// Small alphabet, negative codes included, so shared runs actually occur.
fn tokens(max_len: usize) -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec(-2i32..2, 0..max_len)
}

proptest! {
    #[test]
    fn pattern_count_never_exceeds_cap(
        existing in tokens(120),
        incoming in tokens(120),
        window in 1usize..6,
        cap in 1usize..12,
    ) {
        let mut offsets = FxHashSet::default();
        let count = count_pattern_matches(&existing, &incoming, window, cap, &mut offsets);
        prop_assert!(count <= cap);
        prop_assert!(offsets.len() <= count);
    }

    #[test]
    fn offsets_point_at_full_windows(
        existing in tokens(80),
        incoming in tokens(80),
        window in 1usize..6,
    ) {
        let mut offsets = FxHashSet::default();
        count_pattern_matches(&existing, &incoming, window, 50, &mut offsets);
        for &offset in &offsets {
            prop_assert!(offset + window <= incoming.len());
            let run = &incoming[offset..offset + window];
            prop_assert!(existing.windows(window).any(|w| w == run));
        }
    }

    #[test]
    fn exact_run_is_symmetric(
        a in tokens(60),
        b in tokens(60),
        run_length in 1usize..8,
    ) {
        prop_assert_eq!(
            has_exact_run(&a, &b, run_length),
            has_exact_run(&b, &a, run_length)
        );
    }

    #[test]
    fn sequence_shares_runs_with_itself(a in tokens(60), run_length in 1usize..8) {
        prop_assert_eq!(has_exact_run(&a, &a, run_length), a.len() >= run_length);
    }

    #[test]
    fn shorter_runs_follow_from_longer(
        a in tokens(60),
        b in tokens(60),
        run_length in 2usize..8,
    ) {
        if has_exact_run(&a, &b, run_length) {
            prop_assert!(has_exact_run(&a, &b, run_length - 1));
        }
    }

    #[test]
    fn exact_run_implies_a_pattern_match(
        a in tokens(60),
        b in tokens(60),
        run_length in 1usize..8,
        window in 1usize..8,
    ) {
        prop_assume!(window <= run_length);
        if has_exact_run(&a, &b, run_length) {
            let mut offsets = FxHashSet::default();
            prop_assert!(count_pattern_matches(&a, &b, window, 10, &mut offsets) >= 1);
        }
    }
}
