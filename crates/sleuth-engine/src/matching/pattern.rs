//! Capped short-pattern counting.

use sleuth_core::traits::Token;
use sleuth_core::types::collections::FxHashSet;

/// Count runs of `window` tokens shared by `existing` and `incoming`.
///
/// Each hit records its start offset in `incoming` into `offsets` and moves
/// both scan positions past the consumed run, so overlapping repeats of the
/// same region count once. Counting stops as soon as `cap` is reached and
/// `cap` is returned: a result equal to `cap` means "at least `cap`".
///
/// `offsets` is owned by the caller so one set can be pooled across every
/// pair compared for the same incoming submission.
pub fn count_pattern_matches(
    existing: &[Token],
    incoming: &[Token],
    window: usize,
    cap: usize,
    offsets: &mut FxHashSet<usize>,
) -> usize {
    if window == 0 || cap == 0 || existing.len() < window || incoming.len() < window {
        return 0;
    }

    let mut count = 0;
    let mut i = 0;
    while i + window <= existing.len() {
        let mut j = 0;
        while j + window <= incoming.len() {
            if existing[i..i + window] == incoming[j..j + window] {
                offsets.insert(j);
                count += 1;
                if count >= cap {
                    return count;
                }
                i += window - 1;
                j += window - 1;
                // The run consumed the rest of `existing`.
                if i + window > existing.len() {
                    break;
                }
            }
            j += 1;
        }
        i += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(start: Token, len: Token) -> Vec<Token> {
        (start..start + len).collect()
    }

    #[test]
    fn identical_sequences_count_one_match_per_window() {
        let tokens = ramp(1, 45);
        let mut offsets = FxHashSet::default();
        let count = count_pattern_matches(&tokens, &tokens, 15, 10, &mut offsets);
        assert_eq!(count, 3);
        let mut seen: Vec<usize> = offsets.into_iter().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 15, 30]);
    }

    #[test]
    fn saturates_at_cap() {
        let tokens = ramp(1, 15 * 12);
        let mut offsets = FxHashSet::default();
        let count = count_pattern_matches(&tokens, &tokens, 15, 10, &mut offsets);
        assert_eq!(count, 10);
        assert_eq!(offsets.len(), 10);
    }

    #[test]
    fn disjoint_sequences_match_nothing() {
        let mut offsets = FxHashSet::default();
        let count = count_pattern_matches(&ramp(1, 100), &ramp(1000, 100), 15, 10, &mut offsets);
        assert_eq!(count, 0);
        assert!(offsets.is_empty());
    }

    #[test]
    fn run_at_end_of_existing_stops_scanning() {
        let block = ramp(1, 15);
        let mut incoming = block.clone();
        incoming.extend(block.iter().copied());
        incoming.extend(block.iter().copied());
        let mut offsets = FxHashSet::default();
        let count = count_pattern_matches(&block, &incoming, 15, 10, &mut offsets);
        assert_eq!(count, 1);
        assert!(offsets.contains(&0));
    }

    #[test]
    fn offsets_pool_across_calls() {
        let incoming = ramp(1, 60);
        let first = ramp(1, 15);
        let second = ramp(31, 15);
        let mut offsets = FxHashSet::default();
        assert_eq!(count_pattern_matches(&first, &incoming, 15, 10, &mut offsets), 1);
        assert_eq!(count_pattern_matches(&second, &incoming, 15, 10, &mut offsets), 1);
        // Same region again does not grow the pool.
        assert_eq!(count_pattern_matches(&first, &incoming, 15, 10, &mut offsets), 1);
        let mut seen: Vec<usize> = offsets.into_iter().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 30]);
    }

    #[test]
    fn short_inputs_and_degenerate_parameters() {
        let mut offsets = FxHashSet::default();
        assert_eq!(count_pattern_matches(&ramp(1, 14), &ramp(1, 14), 15, 10, &mut offsets), 0);
        assert_eq!(count_pattern_matches(&ramp(1, 30), &ramp(1, 30), 0, 10, &mut offsets), 0);
        assert_eq!(count_pattern_matches(&ramp(1, 30), &ramp(1, 30), 15, 0, &mut offsets), 0);
        assert!(offsets.is_empty());
    }
}
