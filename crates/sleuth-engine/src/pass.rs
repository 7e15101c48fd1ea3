//! One comparison pass: a new submission against the whole store.
//!
//! Matching runs to completion before any flag is raised, so a pass that
//! fails part-way (tokenizer error) leaves no flags behind. Only the new
//! submission's tokens can fail a pass: a stored submission that no longer
//! tokenizes is skipped for that pair.

use std::sync::Arc;

use sleuth_core::config::DetectionThresholds;
use sleuth_core::errors::EngineError;
use sleuth_core::events::types::{FlagReason, FlagRecord, PassReport};
use sleuth_core::traits::{Token, Tokenizer};
use sleuth_core::types::collections::FxHashSet;
use sleuth_core::types::Submission;

use crate::matching::{count_pattern_matches, has_exact_run};
use crate::policy::FlagPolicy;

/// A stored submission the incoming one matched strongly enough to flag.
#[derive(Debug, Clone)]
pub struct PairMatch {
    pub existing: Arc<Submission>,
    pub reason: FlagReason,
}

/// Everything a pass found, before flags are applied.
#[derive(Debug, Default)]
pub struct PassVerdict {
    pub matches: Vec<PairMatch>,
    pub compared: usize,
    pub skipped: usize,
    pub exact_run_hits: usize,
    pub pattern_hits: usize,
    pub pattern_total: usize,
    pub distinct_offsets: usize,
    pub patchwork: bool,
}

/// Compare `incoming` against every submission in `corpus`, in order.
///
/// A pair sharing an exact run is recorded and contributes nothing to the
/// pattern total. Every other pair adds its (capped) pattern count to the
/// total and its offsets to one set pooled over the whole corpus. Offsets
/// index into `incoming`, so the pool measures how much of the new work is
/// covered by fragments found anywhere in the store.
pub fn evaluate(
    incoming: &Submission,
    corpus: &[Arc<Submission>],
    tokenizer: &dyn Tokenizer,
    thresholds: &DetectionThresholds,
) -> Result<PassVerdict, EngineError> {
    let incoming_tokens = tokenize(tokenizer, incoming)?;
    let mut offsets = FxHashSet::default();
    let mut verdict = PassVerdict::default();

    for existing in corpus {
        let existing_tokens = match tokenize(tokenizer, existing) {
            Ok(tokens) => tokens,
            Err(error) => {
                tracing::warn!(
                    submission = %incoming.id(),
                    stored = %existing.id(),
                    error = %error,
                    "stored submission failed to tokenize, pair skipped"
                );
                verdict.skipped += 1;
                continue;
            }
        };
        verdict.compared += 1;

        if has_exact_run(&existing_tokens, &incoming_tokens, thresholds.exact_run_length) {
            verdict.exact_run_hits += 1;
            verdict.matches.push(PairMatch {
                existing: Arc::clone(existing),
                reason: FlagReason::ExactRun,
            });
            continue;
        }

        let count = count_pattern_matches(
            &existing_tokens,
            &incoming_tokens,
            thresholds.pattern_length,
            thresholds.pattern_cap,
            &mut offsets,
        );
        if count >= thresholds.pattern_cap {
            verdict.pattern_hits += 1;
            verdict.matches.push(PairMatch {
                existing: Arc::clone(existing),
                reason: FlagReason::PatternMatches,
            });
        }
        verdict.pattern_total += count;
    }

    verdict.distinct_offsets = offsets.len();
    verdict.patchwork = verdict.pattern_total >= thresholds.patchwork_threshold
        && verdict.distinct_offsets >= thresholds.patchwork_threshold;
    Ok(verdict)
}

/// Raise the flags a verdict calls for, pairwise matches first in store
/// order, then the patchwork rule.
pub fn apply(
    verdict: &PassVerdict,
    incoming: &Arc<Submission>,
    policy: &FlagPolicy<'_>,
) -> Vec<FlagRecord> {
    let mut flags = Vec::new();
    for pair in &verdict.matches {
        flags.extend(policy.flag_pair(&pair.existing, incoming, pair.reason));
    }
    if verdict.patchwork {
        flags.extend(policy.flag_patchwork(incoming));
    }
    flags
}

impl PassVerdict {
    pub fn into_report(
        self,
        incoming: &Submission,
        flags: Vec<FlagRecord>,
        duration_ms: u64,
    ) -> PassReport {
        PassReport {
            submission_id: Some(incoming.id()),
            compared: self.compared,
            skipped: self.skipped,
            exact_run_hits: self.exact_run_hits,
            pattern_hits: self.pattern_hits,
            pattern_total: self.pattern_total,
            distinct_offsets: self.distinct_offsets,
            patchwork: self.patchwork,
            flags,
            duration_ms,
        }
    }
}

fn tokenize(tokenizer: &dyn Tokenizer, submission: &Submission) -> Result<Vec<Token>, EngineError> {
    tokenizer
        .tokenize(submission.source())
        .map_err(|source| EngineError::Tokenize {
            submission: submission.id(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use sleuth_core::errors::TokenizeError;
    use sleuth_core::types::{SourceText, SubmissionId};

    use super::*;

    fn numeric(source: &SourceText) -> Result<Vec<Token>, TokenizeError> {
        source
            .as_str()
            .split_whitespace()
            .map(|t| t.parse().map_err(|_| TokenizeError::Other(t.to_string())))
            .collect()
    }

    fn submission(id: u64, tokens: impl IntoIterator<Item = Token>) -> Arc<Submission> {
        let text = tokens
            .into_iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Arc::new(Submission::new(SubmissionId(id), text))
    }

    #[test]
    fn exact_run_pairs_skip_pattern_total() {
        let corpus = vec![submission(1, 1..=80)];
        let incoming = submission(2, 1..=80);
        let verdict = evaluate(&incoming, &corpus, &numeric, &DetectionThresholds::default()).unwrap();
        assert_eq!(verdict.exact_run_hits, 1);
        assert_eq!(verdict.pattern_total, 0);
        assert_eq!(verdict.matches[0].reason, FlagReason::ExactRun);
        assert!(!verdict.patchwork);
    }

    #[test]
    fn fragments_from_many_sources_pool_into_patchwork() {
        // Each source shares two distinct 15-token fragments with the incoming work.
        let incoming = submission(100, 1..=600);
        let corpus: Vec<_> = (0..10)
            .map(|k: Token| {
                let base = k * 60 + 1;
                let mut tokens: Vec<Token> = (base..base + 15).collect();
                tokens.push(9_000 + k);
                tokens.extend(base + 30..base + 45);
                submission(u64::try_from(k).unwrap(), tokens)
            })
            .collect();
        let verdict = evaluate(&incoming, &corpus, &numeric, &DetectionThresholds::default()).unwrap();
        assert_eq!(verdict.pattern_total, 20);
        assert_eq!(verdict.distinct_offsets, 20);
        assert_eq!(verdict.pattern_hits, 0);
        assert!(verdict.matches.is_empty());
        assert!(verdict.patchwork);
    }

    #[test]
    fn incoming_tokenizer_failure_fails_the_pass() {
        let corpus = vec![submission(1, 1..=20)];
        let incoming = Arc::new(Submission::new(SubmissionId(2), "1 2 oops"));
        let err = evaluate(&incoming, &corpus, &numeric, &DetectionThresholds::default()).unwrap_err();
        match err {
            EngineError::Tokenize { submission, .. } => assert_eq!(submission, SubmissionId(2)),
            other => panic!("expected Tokenize, got {other:?}"),
        }
    }

    #[test]
    fn untokenizable_stored_submission_is_skipped() {
        let corpus = vec![
            Arc::new(Submission::new(SubmissionId(1), "1 2 oops")),
            submission(2, 1..=80),
        ];
        let incoming = submission(3, 1..=80);
        let verdict = evaluate(&incoming, &corpus, &numeric, &DetectionThresholds::default()).unwrap();
        assert_eq!(verdict.skipped, 1);
        assert_eq!(verdict.compared, 1);
        assert_eq!(verdict.exact_run_hits, 1);
        assert_eq!(verdict.matches[0].existing.id(), SubmissionId(2));
    }
}
