//! Scorer trait and shared scoring types.

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

use crate::scoring::context::{DocumentMetadata, ScoringContext};
use crate::scoring::explain::{ScoreExplain, Scored};
use crate::scoring::result::{AggregateResult, ResultNode};

/// Name of the default, max-frequency normalized TF-IDF scorer.
pub const DEFAULT_SCORER_NAME: &str = "TFIDF";
/// Name of the document-length normalized TF-IDF scorer.
pub const TFIDF_DOCNORM_SCORER_NAME: &str = "TFIDF.DOCNORM";
/// Name of the BM25 scorer.
pub const BM25_SCORER_NAME: &str = "BM25";
/// Name of the DisMax-style scorer.
pub const DISMAX_SCORER_NAME: &str = "DISMAX";
/// Name of the raw document score scorer.
pub const DOCSCORE_SCORER_NAME: &str = "DOCSCORE";
/// Name of the Hamming distance payload scorer.
pub const HAMMING_SCORER_NAME: &str = "HAMMING";

/// What the caller should do with a scored document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "score", rename_all = "snake_case")]
pub enum ScoreOutcome {
    /// Keep the document with this score. A score of 0 is legitimate.
    Included(f64),
    /// Drop the document from the result set.
    Excluded,
}

/// The outcome of one top-level scorer call plus its optional explanation.
///
/// The caller owns the returned explanation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Score or exclusion.
    pub outcome: ScoreOutcome,

    /// Explanation, present only when the context requested it.
    pub explain: Option<ScoreExplain>,
}

impl ScoreResult {
    /// An included document.
    pub fn included(score: f64, explain: Option<ScoreExplain>) -> Self {
        ScoreResult {
            outcome: ScoreOutcome::Included(score),
            explain,
        }
    }

    /// An excluded document.
    pub fn excluded(explain: Option<ScoreExplain>) -> Self {
        ScoreResult {
            outcome: ScoreOutcome::Excluded,
            explain,
        }
    }

    /// The score, or `None` when the document is excluded.
    pub fn score(&self) -> Option<f64> {
        match self.outcome {
            ScoreOutcome::Included(score) => Some(score),
            ScoreOutcome::Excluded => None,
        }
    }

    /// Whether the scorer asked for the document to be dropped.
    pub fn is_excluded(&self) -> bool {
        self.outcome == ScoreOutcome::Excluded
    }
}

impl From<Scored> for ScoreResult {
    fn from(scored: Scored) -> Self {
        ScoreResult::included(scored.value, scored.explain)
    }
}

/// A ranking algorithm.
///
/// Implementations must be deterministic and must not mutate the result tree.
/// `min_score` is a pruning threshold: once a scorer knows its value stays
/// below it, it may return 0 early.
pub trait Scorer: Send + Sync + Debug {
    /// Score one candidate document.
    fn score(
        &self,
        ctx: &ScoringContext,
        result: &ResultNode,
        dmd: &DocumentMetadata,
        min_score: f64,
    ) -> ScoreResult;

    /// Get the name of this scorer.
    fn name(&self) -> &str;
}

/// A scorer backed by a closure.
///
/// Any private data the scorer needs is captured by the closure and released
/// when the scorer is dropped.
pub struct FnScorer<F> {
    name: String,
    func: F,
}

impl<F> FnScorer<F>
where
    F: Fn(&ScoringContext, &ResultNode, &DocumentMetadata, f64) -> ScoreResult + Send + Sync,
{
    /// Wrap a closure as a named scorer.
    pub fn new<S: Into<String>>(name: S, func: F) -> Self {
        FnScorer {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnScorer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnScorer").field("name", &self.name).finish()
    }
}

impl<F> Scorer for FnScorer<F>
where
    F: Fn(&ScoringContext, &ResultNode, &DocumentMetadata, f64) -> ScoreResult + Send + Sync,
{
    fn score(
        &self,
        ctx: &ScoringContext,
        result: &ResultNode,
        dmd: &DocumentMetadata,
        min_score: f64,
    ) -> ScoreResult {
        (self.func)(ctx, result, dmd, min_score)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Score every child of an aggregate and combine the values with the
/// aggregate's rule. Child explanations are collected only when `explain` is
/// set; the returned vector is otherwise empty and unallocated.
pub(crate) fn fold_children<F>(
    agg: &AggregateResult,
    explain: bool,
    mut score_child: F,
) -> (f64, Vec<ScoreExplain>)
where
    F: FnMut(&ResultNode) -> Scored,
{
    let mut value = 0.0;
    let mut explains = Vec::new();

    for child in &agg.children {
        let scored = score_child(child);
        value = agg.kind.combine(value, scored.value);
        if explain {
            explains.extend(scored.explain);
        }
    }

    (value, explains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::context::IndexStats;

    #[test]
    fn test_fn_scorer_delegates() {
        let scorer = FnScorer::new("example_scorer", |_ctx, _r, _dmd, _min| {
            ScoreResult::included(3.141, None)
        });
        let ctx = ScoringContext::new(IndexStats::default());
        let result = scorer.score(
            &ctx,
            &ResultNode::virtual_match(1.0, 1),
            &DocumentMetadata::default(),
            0.0,
        );

        assert_eq!(scorer.name(), "example_scorer");
        assert_eq!(result.score(), Some(3.141));
    }

    #[test]
    fn test_excluded_is_distinct_from_zero() {
        let zero = ScoreResult::included(0.0, None);
        let excluded = ScoreResult::excluded(None);

        assert_eq!(zero.score(), Some(0.0));
        assert!(!zero.is_excluded());
        assert_eq!(excluded.score(), None);
        assert!(excluded.is_excluded());
    }
}
