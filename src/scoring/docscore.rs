//! Raw document score passthrough.

use crate::scoring::context::{DocumentMetadata, ScoringContext};
use crate::scoring::explain::ScoreExplain;
use crate::scoring::result::ResultNode;
use crate::scoring::scorer::{DOCSCORE_SCORER_NAME, ScoreResult, Scorer};

/// Returns the document's static score and ignores the result tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocScoreScorer;

impl DocScoreScorer {
    /// Create a new document score scorer.
    pub fn new() -> Self {
        DocScoreScorer
    }
}

impl Scorer for DocScoreScorer {
    fn score(
        &self,
        ctx: &ScoringContext,
        _result: &ResultNode,
        dmd: &DocumentMetadata,
        _min_score: f64,
    ) -> ScoreResult {
        ScoreResult::included(
            dmd.score,
            ctx.explain()
                .then(|| ScoreExplain::leaf(format!("Document's score is {:.2}", dmd.score))),
        )
    }

    fn name(&self) -> &str {
        DOCSCORE_SCORER_NAME
    }
}
