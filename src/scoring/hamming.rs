//! Hamming distance between the query payload and the document payload.
//!
//! Both payloads must be non-empty and of equal length; otherwise the score is
//! 0. The score is `1 / (differing bits + 1)`, so identical payloads score 1.

use crate::scoring::context::{DocumentMetadata, ScoringContext};
use crate::scoring::explain::ScoreExplain;
use crate::scoring::result::ResultNode;
use crate::scoring::scorer::{HAMMING_SCORER_NAME, ScoreResult, Scorer};

/// Number of differing bits between two equally long byte strings.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| u64::from((x ^ y).count_ones()))
        .sum()
}

/// Payload Hamming distance scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HammingScorer;

impl HammingScorer {
    /// Create a new Hamming scorer.
    pub fn new() -> Self {
        HammingScorer
    }
}

impl Scorer for HammingScorer {
    fn score(
        &self,
        ctx: &ScoringContext,
        _result: &ResultNode,
        dmd: &DocumentMetadata,
        _min_score: f64,
    ) -> ScoreResult {
        let explain = ctx.explain();
        let query = ctx.payload();

        let doc = match dmd.payload.as_deref() {
            Some(doc) if !doc.is_empty() && doc.len() == query.len() => doc,
            _ => {
                return ScoreResult::included(
                    0.0,
                    explain.then(|| {
                        ScoreExplain::leaf("Payloads provided to scorer vary in length")
                    }),
                );
            }
        };

        let nbits = hamming_distance(query, doc);
        // a distance of 0 yields a perfect score of 1
        let score = 1.0 / (nbits + 1) as f64;

        ScoreResult::included(
            score,
            explain.then(|| {
                ScoreExplain::leaf(format!(
                    "String length is {}. Bit count is {}. Result is (1 / count + 1) = {:.2}",
                    query.len(),
                    nbits,
                    score
                ))
            }),
        )
    }

    fn name(&self) -> &str {
        HAMMING_SCORER_NAME
    }
}
