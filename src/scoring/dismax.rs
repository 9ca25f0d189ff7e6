//! DisMax-style scoring.
//!
//! Leaves score `weight * freq`; intersections sum and unions take the
//! maximum of their children before applying their own weight. No document
//! score or normalization is applied, so the value reflects only the shape of
//! the match.

use crate::scoring::context::{DocumentMetadata, ScoringContext};
use crate::scoring::explain::{ScoreExplain, Scored};
use crate::scoring::result::ResultNode;
use crate::scoring::scorer::{DISMAX_SCORER_NAME, ScoreResult, Scorer, fold_children};

/// DisMax value of a result subtree.
pub fn raw_dismax(node: &ResultNode, explain: bool) -> Scored {
    match node {
        ResultNode::Term(_) | ResultNode::Virtual(_) => {
            let (weight, freq) = (node.weight(), node.freq());
            let score = weight * f64::from(freq);
            Scored::new(score, explain, || {
                format!(
                    "DISMAX {:.2} = Weight {:.2} * Frequency {}",
                    score, weight, freq
                )
            })
        }
        ResultNode::Aggregate(agg) => {
            let (children, explains) = fold_children(agg, explain, |c| raw_dismax(c, explain));
            let score = agg.weight * children;
            Scored {
                value: score,
                explain: explain.then(|| {
                    ScoreExplain::with_children(
                        format!(
                            "{:.2} = Weight {:.2} * children DISMAX {:.2}",
                            score, agg.weight, children
                        ),
                        explains,
                    )
                }),
            }
        }
    }
}

/// DisMax-style scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisMaxScorer;

impl DisMaxScorer {
    /// Create a new DisMax scorer.
    pub fn new() -> Self {
        DisMaxScorer
    }
}

impl Scorer for DisMaxScorer {
    fn score(
        &self,
        ctx: &ScoringContext,
        result: &ResultNode,
        _dmd: &DocumentMetadata,
        _min_score: f64,
    ) -> ScoreResult {
        raw_dismax(result, ctx.explain()).into()
    }

    fn name(&self) -> &str {
        DISMAX_SCORER_NAME
    }
}
