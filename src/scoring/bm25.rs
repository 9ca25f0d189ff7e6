//! BM25 scoring.
//!
//! <https://en.wikipedia.org/wiki/Okapi_BM25>
//!
//! Term leaves score `idf * f / (f + k1 * (1 - b + b * avg_doc_len))` with the
//! fixed parameters `k1 = 1.2` and `b = 0.5`. Virtual leaves use their weight
//! in place of the IDF. The tree value is multiplied by the document score and
//! divided by the slop.

use log::trace;

use crate::scoring::context::{DocumentMetadata, IndexStats, ScoringContext};
use crate::scoring::explain::{ScoreExplain, Scored};
use crate::scoring::result::ResultNode;
use crate::scoring::scorer::{BM25_SCORER_NAME, ScoreResult, Scorer, fold_children};

/// Term frequency saturation. Kept in single precision so scores stay
/// bit-compatible with existing indexes.
pub const BM25_K1: f32 = 1.2;

/// Document length normalization, single precision like [`BM25_K1`].
pub const BM25_B: f32 = 0.5;

/// The frequency-independent half of the BM25 denominator.
fn length_norm(stats: &IndexStats) -> f64 {
    let b = f64::from(BM25_B);
    f64::from(BM25_K1) * (1.0 - b + b * stats.avg_doc_len)
}

/// BM25 value of a result subtree.
pub fn raw_bm25(node: &ResultNode, stats: &IndexStats, explain: bool) -> Scored {
    match node {
        ResultNode::Term(term) => {
            let idf = term.idf();
            let f = f64::from(term.freq);
            let score = idf * f / (f + length_norm(stats));
            Scored::new(score, explain, || {
                format!(
                    "({:.2} = IDF {:.2} * F {} / (F {} + k1 1.2 * (1 - b 0.5 + b 0.5 * Average Len {:.2})))",
                    score, idf, term.freq, term.freq, stats.avg_doc_len
                )
            })
        }
        ResultNode::Virtual(v) => {
            if v.freq == 0 {
                return Scored::new(0.0, explain, || "Frequency 0 -> value 0".to_string());
            }
            // no idf for virtual results: the weight stands in for it
            let f = f64::from(v.freq);
            let score = v.weight * f / (f + length_norm(stats));
            Scored::new(score, explain, || {
                format!(
                    "({:.2} = Weight {:.2} * F {} / (F {} + k1 1.2 * (1 - b 0.5 + b 0.5 * Average Len {:.2})))",
                    score, v.weight, v.freq, v.freq, stats.avg_doc_len
                )
            })
        }
        ResultNode::Aggregate(agg) => {
            let (children, explains) =
                fold_children(agg, explain, |c| raw_bm25(c, stats, explain));
            Scored {
                value: agg.weight * children,
                explain: explain.then(|| {
                    ScoreExplain::with_children(
                        format!("(Weight {:.2} * children BM25 {:.2})", agg.weight, children),
                        explains,
                    )
                }),
            }
        }
    }
}

/// BM25 scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bm25Scorer;

impl Bm25Scorer {
    /// Create a new BM25 scorer.
    pub fn new() -> Self {
        Bm25Scorer
    }
}

impl Scorer for Bm25Scorer {
    fn score(
        &self,
        ctx: &ScoringContext,
        result: &ResultNode,
        dmd: &DocumentMetadata,
        min_score: f64,
    ) -> ScoreResult {
        let explain = ctx.explain();
        let raw = raw_bm25(result, ctx.index_stats(), explain);
        let score = dmd.score * raw.value;

        // no need to factor the distance if the score is already below minimal score
        if score < min_score {
            trace!("bm25 {score} pruned below minimum score {min_score}");
            return ScoreResult::included(
                0.0,
                explain.then(|| {
                    ScoreExplain::wrap(
                        format!(
                            "BM25 score of {:.2} is smaller than minimum score {:.2}",
                            score, min_score
                        ),
                        raw.explain,
                    )
                }),
            );
        }

        let slop = result.min_offset_delta().max(1);
        let score = score / f64::from(slop);

        ScoreResult::included(
            score,
            explain.then(|| {
                ScoreExplain::wrap(
                    format!(
                        "Final BM25 : words BM25 {:.2} * document score {:.2} / slop {}",
                        raw.value, dmd.score, slop
                    ),
                    raw.explain,
                )
            }),
        )
    }

    fn name(&self) -> &str {
        BM25_SCORER_NAME
    }
}
