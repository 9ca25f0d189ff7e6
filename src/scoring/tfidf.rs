//! TF-IDF scoring.
//!
//! Two variants share one implementation and differ only in the per-document
//! normalization: by the highest term frequency in the document
//! ([`TfIdfNorm::MaxFreq`]) or by the weighted document length
//! ([`TfIdfNorm::DocLen`]).
//!
//! The final score is `document score * raw TF-IDF / norm / slop`, where the
//! raw value sums `weight * freq * idf` over the term leaves.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::scoring::context::{DocumentMetadata, ScoringContext};
use crate::scoring::explain::{ScoreExplain, Scored};
use crate::scoring::result::ResultNode;
use crate::scoring::scorer::{
    DEFAULT_SCORER_NAME, ScoreResult, Scorer, TFIDF_DOCNORM_SCORER_NAME, fold_children,
};

/// Per-document TF normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TfIdfNorm {
    /// Normalize by the maximum term frequency of the document.
    MaxFreq,
    /// Normalize by the weighted token count of the document.
    DocLen,
}

impl TfIdfNorm {
    fn of(self, dmd: &DocumentMetadata) -> u32 {
        match self {
            TfIdfNorm::MaxFreq => dmd.max_freq,
            TfIdfNorm::DocLen => dmd.len,
        }
    }
}

/// Raw TF-IDF of a result subtree.
pub fn raw_tfidf(node: &ResultNode, explain: bool) -> Scored {
    match node {
        ResultNode::Term(term) => {
            let idf = term.idf();
            let score = term.weight * f64::from(term.freq) * idf;
            Scored::new(score, explain, || {
                format!(
                    "(TFIDF {:.2} = Weight {:.2} * TF {} * IDF {:.2})",
                    score, term.weight, term.freq, idf
                )
            })
        }
        ResultNode::Virtual(v) => {
            // no term statistics
            let idf = 0.0;
            let score = v.weight * f64::from(v.freq) * idf;
            Scored::new(score, explain, || {
                format!(
                    "(TFIDF {:.2} = Weight {:.2} * Frequency {} * IDF {:.2})",
                    score, v.weight, v.freq, idf
                )
            })
        }
        ResultNode::Aggregate(agg) => {
            let (children, explains) = fold_children(agg, explain, |c| raw_tfidf(c, explain));
            Scored {
                value: agg.weight * children,
                explain: explain.then(|| {
                    ScoreExplain::with_children(
                        format!(
                            "(Weight {:.2} * total children TFIDF {:.2})",
                            agg.weight, children
                        ),
                        explains,
                    )
                }),
            }
        }
    }
}

/// TF-IDF scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfIdfScorer {
    norm: TfIdfNorm,
}

impl TfIdfScorer {
    /// Create a TF-IDF scorer with the given normalization.
    pub fn new(norm: TfIdfNorm) -> Self {
        TfIdfScorer { norm }
    }

    /// The default scorer, normalized by maximum term frequency.
    pub fn max_freq() -> Self {
        Self::new(TfIdfNorm::MaxFreq)
    }

    /// Normalized by document length.
    pub fn doc_len() -> Self {
        Self::new(TfIdfNorm::DocLen)
    }

    /// The normalization in use.
    pub fn norm(&self) -> TfIdfNorm {
        self.norm
    }
}

impl Default for TfIdfScorer {
    fn default() -> Self {
        Self::max_freq()
    }
}

impl Scorer for TfIdfScorer {
    fn score(
        &self,
        ctx: &ScoringContext,
        result: &ResultNode,
        dmd: &DocumentMetadata,
        min_score: f64,
    ) -> ScoreResult {
        let explain = ctx.explain();
        if dmd.score == 0.0 {
            return ScoreResult::included(
                0.0,
                explain.then(|| ScoreExplain::leaf("Document score is 0")),
            );
        }

        // an empty document must not divide by zero
        let norm = self.norm.of(dmd).max(1);
        let raw = raw_tfidf(result, explain);
        let tfidf = dmd.score * raw.value / f64::from(norm);

        // no need to factor the distance if tfidf is already below minimal score
        if tfidf < min_score {
            trace!("tfidf {tfidf} pruned below minimum score {min_score}");
            return ScoreResult::included(
                0.0,
                explain.then(|| {
                    ScoreExplain::wrap(
                        format!(
                            "TFIDF score of {:.2} is smaller than minimum score {:.2}",
                            tfidf, min_score
                        ),
                        raw.explain,
                    )
                }),
            );
        }

        let slop = result.min_offset_delta().max(1);
        let score = tfidf / f64::from(slop);

        ScoreResult::included(
            score,
            explain.then(|| {
                ScoreExplain::wrap(
                    format!(
                        "Final TFIDF : words TFIDF {:.2} * document score {:.2} / norm {} / slop {}",
                        raw.value, dmd.score, norm, slop
                    ),
                    raw.explain,
                )
            }),
        )
    }

    fn name(&self) -> &str {
        match self.norm {
            TfIdfNorm::MaxFreq => DEFAULT_SCORER_NAME,
            TfIdfNorm::DocLen => TFIDF_DOCNORM_SCORER_NAME,
        }
    }
}
