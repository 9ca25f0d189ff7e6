//! Relevance scoring over per-document result trees.
//!
//! # Scorers
//!
//! - [`TfIdfScorer`] - TF-IDF normalized by max frequency (`TFIDF`) or document length (`TFIDF.DOCNORM`)
//! - [`Bm25Scorer`] - BM25 (`BM25`)
//! - [`DisMaxScorer`] - structure-only DisMax (`DISMAX`)
//! - [`DocScoreScorer`] - the document's static score (`DOCSCORE`)
//! - [`HammingScorer`] - payload Hamming distance (`HAMMING`)
//!
//! # Examples
//!
//! ```
//! use rankwell::scoring::{
//!     Bm25Scorer, DocumentMetadata, IndexStats, ResultNode, Scorer, ScoringContext,
//! };
//!
//! let ctx = ScoringContext::new(IndexStats { avg_doc_len: 10.0, ..Default::default() })
//!     .with_explain(true);
//! let tree = ResultNode::term("rust", 2.0, 1.0, 3);
//! let dmd = DocumentMetadata::new(1.0, 3, 12);
//!
//! let result = Bm25Scorer::new().score(&ctx, &tree, &dmd, 0.0);
//! assert!(result.score().unwrap() > 0.0);
//! println!("{}", result.explain.unwrap());
//! ```

pub mod bm25;
pub mod context;
pub mod dismax;
pub mod docscore;
pub mod explain;
pub mod hamming;
pub mod result;
pub mod scorer;
pub mod tfidf;

use rayon::prelude::*;

pub use bm25::Bm25Scorer;
pub use context::{DocumentMetadata, IndexStats, ScoringContext};
pub use dismax::DisMaxScorer;
pub use docscore::DocScoreScorer;
pub use explain::{ScoreExplain, Scored};
pub use hamming::HammingScorer;
pub use result::{AggregateKind, ResultNode, TermStats};
pub use scorer::{FnScorer, ScoreOutcome, ScoreResult, Scorer};
pub use tfidf::{TfIdfNorm, TfIdfScorer};

/// A candidate document handed to [`score_candidates`].
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The document's result tree.
    pub result: ResultNode,
    /// The document's metadata.
    pub metadata: DocumentMetadata,
}

/// Score many candidate documents of one query in parallel.
///
/// Every call into the scorer stays single-threaded; only independent
/// documents are spread across the rayon pool. Results keep the input order.
pub fn score_candidates(
    scorer: &dyn Scorer,
    ctx: &ScoringContext,
    candidates: &[Candidate],
    min_score: f64,
) -> Vec<ScoreResult> {
    candidates
        .par_iter()
        .map(|c| scorer.score(ctx, &c.result, &c.metadata, min_score))
        .collect()
}
