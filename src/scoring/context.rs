//! Per-query scoring parameters and per-document metadata.

use serde::{Deserialize, Serialize};

/// Corpus-wide statistics of the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of documents in the index.
    #[serde(default)]
    pub num_docs: u64,

    /// Number of distinct terms in the index.
    #[serde(default)]
    pub num_terms: u64,

    /// Average document length in tokens.
    pub avg_doc_len: f64,
}

/// Per-document metadata read by the scorers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Static, query-independent document score.
    pub score: f64,

    /// Highest frequency of any term in the document.
    pub max_freq: u32,

    /// Weighted token count of the document.
    pub len: u32,

    /// Bytes attached to the document, compared by the Hamming scorer.
    #[serde(default)]
    pub payload: Option<Vec<u8>>,
}

impl DocumentMetadata {
    /// Create metadata without a payload.
    pub fn new(score: f64, max_freq: u32, len: u32) -> Self {
        DocumentMetadata {
            score,
            max_freq,
            len,
            payload: None,
        }
    }

    /// Attach a payload.
    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Parameters shared by every scorer invocation of one query.
///
/// The context is immutable once built and may be shared by concurrent
/// scoring calls.
///
/// # Examples
///
/// ```
/// use rankwell::scoring::context::{IndexStats, ScoringContext};
///
/// let ctx = ScoringContext::new(IndexStats { avg_doc_len: 12.0, ..Default::default() })
///     .with_explain(true)
///     .with_payload(vec![0xAB]);
///
/// assert!(ctx.explain());
/// assert_eq!(ctx.payload(), &[0xAB]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoringContext {
    explain: bool,
    payload: Vec<u8>,
    index_stats: IndexStats,
}

impl ScoringContext {
    /// Create a context for the given index statistics.
    pub fn new(index_stats: IndexStats) -> Self {
        ScoringContext {
            explain: false,
            payload: Vec::new(),
            index_stats,
        }
    }

    /// Request score explanations.
    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    /// Set the query-side payload.
    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    /// Whether explanations were requested.
    pub fn explain(&self) -> bool {
        self.explain
    }

    /// Query-side payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Corpus-wide statistics.
    pub fn index_stats(&self) -> &IndexStats {
        &self.index_stats
    }
}
