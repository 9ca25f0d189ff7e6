//! # Rankwell
//!
//! Relevance scoring and query term expansion for full-text search engines.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - TF-IDF, BM25, DisMax, document score and Hamming distance scorers
//! - Optional explanation trees mirroring every score computation
//! - Stemming, phonetic and synonym query expansion
//! - A name-based registry for built-in and custom extensions

pub mod cli;
pub mod config;
pub mod error;
pub mod expansion;
pub mod extension;
pub mod scoring;

pub mod prelude {
    pub use crate::config::RankwellConfig;
    pub use crate::error::{RankwellError, Result};
    pub use crate::expansion::{
        Expansion, ExpansionContext, ExpansionSession, IndexSchema, Language, QueryExpander,
        QueryToken,
    };
    pub use crate::extension::ExtensionRegistry;
    pub use crate::scoring::{
        DocumentMetadata, IndexStats, ResultNode, ScoreResult, Scorer, ScoringContext,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
