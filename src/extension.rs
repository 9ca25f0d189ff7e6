//! Name-to-implementation registry of scorers and expanders.
//!
//! The registry is filled once at startup and only read afterwards; wrap it
//! in an `Arc` to share it between query threads. Registered implementations
//! own their private data, which is released when the registry is dropped.
//!
//! # Examples
//!
//! ```
//! use rankwell::extension::ExtensionRegistry;
//! use rankwell::scoring::DocScoreScorer;
//!
//! let mut registry = ExtensionRegistry::with_defaults();
//! assert!(registry.scorer("BM25").is_some());
//!
//! // names are bound once
//! assert!(registry.register_scorer("DOCSCORE", DocScoreScorer::new()).is_err());
//! ```

use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use crate::error::{RankwellError, Result};
use crate::expansion::{
    DEFAULT_EXPANDER_NAME, DefaultExpander, PHONETIC_EXPANDER_NAME, PhoneticExpander,
    QueryExpander, STEMMER_EXPANDER_NAME, SYNONYMS_EXPANDER_NAME, StemmerExpander,
    SynonymExpander,
};
use crate::scoring::scorer::{
    BM25_SCORER_NAME, DEFAULT_SCORER_NAME, DISMAX_SCORER_NAME, DOCSCORE_SCORER_NAME,
    HAMMING_SCORER_NAME, TFIDF_DOCNORM_SCORER_NAME,
};
use crate::scoring::{
    Bm25Scorer, DisMaxScorer, DocScoreScorer, HammingScorer, Scorer, TfIdfScorer,
};

/// Registered scorers and expanders.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    scorers: AHashMap<String, Arc<dyn Scorer>>,
    expanders: AHashMap<String, Arc<dyn QueryExpander>>,
}

impl ExtensionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in scorer and expander.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Built-in names are distinct, so these inserts never conflict
        registry.bind_scorer(DEFAULT_SCORER_NAME, Arc::new(TfIdfScorer::max_freq()));
        registry.bind_scorer(TFIDF_DOCNORM_SCORER_NAME, Arc::new(TfIdfScorer::doc_len()));
        registry.bind_scorer(BM25_SCORER_NAME, Arc::new(Bm25Scorer::new()));
        registry.bind_scorer(DISMAX_SCORER_NAME, Arc::new(DisMaxScorer::new()));
        registry.bind_scorer(DOCSCORE_SCORER_NAME, Arc::new(DocScoreScorer::new()));
        registry.bind_scorer(HAMMING_SCORER_NAME, Arc::new(HammingScorer::new()));

        registry.bind_expander(STEMMER_EXPANDER_NAME, Arc::new(StemmerExpander::new()));
        registry.bind_expander(SYNONYMS_EXPANDER_NAME, Arc::new(SynonymExpander::new()));
        registry.bind_expander(PHONETIC_EXPANDER_NAME, Arc::new(PhoneticExpander::new()));
        registry.bind_expander(DEFAULT_EXPANDER_NAME, Arc::new(DefaultExpander::new()));

        registry
    }

    /// Bind a scorer to `name`.
    ///
    /// Fails if the name is taken; the existing binding is kept.
    pub fn register_scorer<S, T>(&mut self, name: S, scorer: T) -> Result<()>
    where
        S: Into<String>,
        T: Scorer + 'static,
    {
        let name = name.into();
        if self.scorers.contains_key(&name) {
            return Err(RankwellError::extension(format!(
                "scorer '{name}' is already registered"
            )));
        }
        self.bind_scorer(name, Arc::new(scorer));
        Ok(())
    }

    /// Bind an expander to `name`.
    ///
    /// Fails if the name is taken; the existing binding is kept.
    pub fn register_expander<S, T>(&mut self, name: S, expander: T) -> Result<()>
    where
        S: Into<String>,
        T: QueryExpander + 'static,
    {
        let name = name.into();
        if self.expanders.contains_key(&name) {
            return Err(RankwellError::extension(format!(
                "expander '{name}' is already registered"
            )));
        }
        self.bind_expander(name, Arc::new(expander));
        Ok(())
    }

    fn bind_scorer<S: Into<String>>(&mut self, name: S, scorer: Arc<dyn Scorer>) {
        let name = name.into();
        debug!("registered scorer '{name}'");
        self.scorers.insert(name, scorer);
    }

    fn bind_expander<S: Into<String>>(&mut self, name: S, expander: Arc<dyn QueryExpander>) {
        let name = name.into();
        debug!("registered expander '{name}'");
        self.expanders.insert(name, expander);
    }

    /// The scorer bound to `name`, matched exactly.
    pub fn scorer(&self, name: &str) -> Option<Arc<dyn Scorer>> {
        self.scorers.get(name).cloned()
    }

    /// The expander bound to `name`, matched exactly.
    pub fn expander(&self, name: &str) -> Option<Arc<dyn QueryExpander>> {
        self.expanders.get(name).cloned()
    }

    /// Like [`scorer`](Self::scorer), failing on unknown names.
    pub fn require_scorer(&self, name: &str) -> Result<Arc<dyn Scorer>> {
        self.scorer(name)
            .ok_or_else(|| RankwellError::extension(format!("unknown scorer '{name}'")))
    }

    /// Like [`expander`](Self::expander), failing on unknown names.
    pub fn require_expander(&self, name: &str) -> Result<Arc<dyn QueryExpander>> {
        self.expander(name)
            .ok_or_else(|| RankwellError::extension(format!("unknown expander '{name}'")))
    }

    /// Names of the registered scorers, sorted.
    pub fn scorer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scorers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of the registered expanders, sorted.
    pub fn expander_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.expanders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
