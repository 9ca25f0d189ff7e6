//! Ranking and expansion configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RankwellError, Result};
use crate::expansion::{DEFAULT_EXPANDER_NAME, IndexSchema, Language, SynonymMap};
use crate::scoring::scorer::DEFAULT_SCORER_NAME;

/// Which scorer and expander a query uses, and what they consult.
///
/// # Examples
///
/// ```
/// use rankwell::config::RankwellConfig;
///
/// let config: RankwellConfig = serde_json::from_str(r#"{ "scorer": "BM25" }"#).unwrap();
/// assert_eq!(config.scorer, "BM25");
/// assert_eq!(config.expander, "DEFAULT");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankwellConfig {
    /// Name of the scorer.
    pub scorer: String,
    /// Name of the expander.
    pub expander: String,
    /// Query language.
    pub language: Language,
    /// Whether to build explanation trees.
    pub explain: bool,
    /// JSON file of synonym groups.
    pub synonyms_path: Option<PathBuf>,
    /// Index fields.
    pub schema: IndexSchema,
}

impl Default for RankwellConfig {
    fn default() -> Self {
        Self {
            scorer: DEFAULT_SCORER_NAME.to_string(),
            expander: DEFAULT_EXPANDER_NAME.to_string(),
            language: Language::default(),
            explain: false,
            synonyms_path: None,
            schema: IndexSchema::default(),
        }
    }
}

impl RankwellConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RankwellError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: RankwellConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration names a scorer and an expander.
    pub fn validate(&self) -> Result<()> {
        if self.scorer.trim().is_empty() {
            return Err(RankwellError::config("scorer name must not be empty"));
        }
        if self.expander.trim().is_empty() {
            return Err(RankwellError::config("expander name must not be empty"));
        }
        Ok(())
    }

    /// Load the configured synonym map, if any.
    pub fn load_synonyms(&self) -> Result<Option<SynonymMap>> {
        self.synonyms_path
            .as_deref()
            .map(SynonymMap::load_from_file)
            .transpose()
    }
}
