//! Snowball stemmers.
//!
//! One algorithm per supported language, provided by `rust-stemmers`. Words
//! are lowercased before stemming.
//!
//! # Examples
//!
//! ```
//! use rankwell::expansion::Language;
//! use rankwell::expansion::stemmer::{SnowballStemmer, Stemmer};
//!
//! let english = SnowballStemmer::for_language(Language::English).unwrap();
//! assert_eq!(english.stem("running"), "run");
//!
//! let german = SnowballStemmer::for_language(Language::German).unwrap();
//! assert_eq!(german.stem("Häuser"), "haus");
//! ```

use std::fmt;

use rust_stemmers::Algorithm;

use crate::expansion::language::Language;
use crate::expansion::stemmer::Stemmer;

/// Affix-stripping stemmer for one language.
pub struct SnowballStemmer {
    language: Language,
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    /// Create the stemmer of `language`, or `None` if the language has no
    /// Snowball algorithm.
    pub fn for_language(language: Language) -> Option<Self> {
        let algorithm = match language {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::Finnish => Algorithm::Finnish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Tamil => Algorithm::Tamil,
            Language::Turkish => Algorithm::Turkish,
            Language::Chinese => return None,
        };

        Some(SnowballStemmer {
            language,
            inner: rust_stemmers::Stemmer::create(algorithm),
        })
    }

    /// Language of this stemmer.
    pub fn language(&self) -> Language {
        self.language
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        self.inner.stem(&lower).into_owned()
    }

    fn name(&self) -> &'static str {
        self.language.as_str()
    }
}
