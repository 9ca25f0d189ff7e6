//! Stemmers and word segmenters used by the stemmer expander.

pub mod snowball;

use unicode_segmentation::UnicodeSegmentation;

pub use snowball::SnowballStemmer;

use crate::expansion::language::Language;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form. An empty string means no stem.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// The affix stemmer of a language.
///
/// Returns `None` for scripts written without word separators; those are
/// segmented with [`WordSegmenter`] instead.
pub fn stemmer_for(language: Language) -> Option<Box<dyn Stemmer>> {
    SnowballStemmer::for_language(language).map(|stemmer| Box::new(stemmer) as Box<dyn Stemmer>)
}

/// Splits text of scripts without spaces into words (UAX #29).
///
/// Ideographs are emitted one per word.
///
/// # Examples
///
/// ```
/// use rankwell::expansion::stemmer::WordSegmenter;
///
/// let words = WordSegmenter::new().segment("搜索引擎");
/// assert_eq!(words, vec!["搜", "索", "引", "擎"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WordSegmenter;

impl WordSegmenter {
    /// Create a new segmenter.
    pub fn new() -> Self {
        WordSegmenter
    }

    /// Split `text` into words, dropping punctuation and whitespace.
    pub fn segment(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }
}
