//! Stemmer expander.

use log::trace;

use crate::error::Result;
use crate::expansion::expander::{
    ExpanderState, ExpansionContext, QueryExpander, STEMMER_EXPANDER_NAME, StemmerState,
};
use crate::expansion::token::{ExpansionSink, QueryToken, STEM_PREFIX};

/// Expander emitting the stem of a token.
///
/// For languages written with word separators the stem is emitted twice: once
/// with the [`STEM_PREFIX`] marker, and once bare if it differs from the
/// token. Logographic text is segmented and emitted as a phrase instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct StemmerExpander;

impl StemmerExpander {
    /// Create a new stemmer expander.
    pub fn new() -> Self {
        StemmerExpander
    }
}

impl QueryExpander for StemmerExpander {
    fn expand(
        &self,
        ctx: &ExpansionContext<'_>,
        state: &mut ExpanderState,
        token: &QueryToken,
        sink: &mut dyn ExpansionSink,
    ) -> Result<()> {
        match state.stemmer(ctx.language) {
            StemmerState::Affix(stemmer) => {
                let stem = stemmer.stem(token.text());
                if stem.is_empty() {
                    return Ok(());
                }
                trace!("stemmed '{}' to '{stem}'", token.text());
                sink.expand_token(format!("{STEM_PREFIX}{stem}"), 0);
                if stem != token.text() {
                    sink.expand_token(stem, 0);
                }
            }
            StemmerState::Segmenting(segmenter) => {
                let words = segmenter.segment(token.text());
                if !words.is_empty() {
                    sink.expand_phrase(words, token.flags());
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        STEMMER_EXPANDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::language::Language;
    use crate::expansion::schema::IndexSchema;
    use crate::expansion::token::Expansion;

    fn expand(language: Language, token: QueryToken) -> Vec<Expansion> {
        let schema = IndexSchema::new();
        let ctx = ExpansionContext::new(language, &schema);
        let mut out = Vec::new();
        StemmerExpander::new()
            .expand(&ctx, &mut ExpanderState::new(), &token, &mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_stem_differs_from_token() {
        let out = expand(Language::English, QueryToken::new("running"));
        let texts: Vec<_> = out.iter().filter_map(Expansion::text).collect();
        assert_eq!(texts, vec!["+run", "run"]);
    }

    #[test]
    fn test_stem_equals_token() {
        let out = expand(Language::English, QueryToken::new("run"));
        let texts: Vec<_> = out.iter().filter_map(Expansion::text).collect();
        assert_eq!(texts, vec!["+run"]);
    }

    #[test]
    fn test_chinese_emits_phrase() {
        let out = expand(Language::Chinese, QueryToken::new("中文").with_flags(7));
        assert_eq!(
            out,
            vec![Expansion::Phrase {
                tokens: vec!["中".to_string(), "文".to_string()],
                flags: 7,
            }]
        );
    }

    #[test]
    fn test_stemmer_follows_query_language() {
        let out = expand(Language::German, QueryToken::new("häuser"));
        let texts: Vec<_> = out.iter().filter_map(Expansion::text).collect();
        assert_eq!(texts, vec!["+haus", "haus"]);

        let out = expand(Language::Russian, QueryToken::new("книги"));
        let texts: Vec<_> = out.iter().filter_map(Expansion::text).collect();
        assert_eq!(texts, vec!["+книг", "книг"]);
    }
}
