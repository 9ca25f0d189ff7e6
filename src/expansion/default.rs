//! The default composite expander.

use log::{debug, trace};

use crate::error::{RankwellError, Result};
use crate::expansion::expander::{
    DEFAULT_EXPANDER_NAME, ExpanderState, ExpansionContext, QueryExpander,
};
use crate::expansion::phonetic::PhoneticExpander;
use crate::expansion::stem::StemmerExpander;
use crate::expansion::synonym::SynonymExpander;
use crate::expansion::token::{ExpansionSink, PhoneticOption, QueryToken};

/// Runs synonym, phonetic and stemmer expansion in turn.
///
/// Phonetic expansion runs when the token asks for it, or when it does not
/// say and one of its targeted fields indexes phonetic codes. An explicit
/// request on fields without phonetic support fails before anything is
/// emitted.
///
/// # Examples
///
/// ```
/// use rankwell::expansion::{
///     DefaultExpander, ExpanderState, ExpansionContext, IndexSchema, Language, PhoneticOption,
///     QueryExpander, QueryToken,
/// };
///
/// let schema = IndexSchema::new().with_field("body", false).unwrap();
/// let ctx = ExpansionContext::new(Language::English, &schema);
/// let token = QueryToken::new("smith").with_phonetic(PhoneticOption::Enabled);
///
/// let mut out = Vec::new();
/// let err = DefaultExpander::new().expand(&ctx, &mut ExpanderState::new(), &token, &mut out);
/// assert!(err.is_err());
/// assert!(out.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct DefaultExpander {
    synonym: SynonymExpander,
    phonetic: PhoneticExpander,
    stemmer: StemmerExpander,
}

impl DefaultExpander {
    /// Create a new default expander.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether phonetic codes should be emitted for `token`.
    pub fn resolve_phonetic(ctx: &ExpansionContext<'_>, token: &QueryToken) -> Result<bool> {
        let supported = ctx.schema.check_phonetic_enabled(token.field_mask());
        match token.phonetic() {
            PhoneticOption::Default => Ok(supported),
            _ if !supported => Err(RankwellError::query("field does not support phonetics")),
            PhoneticOption::Enabled => Ok(true),
            PhoneticOption::Disabled => Ok(false),
        }
    }
}

impl QueryExpander for DefaultExpander {
    fn expand(
        &self,
        ctx: &ExpansionContext<'_>,
        state: &mut ExpanderState,
        token: &QueryToken,
        sink: &mut dyn ExpansionSink,
    ) -> Result<()> {
        let phonetic = Self::resolve_phonetic(ctx, token).inspect_err(|e| {
            debug!("rejecting token '{}': {e}", token.text());
        })?;
        trace!(
            "expanding '{}' (phonetic: {phonetic}, language: {})",
            token.text(),
            ctx.language
        );

        self.synonym.expand(ctx, state, token, sink)?;
        if phonetic {
            self.phonetic.expand(ctx, state, token, sink)?;
        }
        self.stemmer.expand(ctx, state, token, sink)
    }

    fn name(&self) -> &str {
        DEFAULT_EXPANDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::language::Language;
    use crate::expansion::schema::IndexSchema;
    use crate::expansion::synonym::SynonymMap;
    use crate::expansion::token::Expansion;

    fn schema() -> IndexSchema {
        IndexSchema::new()
            .with_field("title", false)
            .unwrap()
            .with_field("name", true)
            .unwrap()
    }

    fn texts(out: &[Expansion]) -> Vec<&str> {
        out.iter().filter_map(Expansion::text).collect()
    }

    #[test]
    fn test_order_synonym_phonetic_stem() {
        let schema = schema();
        let synonyms =
            SynonymMap::from_groups(vec![vec!["running".to_string(), "jogging".to_string()]])
                .unwrap();
        let ctx = ExpansionContext::new(Language::English, &schema).with_synonyms(&synonyms);
        let mut out = Vec::new();

        DefaultExpander::new()
            .expand(
                &ctx,
                &mut ExpanderState::new(),
                &QueryToken::new("running"),
                &mut out,
            )
            .unwrap();

        assert_eq!(texts(&out), vec!["~0000000000", "<RNNK", "+run", "run"]);
    }

    #[test]
    fn test_default_phonetic_follows_fields() {
        let schema = schema();
        let ctx = ExpansionContext::new(Language::English, &schema);
        let title_only = schema.field_mask(&["title"]).unwrap();
        let mut out = Vec::new();

        DefaultExpander::new()
            .expand(
                &ctx,
                &mut ExpanderState::new(),
                &QueryToken::new("run").with_field_mask(title_only),
                &mut out,
            )
            .unwrap();

        assert_eq!(texts(&out), vec!["+run"]);
    }

    #[test]
    fn test_explicit_phonetic_on_plain_field_fails() {
        let schema = schema();
        let ctx = ExpansionContext::new(Language::English, &schema);
        let title_only = schema.field_mask(&["title"]).unwrap();

        for option in [PhoneticOption::Enabled, PhoneticOption::Disabled] {
            let token = QueryToken::new("run")
                .with_field_mask(title_only)
                .with_phonetic(option);
            let mut out = Vec::new();

            let err = DefaultExpander::new()
                .expand(&ctx, &mut ExpanderState::new(), &token, &mut out)
                .unwrap_err();

            assert!(err.to_string().contains("field does not support phonetics"));
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_explicit_disable_skips_phonetic() {
        let schema = schema();
        let ctx = ExpansionContext::new(Language::English, &schema);
        let token = QueryToken::new("run").with_phonetic(PhoneticOption::Disabled);
        let mut out = Vec::new();

        DefaultExpander::new()
            .expand(&ctx, &mut ExpanderState::new(), &token, &mut out)
            .unwrap();

        assert_eq!(texts(&out), vec!["+run"]);
    }
}
