//! Query expander trait, per-query expander state and expansion sessions.
//!
//! An expander derives extra query terms from one [`QueryToken`]. It reads the
//! token through a shared reference and emits new terms into an
//! [`ExpansionSink`], so the order in which expanders run never affects the
//! input any of them sees.
//!
//! State an expander needs for the duration of a query (a stemmer handle, a
//! segmenter) lives in an [`ExpanderState`] owned by the caller. An
//! [`ExpansionSession`] bundles the state with one query's
//! [`ExpansionContext`]; dropping the session releases the state.

use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

use log::trace;

use crate::error::Result;
use crate::expansion::language::Language;
use crate::expansion::schema::IndexSchema;
use crate::expansion::stemmer::{Stemmer, WordSegmenter, stemmer_for};
use crate::expansion::synonym::SynonymMap;
use crate::expansion::token::{Expansion, ExpansionSink, QueryToken};

/// Name of the stemmer expander.
pub const STEMMER_EXPANDER_NAME: &str = "SBSTEM";
/// Name of the synonym expander.
pub const SYNONYMS_EXPANDER_NAME: &str = "SYNONYM";
/// Name of the phonetic expander.
pub const PHONETIC_EXPANDER_NAME: &str = "PHONETIC";
/// Name of the default composite expander.
pub const DEFAULT_EXPANDER_NAME: &str = "DEFAULT";

/// Read-only, per-query information expanders consult.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionContext<'a> {
    /// Query language.
    pub language: Language,
    /// Index schema, for phonetic field checks.
    pub schema: &'a IndexSchema,
    /// Synonym map of the index, if one is configured.
    pub synonyms: Option<&'a SynonymMap>,
}

impl<'a> ExpansionContext<'a> {
    /// Create a context without a synonym map.
    pub fn new(language: Language, schema: &'a IndexSchema) -> Self {
        ExpansionContext {
            language,
            schema,
            synonyms: None,
        }
    }

    /// Attach the index's synonym map.
    pub fn with_synonyms(mut self, synonyms: &'a SynonymMap) -> Self {
        self.synonyms = Some(synonyms);
        self
    }
}

/// Stemming resources created on first use within a query.
pub enum StemmerState {
    /// Affix stripping for the query language.
    Affix(Box<dyn Stemmer>),
    /// Word segmentation for logographic scripts.
    Segmenting(WordSegmenter),
}

impl StemmerState {
    /// Resolve the stemming resources for a language.
    pub fn for_language(language: Language) -> Self {
        match stemmer_for(language) {
            Some(stemmer) => StemmerState::Affix(stemmer),
            None => {
                trace!("no affix stemmer for language {language}, segmenting words instead");
                StemmerState::Segmenting(WordSegmenter::new())
            }
        }
    }
}

impl Debug for StemmerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StemmerState::Affix(stemmer) => write!(f, "Affix({})", stemmer.name()),
            StemmerState::Segmenting(_) => f.write_str("Segmenting"),
        }
    }
}

/// Private per-query data of one expander.
///
/// Created empty for each query, filled lazily on first use and dropped when
/// the query ends. Never shared between queries.
#[derive(Default)]
pub struct ExpanderState {
    stemmer: Option<StemmerState>,
    custom: Option<Box<dyn Any + Send>>,
}

impl ExpanderState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stemming resources, created for `language` on first call.
    pub fn stemmer(&mut self, language: Language) -> &mut StemmerState {
        self.stemmer
            .get_or_insert_with(|| StemmerState::for_language(language))
    }

    /// Whether stemming resources were created.
    pub fn has_stemmer(&self) -> bool {
        self.stemmer.is_some()
    }

    /// Custom state of a user-registered expander, created on first call.
    ///
    /// Returns `None` if the slot already holds a value of another type.
    pub fn custom<T, F>(&mut self, init: F) -> Option<&mut T>
    where
        T: Any + Send,
        F: FnOnce() -> T,
    {
        self.custom
            .get_or_insert_with(|| Box::new(init()) as Box<dyn Any + Send>)
            .downcast_mut::<T>()
    }
}

impl Debug for ExpanderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpanderState")
            .field("stemmer", &self.stemmer)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Trait for query expanders.
pub trait QueryExpander: Send + Sync + Debug {
    /// Emit zero or more terms derived from `token` into `sink`.
    ///
    /// An error aborts construction of the query.
    fn expand(
        &self,
        ctx: &ExpansionContext<'_>,
        state: &mut ExpanderState,
        token: &QueryToken,
        sink: &mut dyn ExpansionSink,
    ) -> Result<()>;

    /// Get the name of this expander.
    fn name(&self) -> &str;
}

/// An expander backed by a closure.
///
/// Any private data the expander needs is captured by the closure and
/// released when the expander is dropped.
pub struct FnExpander<F> {
    name: String,
    func: F,
}

impl<F> FnExpander<F>
where
    F: Fn(
            &ExpansionContext<'_>,
            &mut ExpanderState,
            &QueryToken,
            &mut dyn ExpansionSink,
        ) -> Result<()>
        + Send
        + Sync,
{
    /// Wrap a closure as a named expander.
    pub fn new<S: Into<String>>(name: S, func: F) -> Self {
        FnExpander {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnExpander<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnExpander").field("name", &self.name).finish()
    }
}

impl<F> QueryExpander for FnExpander<F>
where
    F: Fn(
            &ExpansionContext<'_>,
            &mut ExpanderState,
            &QueryToken,
            &mut dyn ExpansionSink,
        ) -> Result<()>
        + Send
        + Sync,
{
    fn expand(
        &self,
        ctx: &ExpansionContext<'_>,
        state: &mut ExpanderState,
        token: &QueryToken,
        sink: &mut dyn ExpansionSink,
    ) -> Result<()> {
        (self.func)(ctx, state, token, sink)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// One query's use of one expander.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use rankwell::expansion::{
///     ExpansionContext, ExpansionSession, IndexSchema, Language, QueryToken, StemmerExpander,
/// };
///
/// let schema = IndexSchema::new();
/// let ctx = ExpansionContext::new(Language::English, &schema);
/// let mut session = ExpansionSession::new(Arc::new(StemmerExpander::new()), ctx);
///
/// let terms = session.expand(&QueryToken::new("running")).unwrap();
/// assert_eq!(terms.len(), 2);
/// ```
#[derive(Debug)]
pub struct ExpansionSession<'a> {
    expander: Arc<dyn QueryExpander>,
    ctx: ExpansionContext<'a>,
    state: ExpanderState,
}

impl<'a> ExpansionSession<'a> {
    /// Start a session for one query.
    pub fn new(expander: Arc<dyn QueryExpander>, ctx: ExpansionContext<'a>) -> Self {
        ExpansionSession {
            expander,
            ctx,
            state: ExpanderState::new(),
        }
    }

    /// Expand one token into a fresh list of terms.
    ///
    /// On error nothing is returned, even if some terms had been derived.
    pub fn expand(&mut self, token: &QueryToken) -> Result<Vec<Expansion>> {
        let mut out = Vec::new();
        self.expand_into(token, &mut out)?;
        Ok(out)
    }

    /// Expand one token into a caller-provided sink.
    pub fn expand_into(&mut self, token: &QueryToken, sink: &mut dyn ExpansionSink) -> Result<()> {
        self.expander.expand(&self.ctx, &mut self.state, token, sink)
    }

    /// The expander of this session.
    pub fn expander(&self) -> &dyn QueryExpander {
        self.expander.as_ref()
    }

    /// The state accumulated so far.
    pub fn state(&self) -> &ExpanderState {
        &self.state
    }
}
