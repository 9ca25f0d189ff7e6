//! Query term expansion.
//!
//! Before retrieval every query token passes through an expander that may add
//! alternative terms to the query.
//!
//! # Expanders
//!
//! - [`StemmerExpander`] - stems (`SBSTEM`)
//! - [`SynonymExpander`] - synonym group terms (`SYNONYM`)
//! - [`PhoneticExpander`] - phonetic codes (`PHONETIC`)
//! - [`DefaultExpander`] - all of the above, with phonetic field checks (`DEFAULT`)

pub mod default;
pub mod expander;
pub mod language;
pub mod phonetic;
pub mod schema;
pub mod stem;
pub mod stemmer;
pub mod synonym;
pub mod token;

pub use default::DefaultExpander;
pub use expander::{
    DEFAULT_EXPANDER_NAME, ExpanderState, ExpansionContext, ExpansionSession, FnExpander,
    PHONETIC_EXPANDER_NAME, QueryExpander, STEMMER_EXPANDER_NAME, SYNONYMS_EXPANDER_NAME,
    StemmerState,
};
pub use language::Language;
pub use phonetic::{
    DoubleMetaphoneEncoder, PhoneticEncoder, PhoneticExpander, SoundexEncoder,
};
pub use schema::{FieldSpec, IndexSchema};
pub use stem::StemmerExpander;
pub use stemmer::{SnowballStemmer, Stemmer, WordSegmenter};
pub use synonym::{SynonymExpander, SynonymMap};
pub use token::{
    Expansion, ExpansionSink, FIELD_MASK_ALL, FieldMask, PHONETIC_PREFIX, PhoneticOption,
    QueryToken, STEM_PREFIX, SYNONYM_PREFIX, TokenFlags,
};
