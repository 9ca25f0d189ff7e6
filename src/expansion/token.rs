//! Query tokens and the tokens expanders derive from them.

use serde::{Deserialize, Serialize};

/// Bitset of schema fields; bit `i` selects the `i`-th field.
pub type FieldMask = u64;

/// Field mask selecting every field.
pub const FIELD_MASK_ALL: FieldMask = FieldMask::MAX;

/// Opaque flags carried by query tokens and expansions.
pub type TokenFlags = u32;

/// Marker prepended to stems so they never collide with literal terms.
pub const STEM_PREFIX: char = '+';

/// Marker prepended to phonetic codes.
pub const PHONETIC_PREFIX: char = '<';

/// Marker prepended to synonym group identifiers.
pub const SYNONYM_PREFIX: char = '~';

/// Per-token phonetic matching request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneticOption {
    /// Unspecified; phonetics apply when a targeted field supports them.
    #[default]
    Default,
    /// Explicitly requested.
    Enabled,
    /// Explicitly refused.
    Disabled,
}

/// One raw query token handed to an expander.
///
/// Expanders only ever see a shared reference; derived terms are emitted as
/// new [`Expansion`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryToken {
    text: String,
    flags: TokenFlags,
    field_mask: FieldMask,
    phonetic: PhoneticOption,
}

impl QueryToken {
    /// Create a token targeting every field.
    pub fn new<S: Into<String>>(text: S) -> Self {
        QueryToken {
            text: text.into(),
            flags: 0,
            field_mask: FIELD_MASK_ALL,
            phonetic: PhoneticOption::Default,
        }
    }

    /// Restrict the token to the given fields.
    pub fn with_field_mask(mut self, field_mask: FieldMask) -> Self {
        self.field_mask = field_mask;
        self
    }

    /// Set the phonetic request.
    pub fn with_phonetic(mut self, phonetic: PhoneticOption) -> Self {
        self.phonetic = phonetic;
        self
    }

    /// Set the token flags.
    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Token text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Token flags.
    pub fn flags(&self) -> TokenFlags {
        self.flags
    }

    /// Targeted fields.
    pub fn field_mask(&self) -> FieldMask {
        self.field_mask
    }

    /// Phonetic request.
    pub fn phonetic(&self) -> PhoneticOption {
        self.phonetic
    }
}

/// A term an expander adds to the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expansion {
    /// An alternative term, OR-ed with the original token.
    Token {
        /// Term text.
        text: String,
        /// Term flags.
        flags: TokenFlags,
    },
    /// An ordered, non-exact phrase that replaces the original token.
    Phrase {
        /// Phrase terms in order.
        tokens: Vec<String>,
        /// Phrase flags.
        flags: TokenFlags,
    },
}

impl Expansion {
    /// The text of a single-term expansion.
    pub fn text(&self) -> Option<&str> {
        match self {
            Expansion::Token { text, .. } => Some(text),
            Expansion::Phrase { .. } => None,
        }
    }
}

/// Receiver of expanded terms.
pub trait ExpansionSink {
    /// Add an alternative term.
    fn expand_token(&mut self, text: String, flags: TokenFlags);

    /// Replace the token with an ordered phrase.
    fn expand_phrase(&mut self, tokens: Vec<String>, flags: TokenFlags);
}

impl ExpansionSink for Vec<Expansion> {
    fn expand_token(&mut self, text: String, flags: TokenFlags) {
        self.push(Expansion::Token { text, flags });
    }

    fn expand_phrase(&mut self, tokens: Vec<String>, flags: TokenFlags) {
        self.push(Expansion::Phrase { tokens, flags });
    }
}
