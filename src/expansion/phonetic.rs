//! Phonetic encoding and the phonetic expander.
//!
//! The expander uses Double Metaphone by default. Only the primary code is
//! used, never the alternate one; it is emitted with the [`PHONETIC_PREFIX`]
//! marker so phonetic terms live in their own namespace.

use std::fmt;

use log::trace;
use rphonetic::{DoubleMetaphone, Encoder};

use crate::error::Result;
use crate::expansion::expander::{
    ExpanderState, ExpansionContext, PHONETIC_EXPANDER_NAME, QueryExpander,
};
use crate::expansion::token::{ExpansionSink, PHONETIC_PREFIX, QueryToken};

/// Trait for phonetic encoders.
pub trait PhoneticEncoder: Send + Sync {
    /// Primary phonetic code of `text`, or `None` if it has no encodable letters.
    fn primary(&self, text: &str) -> Option<String>;

    /// Get the name of this encoder.
    fn name(&self) -> &'static str;
}

/// Double Metaphone, truncated to four characters.
///
/// # Examples
///
/// ```
/// use rankwell::expansion::phonetic::{DoubleMetaphoneEncoder, PhoneticEncoder};
///
/// let metaphone = DoubleMetaphoneEncoder::new();
/// assert_eq!(metaphone.primary("Smith").as_deref(), Some("SM0"));
/// assert_eq!(metaphone.alternate("Smith").as_deref(), Some("XMT"));
/// ```
pub struct DoubleMetaphoneEncoder {
    inner: DoubleMetaphone,
}

impl DoubleMetaphoneEncoder {
    /// Create a new Double Metaphone encoder.
    pub fn new() -> Self {
        DoubleMetaphoneEncoder {
            inner: DoubleMetaphone::default(),
        }
    }

    /// Alternate code of `text`. Never used for expansion.
    pub fn alternate(&self, text: &str) -> Option<String> {
        non_empty(self.inner.encode_alternate(text))
    }
}

impl Default for DoubleMetaphoneEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DoubleMetaphoneEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DoubleMetaphoneEncoder")
    }
}

impl PhoneticEncoder for DoubleMetaphoneEncoder {
    fn primary(&self, text: &str) -> Option<String> {
        non_empty(self.inner.encode(text))
    }

    fn name(&self) -> &'static str {
        "double_metaphone"
    }
}

fn non_empty(code: String) -> Option<String> {
    if code.is_empty() { None } else { Some(code) }
}

/// American Soundex.
///
/// # Examples
///
/// ```
/// use rankwell::expansion::phonetic::{PhoneticEncoder, SoundexEncoder};
///
/// let soundex = SoundexEncoder::new();
/// assert_eq!(soundex.primary("Robert").as_deref(), Some("R163"));
/// assert_eq!(soundex.primary("Rupert").as_deref(), Some("R163"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundexEncoder;

impl SoundexEncoder {
    /// Length of a Soundex code.
    pub const CODE_LEN: usize = 4;

    /// Create a new Soundex encoder.
    pub fn new() -> Self {
        SoundexEncoder
    }

    /// Digit of a consonant; 0 for vowels, `None` for h and w.
    fn digit(c: char) -> Option<u8> {
        match c {
            'b' | 'f' | 'p' | 'v' => Some(1),
            'c' | 'g' | 'j' | 'k' | 'q' | 's' | 'x' | 'z' => Some(2),
            'd' | 't' => Some(3),
            'l' => Some(4),
            'm' | 'n' => Some(5),
            'r' => Some(6),
            'h' | 'w' => None,
            _ => Some(0),
        }
    }
}

impl PhoneticEncoder for SoundexEncoder {
    fn primary(&self, text: &str) -> Option<String> {
        let mut letters = text
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase());

        let first = letters.next()?;
        let mut code = String::with_capacity(Self::CODE_LEN);
        code.push(first.to_ascii_uppercase());

        let mut last = Self::digit(first);
        for c in letters {
            if code.len() == Self::CODE_LEN {
                break;
            }
            // h and w neither emit nor separate equal digits
            let Some(digit) = Self::digit(c) else {
                continue;
            };
            if digit != 0 && Some(digit) != last {
                code.push(char::from(b'0' + digit));
            }
            last = Some(digit);
        }

        while code.len() < Self::CODE_LEN {
            code.push('0');
        }
        Some(code)
    }

    fn name(&self) -> &'static str {
        "soundex"
    }
}

/// Expander emitting the phonetic code of a token.
pub struct PhoneticExpander {
    encoder: Box<dyn PhoneticEncoder>,
}

impl PhoneticExpander {
    /// Create a phonetic expander using Double Metaphone.
    pub fn new() -> Self {
        Self::with_encoder(Box::new(DoubleMetaphoneEncoder::new()))
    }

    /// Create a phonetic expander with a custom encoder.
    pub fn with_encoder(encoder: Box<dyn PhoneticEncoder>) -> Self {
        PhoneticExpander { encoder }
    }
}

impl Default for PhoneticExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PhoneticExpander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhoneticExpander")
            .field("encoder", &self.encoder.name())
            .finish()
    }
}

impl QueryExpander for PhoneticExpander {
    fn expand(
        &self,
        _ctx: &ExpansionContext<'_>,
        _state: &mut ExpanderState,
        token: &QueryToken,
        sink: &mut dyn ExpansionSink,
    ) -> Result<()> {
        if let Some(primary) = self.encoder.primary(token.text()) {
            trace!("phonetic code {primary} for '{}'", token.text());
            sink.expand_token(format!("{PHONETIC_PREFIX}{primary}"), 0);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        PHONETIC_EXPANDER_NAME
    }
}
