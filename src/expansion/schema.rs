//! The slice of the index schema consulted during expansion.

use serde::{Deserialize, Serialize};

use crate::error::{RankwellError, Result};
use crate::expansion::token::{FIELD_MASK_ALL, FieldMask};

/// Maximum number of fields addressable by a [`FieldMask`].
pub const MAX_FIELDS: usize = FieldMask::BITS as usize;

/// A text field of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,

    /// Whether phonetic codes are indexed for this field.
    #[serde(default)]
    pub phonetic: bool,
}

/// Fields of an index, in field-mask bit order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSchema {
    #[serde(default)]
    fields: Vec<FieldSpec>,
}

impl IndexSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Names must be unique and at most [`MAX_FIELDS`] fields fit.
    pub fn add_field<S: Into<String>>(&mut self, name: S, phonetic: bool) -> Result<()> {
        let name = name.into();
        if self.fields.iter().any(|f| f.name == name) {
            return Err(RankwellError::config(format!(
                "field '{name}' is already defined"
            )));
        }
        if self.fields.len() >= MAX_FIELDS {
            return Err(RankwellError::config(format!(
                "cannot define more than {MAX_FIELDS} fields"
            )));
        }
        self.fields.push(FieldSpec { name, phonetic });
        Ok(())
    }

    /// Builder-style [`add_field`](Self::add_field).
    pub fn with_field<S: Into<String>>(mut self, name: S, phonetic: bool) -> Result<Self> {
        self.add_field(name, phonetic)?;
        Ok(self)
    }

    /// Fields in bit order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Whether any field supports phonetics.
    pub fn has_phonetic(&self) -> bool {
        self.fields.iter().any(|f| f.phonetic)
    }

    /// Bit of the named field.
    pub fn field_bit(&self, name: &str) -> Option<FieldMask> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| 1 << i)
    }

    /// Mask of the named fields; unknown names are an error.
    pub fn field_mask<S: AsRef<str>>(&self, names: &[S]) -> Result<FieldMask> {
        names.iter().try_fold(0, |mask, name| {
            let name = name.as_ref();
            self.field_bit(name)
                .map(|bit| mask | bit)
                .ok_or_else(|| RankwellError::query(format!("unknown field '{name}'")))
        })
    }

    /// Whether at least one field selected by `mask` supports phonetics.
    pub fn check_phonetic_enabled(&self, mask: FieldMask) -> bool {
        if mask == FIELD_MASK_ALL {
            return self.has_phonetic();
        }
        self.fields
            .iter()
            .enumerate()
            .any(|(i, f)| f.phonetic && mask & (1 << i) != 0)
    }
}
