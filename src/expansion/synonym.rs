//! Synonym map and the synonym expander.
//!
//! Every synonym group gets a numeric identifier. A query term found in the
//! map expands to the surrogate term of each group it belongs to, so the
//! retrieval layer matches any member of the group through one shared term.
//!
//! The term → groups mapping uses an FST (Finite State Transducer) for
//! memory-efficient storage and fast lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use fst::{Map, MapBuilder};
use log::debug;

use crate::error::{RankwellError, Result};
use crate::expansion::expander::{
    ExpanderState, ExpansionContext, QueryExpander, SYNONYMS_EXPANDER_NAME,
};
use crate::expansion::token::{ExpansionSink, QueryToken, SYNONYM_PREFIX};

/// Digits of the decimal part of a synonym group term.
pub const SYNONYM_ID_WIDTH: usize = 10;

/// Synonym groups of an index.
///
/// # Examples
///
/// ```
/// use rankwell::expansion::synonym::SynonymMap;
///
/// let map = SynonymMap::from_groups(vec![
///     vec!["big".to_string(), "large".to_string()],
///     vec!["large".to_string(), "wide".to_string()],
/// ])
/// .unwrap();
///
/// assert_eq!(map.ids_by_synonym("large"), Some(&[0, 1][..]));
/// assert_eq!(SynonymMap::id_to_str(1), "~0000000001");
/// ```
#[derive(Debug, Clone)]
pub struct SynonymMap {
    /// FST map: term -> index into group_ids
    fst_map: Arc<Map<Vec<u8>>>,
    /// Group identifiers of every term, indexed by FST values
    group_ids: Arc<Vec<Vec<u32>>>,
    num_groups: usize,
}

impl SynonymMap {
    /// Build a synonym map from groups of mutually synonymous terms.
    ///
    /// Group `i` gets identifier `i`. Terms are lowercased; a term may belong
    /// to several groups.
    pub fn from_groups(groups: Vec<Vec<String>>) -> Result<Self> {
        let num_groups = groups.len();
        let mut term_to_ids: BTreeMap<String, Vec<u32>> = BTreeMap::new();

        for (id, group) in groups.into_iter().enumerate() {
            let id = u32::try_from(id)
                .map_err(|_| RankwellError::analysis("too many synonym groups"))?;
            for term in group {
                let ids = term_to_ids.entry(term.to_lowercase()).or_default();
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }

        // BTreeMap iteration is sorted, as the FST builder requires
        let mut builder = MapBuilder::memory();
        let mut group_ids = Vec::with_capacity(term_to_ids.len());
        for (term, ids) in term_to_ids {
            builder
                .insert(term.as_bytes(), group_ids.len() as u64)
                .map_err(|e| RankwellError::parse(format!("FST build error: {e}")))?;
            group_ids.push(ids);
        }

        let fst_bytes = builder
            .into_inner()
            .map_err(|e| RankwellError::parse(format!("FST finalize error: {e}")))?;
        let fst_map = Map::new(fst_bytes)
            .map_err(|e| RankwellError::parse(format!("FST creation error: {e}")))?;

        debug!(
            "built synonym map with {} terms in {} groups",
            group_ids.len(),
            num_groups
        );

        Ok(SynonymMap {
            fst_map: Arc::new(fst_map),
            group_ids: Arc::new(group_ids),
            num_groups,
        })
    }

    /// Parse synonym groups from JSON.
    ///
    /// The JSON should contain an array of synonym groups, where each group
    /// is an array of terms that are synonyms of each other:
    ///
    /// ```json
    /// [
    ///   ["ml", "machine-learning"],
    ///   ["ai", "artificial-intelligence"]
    /// ]
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let groups: Vec<Vec<String>> = serde_json::from_str(json)?;
        Self::from_groups(groups)
    }

    /// Load synonym groups from a JSON file.
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RankwellError::config(format!(
                "Failed to read synonym file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Group identifiers the term belongs to.
    pub fn ids_by_synonym(&self, term: &str) -> Option<&[u32]> {
        let index = self.fst_map.get(term.as_bytes())? as usize;
        self.group_ids.get(index).map(Vec::as_slice)
    }

    /// Fixed-width surrogate term of a synonym group.
    pub fn id_to_str(id: u32) -> String {
        format!("{SYNONYM_PREFIX}{id:0width$}", width = SYNONYM_ID_WIDTH)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.group_ids.len()
    }

    /// Whether the map has no terms.
    pub fn is_empty(&self) -> bool {
        self.group_ids.is_empty()
    }

    /// Number of synonym groups.
    pub fn num_groups(&self) -> usize {
        self.num_groups
    }
}

/// Expander emitting the synonym group terms of a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynonymExpander;

impl SynonymExpander {
    /// Create a new synonym expander.
    pub fn new() -> Self {
        SynonymExpander
    }
}

impl QueryExpander for SynonymExpander {
    fn expand(
        &self,
        ctx: &ExpansionContext<'_>,
        _state: &mut ExpanderState,
        token: &QueryToken,
        sink: &mut dyn ExpansionSink,
    ) -> Result<()> {
        let Some(ids) = ctx
            .synonyms
            .and_then(|map| map.ids_by_synonym(token.text()))
        else {
            return Ok(());
        };

        for &id in ids {
            sink.expand_token(SynonymMap::id_to_str(id), 0);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        SYNONYMS_EXPANDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::language::Language;
    use crate::expansion::schema::IndexSchema;
    use crate::expansion::token::Expansion;

    fn groups() -> Vec<Vec<String>> {
        vec![
            vec!["big".to_string(), "large".to_string(), "huge".to_string()],
            vec!["Large".to_string(), "wide".to_string()],
        ]
    }

    #[test]
    fn test_lookup() {
        let map = SynonymMap::from_groups(groups()).unwrap();

        assert_eq!(map.ids_by_synonym("big"), Some(&[0][..]));
        assert_eq!(map.ids_by_synonym("large"), Some(&[0, 1][..]));
        assert_eq!(map.ids_by_synonym("wide"), Some(&[1][..]));
        assert_eq!(map.ids_by_synonym("small"), None);
        assert_eq!(map.len(), 4);
        assert_eq!(map.num_groups(), 2);
    }

    #[test]
    fn test_id_to_str_is_fixed_width() {
        assert_eq!(SynonymMap::id_to_str(0), "~0000000000");
        assert_eq!(SynonymMap::id_to_str(u32::MAX), "~4294967295");
    }

    #[test]
    fn test_from_json() {
        let map = SynonymMap::from_json(r#"[["ml", "machine-learning"]]"#).unwrap();
        assert_eq!(map.ids_by_synonym("machine-learning"), Some(&[0][..]));
        assert!(SynonymMap::from_json("not json").is_err());
    }

    #[test]
    fn test_empty_map() {
        let map = SynonymMap::from_groups(Vec::new()).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.num_groups(), 0);
        assert_eq!(map.ids_by_synonym("big"), None);
    }

    #[test]
    fn test_expander_emits_group_terms() {
        let map = SynonymMap::from_groups(groups()).unwrap();
        let schema = IndexSchema::new();
        let ctx = ExpansionContext::new(Language::English, &schema).with_synonyms(&map);
        let mut out: Vec<Expansion> = Vec::new();

        SynonymExpander::new()
            .expand(&ctx, &mut ExpanderState::new(), &QueryToken::new("large"), &mut out)
            .unwrap();

        let texts: Vec<_> = out.iter().filter_map(Expansion::text).collect();
        assert_eq!(texts, vec!["~0000000000", "~0000000001"]);
    }

    #[test]
    fn test_expander_without_map_is_noop() {
        let schema = IndexSchema::new();
        let ctx = ExpansionContext::new(Language::English, &schema);
        let mut out: Vec<Expansion> = Vec::new();

        SynonymExpander::new()
            .expand(&ctx, &mut ExpanderState::new(), &QueryToken::new("big"), &mut out)
            .unwrap();

        assert!(out.is_empty());
    }
}
