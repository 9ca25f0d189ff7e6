//! Per-document query evaluation result tree.
//!
//! The retrieval engine produces one [`ResultNode`] tree for every candidate
//! document. Scorers walk it recursively and never mutate it.
//!
//! # Node kinds
//!
//! - [`TermResult`] - a matched term with its corpus statistics
//! - [`AggregateResult`] - an intersection or union of child results
//! - [`VirtualResult`] - a synthetic match (numeric, geo, tag filters) without term statistics
//!
//! # Examples
//!
//! ```
//! use rankwell::scoring::result::ResultNode;
//!
//! let tree = ResultNode::intersect(
//!     vec![
//!         ResultNode::term("hello", 1.5, 1.0, 2).with_offsets(vec![1, 7]),
//!         ResultNode::term("world", 0.8, 1.0, 1).with_offsets(vec![2]),
//!     ],
//!     1.0,
//! );
//!
//! assert_eq!(tree.freq(), 3);
//! assert_eq!(tree.min_offset_delta(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Squared distance used when position-bearing children yield no gap.
const UNMEASURED_DISTANCE: u64 = 100;

/// Corpus-wide statistics of a matched term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    /// The term text as stored in the index.
    pub term: String,

    /// Inverse document frequency of the term.
    pub idf: f64,
}

/// How an aggregate combines the values of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    /// All children must match; child values are summed.
    Intersect,
    /// Children match alternatively; the maximum child value wins.
    Union,
}

impl AggregateKind {
    /// Fold a child value into the running value of the aggregate.
    pub fn combine(self, acc: f64, value: f64) -> f64 {
        match self {
            AggregateKind::Intersect => acc + value,
            AggregateKind::Union => acc.max(value),
        }
    }
}

/// A matched term leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermResult {
    /// Term statistics; absent terms are scored with an IDF of 0.
    #[serde(default)]
    pub term: Option<TermStats>,

    /// Query-time boost.
    pub weight: f64,

    /// Occurrences of the term in the document.
    pub freq: u32,

    /// Sorted token positions of the term in the document.
    #[serde(default)]
    pub offsets: Vec<u32>,
}

impl TermResult {
    /// IDF of the referenced term, or 0 when no statistics are attached.
    pub fn idf(&self) -> f64 {
        self.term.as_ref().map_or(0.0, |t| t.idf)
    }
}

/// An intersection or union of child results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Combination rule for the children.
    pub kind: AggregateKind,

    /// Children in evaluation order.
    pub children: Vec<ResultNode>,

    /// Boost applied to the combined child value.
    pub weight: f64,

    /// Aggregate frequency.
    pub freq: u32,
}

/// A synthetic match carrying only a weight and a frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualResult {
    /// Boost of the match.
    pub weight: f64,

    /// Match frequency.
    pub freq: u32,
}

/// A node of the result tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultNode {
    /// Term leaf.
    Term(TermResult),
    /// Intersect or union aggregate.
    Aggregate(AggregateResult),
    /// Synthetic leaf without term statistics.
    Virtual(VirtualResult),
}

impl ResultNode {
    /// Create a term leaf.
    pub fn term<S: Into<String>>(term: S, idf: f64, weight: f64, freq: u32) -> Self {
        ResultNode::Term(TermResult {
            term: Some(TermStats {
                term: term.into(),
                idf,
            }),
            weight,
            freq,
            offsets: Vec::new(),
        })
    }

    /// Create a virtual leaf.
    pub fn virtual_match(weight: f64, freq: u32) -> Self {
        ResultNode::Virtual(VirtualResult { weight, freq })
    }

    /// Create an intersect aggregate; its frequency is the sum of its children's.
    pub fn intersect(children: Vec<ResultNode>, weight: f64) -> Self {
        Self::aggregate(AggregateKind::Intersect, children, weight)
    }

    /// Create a union aggregate; its frequency is the sum of its children's.
    pub fn union(children: Vec<ResultNode>, weight: f64) -> Self {
        Self::aggregate(AggregateKind::Union, children, weight)
    }

    /// Create an aggregate of the given kind.
    pub fn aggregate(kind: AggregateKind, children: Vec<ResultNode>, weight: f64) -> Self {
        let freq = children.iter().map(ResultNode::freq).sum();
        ResultNode::Aggregate(AggregateResult {
            kind,
            children,
            weight,
            freq,
        })
    }

    /// Attach token positions to a term leaf. Other nodes are returned unchanged.
    pub fn with_offsets(mut self, mut offsets: Vec<u32>) -> Self {
        if let ResultNode::Term(term) = &mut self {
            offsets.sort_unstable();
            term.offsets = offsets;
        }
        self
    }

    /// Query-time weight of this node.
    pub fn weight(&self) -> f64 {
        match self {
            ResultNode::Term(t) => t.weight,
            ResultNode::Aggregate(a) => a.weight,
            ResultNode::Virtual(v) => v.weight,
        }
    }

    /// Frequency of this node in the document.
    pub fn freq(&self) -> u32 {
        match self {
            ResultNode::Term(t) => t.freq,
            ResultNode::Aggregate(a) => a.freq,
            ResultNode::Virtual(v) => v.freq,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[ResultNode] {
        match self {
            ResultNode::Aggregate(a) => &a.children,
            _ => &[],
        }
    }

    /// Whether this node carries token positions.
    pub fn has_offsets(&self) -> bool {
        match self {
            ResultNode::Term(t) => !t.offsets.is_empty(),
            ResultNode::Aggregate(a) => a.children.iter().any(ResultNode::has_offsets),
            ResultNode::Virtual(_) => false,
        }
    }

    /// All token positions under this node, sorted ascending.
    pub fn offsets(&self) -> Vec<u32> {
        match self {
            ResultNode::Term(t) => t.offsets.clone(),
            ResultNode::Aggregate(a) => {
                let mut merged: Vec<u32> = a.children.iter().flat_map(|c| c.offsets()).collect();
                merged.sort_unstable();
                merged
            }
            ResultNode::Virtual(_) => Vec::new(),
        }
    }

    /// Minimal positional gap between the matched children, used as a
    /// proximity divisor. Always at least 1.
    ///
    /// Consecutive position-bearing children are paired; for each pair the
    /// minimal absolute distance `cd` between their positions is taken and
    /// the result is `sqrt(sum(cd^2))`. If positions exist but the sum is 0
    /// (a lone positioned child, or children sharing positions) the squared
    /// distance is taken as 100. Without any positions the number of
    /// children minus one is reported instead.
    pub fn min_offset_delta(&self) -> u32 {
        let agg = match self {
            ResultNode::Aggregate(agg) if agg.children.len() > 1 => agg,
            _ => return 1,
        };

        let positioned: Vec<Vec<u32>> = agg
            .children
            .iter()
            .filter(|c| c.has_offsets())
            .map(ResultNode::offsets)
            .collect();

        let mut dist: u64 = positioned
            .windows(2)
            .map(|pair| {
                let cd = u64::from(min_distance(&pair[0], &pair[1]));
                cd * cd
            })
            .sum();

        if !positioned.is_empty() && dist == 0 {
            dist = UNMEASURED_DISTANCE;
        }

        let delta = if dist > 0 {
            (dist as f64).sqrt() as u32
        } else {
            (agg.children.len() - 1) as u32
        };

        delta.max(1)
    }
}

/// Minimal absolute distance between two sorted position lists.
fn min_distance(a: &[u32], b: &[u32]) -> u32 {
    let (mut i, mut j) = (0, 0);
    let mut best = u32::MAX;

    while i < a.len() && j < b.len() {
        let (p1, p2) = (a[i], b[j]);
        best = best.min(p1.abs_diff(p2));
        if best <= 1 {
            break;
        }
        if p2 > p1 {
            i += 1;
        } else {
            j += 1;
        }
    }

    best
}
