//! Human-readable score explanations.
//!
//! An explanation is only built when the [`ScoringContext`] requests it. Every
//! recursive scoring call returns a [`Scored`] value whose `explain` field is
//! `None` on the disabled path, so no text is formatted and no child vector is
//! allocated anywhere in the recursion.
//!
//! [`ScoringContext`]: crate::scoring::context::ScoringContext

use std::fmt;

use serde::{Deserialize, Serialize};

/// One node of an explanation tree.
///
/// The children mirror, in visiting order, the child results that produced
/// this node's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreExplain {
    /// Formatted description of the computation.
    pub text: String,

    /// Explanations of the recursive calls, in visiting order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ScoreExplain>,
}

impl ScoreExplain {
    /// Create an explanation without children.
    pub fn leaf<S: Into<String>>(text: S) -> Self {
        ScoreExplain {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Create an explanation with children.
    pub fn with_children<S: Into<String>>(text: S, children: Vec<ScoreExplain>) -> Self {
        ScoreExplain {
            text: text.into(),
            children,
        }
    }

    /// Wrap a child explanation, if any, under a new parent.
    pub fn wrap<S: Into<String>>(text: S, child: Option<ScoreExplain>) -> Self {
        ScoreExplain {
            text: text.into(),
            children: child.into_iter().collect(),
        }
    }

    /// Total number of nodes in this explanation.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ScoreExplain::node_count).sum::<usize>()
    }

    /// Render the explanation as an indented tree.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&self.text);
        out.push('\n');
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }
}

impl fmt::Display for ScoreExplain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render().trim_end())
    }
}

/// A value returned by one recursive scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    /// The computed value.
    pub value: f64,

    /// The explanation, present only when explanation was requested.
    pub explain: Option<ScoreExplain>,
}

impl Scored {
    /// A value with an explanation built lazily from `text` when `explain` is set.
    pub fn new<F>(value: f64, explain: bool, text: F) -> Self
    where
        F: FnOnce() -> String,
    {
        Scored {
            value,
            explain: explain.then(|| ScoreExplain::leaf(text())),
        }
    }
}
