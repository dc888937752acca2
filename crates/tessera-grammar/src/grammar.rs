//! Context-free grammar representation.
//!
//! A grammar maps each nonterminal to its ordered expansion alternatives.
//! Alternative order matters (it defines candidate indices at a choice
//! point); nonterminal iteration uses a BTreeMap so that whole-grammar
//! computations are deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Conventional start symbol.
pub const START_SYMBOL: &str = "<start>";

/// Immutable grammar: nonterminal -> ordered expansion alternatives.
///
/// Grammars are supplied by the caller and never mutated for the lifetime of
/// a fuzzer instance. Deserializes from the obvious JSON object form:
///
/// ```json
/// { "<start>": ["<digit>"], "<digit>": ["0", "1"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grammar {
    rules: BTreeMap<String, Vec<String>>,
}

impl Grammar {
    /// Build a grammar from (nonterminal, alternatives) pairs.
    pub fn from_rules<I, S, A>(rules: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<A>)>,
        S: Into<String>,
        A: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(sym, alts)| {
                    (sym.into(), alts.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// Alternatives for a nonterminal, in definition order.
    pub fn alternatives(&self, symbol: &str) -> Option<&[String]> {
        self.rules.get(symbol).map(Vec::as_slice)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    /// Number of distinct nonterminals.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All defined nonterminals, in deterministic (sorted) order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// (nonterminal, alternatives) pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rules.iter().map(|(s, a)| (s.as_str(), a.as_slice()))
    }
}
