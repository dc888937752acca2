//! Expansion keys and the covered-expansions set.

use std::collections::HashSet;

use tessera_engine::{DerivationTree, NodeId};

/// Separator between symbol and expansion text in a key.
pub const KEY_SEPARATOR: &str = " -> ";

/// Canonical key for applying `expansion` at `symbol`, independent of tree
/// position. Distinct (symbol, expansion) pairs give distinct keys because
/// symbols always end in `>` and never contain the separator.
pub fn expansion_key(symbol: &str, expansion: &str) -> String {
    format!("{symbol}{KEY_SEPARATOR}{expansion}")
}

/// Key for an already-expanded node, flattening its children to terminal
/// text first.
///
/// Only meaningful on fully-terminal subtrees: an unexpanded nonterminal
/// below `node` renders as its symbol, which collides with an expansion that
/// literally references that nonterminal. Callers must not pass partially
/// expanded subtrees.
pub fn node_expansion_key(tree: &DerivationTree, node: NodeId) -> String {
    let children = tree
        .children(node)
        .expect("node_expansion_key requires an expanded node");
    let mut text = String::new();
    for &c in children {
        text.push_str(&tree.all_terminals(c));
    }
    expansion_key(tree.symbol(node), &text)
}

/// Per-instance monotonic set of covered keys.
///
/// Grows during generation runs and shrinks only on explicit reset. The
/// selection logic only ever marks keys it just found uncovered, so a
/// duplicate insert means a bug in key computation or candidate filtering
/// and aborts loudly.
#[derive(Debug, Clone, Default)]
pub struct CoverageSet {
    covered: HashSet<String>,
}

impl CoverageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.covered.contains(key)
    }

    /// Insert a key that must not already be present.
    pub fn insert_new(&mut self, key: String) {
        assert!(
            self.covered.insert(key.clone()),
            "coverage key inserted twice: {key}"
        );
    }

    pub fn len(&self) -> usize {
        self.covered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }

    pub fn reset(&mut self) {
        self.covered.clear();
    }

    pub fn keys(&self) -> &HashSet<String> {
        &self.covered
    }

    /// Keys in `universe` not yet covered — the standard "remaining work"
    /// signal for a driver generating until full coverage.
    pub fn missing_from(&self, universe: &HashSet<String>) -> HashSet<String> {
        universe.difference(&self.covered).cloned().collect()
    }
}
