//! Derivation-tree expansion engine.
//!
//! Expands a start symbol down to terminals in three phases, following the
//! classic grammar-fuzzer shape: grow the tree using maximum-cost expansions
//! until it holds `min_nonterminals` open leaves, expand freely until
//! `max_nonterminals`, then close every remaining leaf with minimum-cost
//! expansions so generation terminates on recursive grammars.
//!
//! The engine is dumb pipes: at every node it asks the strategy which
//! alternative to apply and only falls back to a uniform-random pick when
//! the strategy has no preference.

use std::collections::HashSet;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tessera_grammar::{nonterminals, tokenize, Grammar, START_SYMBOL};

use crate::strategy::{ChoiceContext, ExpansionStrategy};
use crate::trace::DecisionTrace;
use crate::tree::{DerivationTree, NodeId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExpansionError {
    #[error("nonterminal {0} is not defined in the grammar")]
    UndefinedSymbol(String),

    #[error("nonterminal {0} has no expansion alternatives")]
    NoAlternatives(String),
}

/// How the engine filters candidate alternatives at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Only maximum-cost alternatives (tree growth).
    MaxCost,
    /// All alternatives.
    Random,
    /// Only minimum-cost alternatives (tree closing).
    MinCost,
}

/// The expansion engine. Owns the generation loop and the decision trace;
/// the tree lives for one run and is returned to the caller.
pub struct ExpansionEngine<'a> {
    grammar: &'a Grammar,
    start_symbol: String,
    min_nonterminals: usize,
    max_nonterminals: usize,
    trace: DecisionTrace,
}

impl<'a> ExpansionEngine<'a> {
    pub fn new(grammar: &'a Grammar) -> Self {
        Self::with_limits(grammar, 0, 10)
    }

    pub fn with_limits(
        grammar: &'a Grammar,
        min_nonterminals: usize,
        max_nonterminals: usize,
    ) -> Self {
        Self {
            grammar,
            start_symbol: START_SYMBOL.to_string(),
            min_nonterminals,
            max_nonterminals,
            trace: DecisionTrace::new(),
        }
    }

    pub fn with_start_symbol(mut self, symbol: &str) -> Self {
        self.start_symbol = symbol.to_string();
        self
    }

    pub fn trace(&self) -> &DecisionTrace {
        &self.trace
    }

    /// Run one generation and return the finished derivation tree.
    pub fn fuzz_tree(
        &mut self,
        strategy: &mut dyn ExpansionStrategy,
        rng: &mut ChaCha8Rng,
    ) -> Result<DerivationTree, ExpansionError> {
        strategy.begin_run();
        let mut tree = DerivationTree::new(&self.start_symbol);
        self.expand_phase(&mut tree, strategy, rng, Phase::MaxCost, Some(self.min_nonterminals))?;
        self.expand_phase(&mut tree, strategy, rng, Phase::Random, Some(self.max_nonterminals))?;
        self.expand_phase(&mut tree, strategy, rng, Phase::MinCost, None)?;
        Ok(tree)
    }

    /// Run one generation and return the terminal string.
    pub fn fuzz(
        &mut self,
        strategy: &mut dyn ExpansionStrategy,
        rng: &mut ChaCha8Rng,
    ) -> Result<String, ExpansionError> {
        let tree = self.fuzz_tree(strategy, rng)?;
        Ok(tree.all_terminals(tree.root()))
    }

    /// Expand until no unexpanded leaves remain, or until their count
    /// reaches `limit`.
    fn expand_phase(
        &mut self,
        tree: &mut DerivationTree,
        strategy: &mut dyn ExpansionStrategy,
        rng: &mut ChaCha8Rng,
        phase: Phase,
        limit: Option<usize>,
    ) -> Result<(), ExpansionError> {
        loop {
            let unexpanded = tree.unexpanded_leaves(tree.root());
            if unexpanded.is_empty() {
                return Ok(());
            }
            if let Some(limit) = limit {
                if unexpanded.len() >= limit {
                    return Ok(());
                }
            }
            let node = unexpanded[rng.gen_range(0..unexpanded.len())];
            self.expand_node(tree, node, strategy, rng, phase)?;
        }
    }

    /// Expand a single node: filter alternatives by phase, consult the
    /// strategy, rewrite the node into children.
    fn expand_node(
        &mut self,
        tree: &mut DerivationTree,
        node: NodeId,
        strategy: &mut dyn ExpansionStrategy,
        rng: &mut ChaCha8Rng,
        phase: Phase,
    ) -> Result<(), ExpansionError> {
        let symbol = tree.symbol(node).to_string();
        let alternatives = self
            .grammar
            .alternatives(&symbol)
            .ok_or_else(|| ExpansionError::UndefinedSymbol(symbol.clone()))?;
        if alternatives.is_empty() {
            return Err(ExpansionError::NoAlternatives(symbol));
        }

        let candidates: Vec<String> = match phase {
            Phase::Random => alternatives.to_vec(),
            Phase::MaxCost | Phase::MinCost => {
                let mut seen = HashSet::new();
                seen.insert(symbol.clone());
                let costs = alternatives
                    .iter()
                    .map(|alt| self.expansion_cost(alt, &seen))
                    .collect::<Result<Vec<_>, _>>()?;
                let (init, combine): (f64, fn(f64, f64) -> f64) = match phase {
                    Phase::MaxCost => (f64::NEG_INFINITY, f64::max),
                    _ => (f64::INFINITY, f64::min),
                };
                let target = costs.iter().copied().fold(init, combine);
                alternatives
                    .iter()
                    .zip(&costs)
                    .filter(|(_, &cost)| cost == target)
                    .map(|(alt, _)| alt.clone())
                    .collect()
            }
        };

        let ctx = ChoiceContext {
            grammar: self.grammar,
            tree,
            node,
            alternatives: &candidates,
        };
        let (index, fallback) = match strategy.choose_expansion(&ctx, rng) {
            Some(index) => (index, false),
            None => (rng.gen_range(0..candidates.len()), true),
        };
        self.trace
            .record(node, &symbol, &candidates[index], index, strategy.name(), fallback);

        let children: Vec<NodeId> = tokenize(&candidates[index])
            .iter()
            .map(|token| {
                let children = if token.is_nonterminal() { None } else { Some(Vec::new()) };
                tree.add_node(token.symbol(), children)
            })
            .collect();
        tree.set_children(node, children);
        Ok(())
    }

    /// Minimum cost of closing `symbol`, infinite when every alternative
    /// recurses into a symbol already being expanded.
    fn symbol_cost(&self, symbol: &str, seen: &HashSet<String>) -> Result<f64, ExpansionError> {
        let alternatives = self
            .grammar
            .alternatives(symbol)
            .ok_or_else(|| ExpansionError::UndefinedSymbol(symbol.to_string()))?;
        if alternatives.is_empty() {
            return Err(ExpansionError::NoAlternatives(symbol.to_string()));
        }
        let mut seen = seen.clone();
        seen.insert(symbol.to_string());
        let mut min = f64::INFINITY;
        for alt in alternatives {
            min = min.min(self.expansion_cost(alt, &seen)?);
        }
        Ok(min)
    }

    /// Cost of one expansion: 1 plus the closing cost of every referenced
    /// nonterminal, infinite if any of them is in `seen`.
    fn expansion_cost(
        &self,
        expansion: &str,
        seen: &HashSet<String>,
    ) -> Result<f64, ExpansionError> {
        let symbols = nonterminals(expansion);
        if symbols.is_empty() {
            return Ok(1.0);
        }
        if symbols.iter().any(|s| seen.contains(s)) {
            return Ok(f64::INFINITY);
        }
        let mut total = 1.0;
        for s in &symbols {
            total += self.symbol_cost(s, seen)?;
        }
        Ok(total)
    }
}
