//! Flat coverage-guided expansion strategy.
//!
//! Prefers alternatives whose (symbol, expansion) key has never been used.
//! Once every alternative at a node is covered, a bounded-depth lookahead
//! ranks the alternatives by how much uncovered coverage is reachable below
//! them and takes the shallowest, highest-yield one. When nothing uncovered
//! is reachable at any depth the strategy abstains and the engine's
//! uniform-random default decides.

use std::collections::HashSet;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tessera_engine::{ChoiceContext, ExpansionStrategy};
use tessera_grammar::{nonterminals, Grammar};

use crate::coverage::{expansion_key, CoverageSet};
use crate::reachability::{max_expansion_coverage, max_symbol_expansion_coverage};

#[derive(Debug, Clone, Default)]
pub struct FlatCoverageStrategy {
    covered: CoverageSet,
}

impl FlatCoverageStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all coverage; the next run starts from zero.
    pub fn reset_coverage(&mut self) {
        self.covered.reset();
    }

    /// Keys covered so far.
    pub fn expansion_coverage(&self) -> &CoverageSet {
        &self.covered
    }

    /// Universe keys not yet covered.
    pub fn missing_coverage(&self, grammar: &Grammar) -> HashSet<String> {
        self.covered.missing_from(&max_expansion_coverage(grammar))
    }

    /// Uncovered keys obtainable by choosing `candidate` at `symbol` and
    /// then unfolding its nonterminals for at most `depth` hops; includes
    /// the candidate's own key.
    fn new_candidate_coverage(
        &self,
        grammar: &Grammar,
        symbol: &str,
        candidate: &str,
        depth: usize,
    ) -> HashSet<String> {
        let mut coverage = HashSet::new();
        for nt in nonterminals(candidate) {
            coverage.extend(max_symbol_expansion_coverage(grammar, &nt, depth));
        }
        coverage.insert(expansion_key(symbol, candidate));
        coverage.retain(|key| !self.covered.contains(key));
        coverage
    }
}

impl ExpansionStrategy for FlatCoverageStrategy {
    fn choose_expansion(
        &mut self,
        ctx: &ChoiceContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Option<usize> {
        let symbol = ctx.tree.symbol(ctx.node);

        // Uncovered-first: any alternative whose own key is fresh.
        let uncovered: Vec<usize> = ctx
            .alternatives
            .iter()
            .enumerate()
            .filter(|(_, alt)| !self.covered.contains(&expansion_key(symbol, alt)))
            .map(|(i, _)| i)
            .collect();
        if !uncovered.is_empty() {
            let index = uncovered[rng.gen_range(0..uncovered.len())];
            self.covered
                .insert_new(expansion_key(symbol, &ctx.alternatives[index]));
            return Some(index);
        }

        // All local keys covered: score by reachable uncovered coverage,
        // shallowest depth first. The scored sets only inform the choice;
        // the chosen alternative's own key is already covered, so nothing
        // new is marked here.
        for depth in 1..=ctx.grammar.len() {
            let coverages: Vec<HashSet<String>> = ctx
                .alternatives
                .iter()
                .map(|alt| self.new_candidate_coverage(ctx.grammar, symbol, alt, depth))
                .collect();
            let best = coverages.iter().map(HashSet::len).max().unwrap_or(0);
            if best == 0 {
                continue;
            }
            let tied: Vec<usize> = coverages
                .iter()
                .enumerate()
                .filter(|(_, cov)| cov.len() == best)
                .map(|(i, _)| i)
                .collect();
            return Some(tied[rng.gen_range(0..tied.len())]);
        }

        None
    }

    fn name(&self) -> &str {
        "flat_coverage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tessera_engine::DerivationTree;
    use tessera_grammar::samples::{digit_grammar, expr_grammar};

    fn root_context<'a>(
        grammar: &'a Grammar,
        tree: &'a DerivationTree,
        alternatives: &'a [String],
    ) -> ChoiceContext<'a> {
        ChoiceContext {
            grammar,
            tree,
            node: tree.root(),
            alternatives,
        }
    }

    #[test]
    fn test_uncovered_alternatives_preferred_until_exhausted() {
        let grammar = digit_grammar();
        let tree = DerivationTree::new("<digit>");
        let alternatives = grammar.alternatives("<digit>").unwrap().to_vec();
        let mut strategy = FlatCoverageStrategy::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let mut chosen = HashSet::new();
        for _ in 0..10 {
            let ctx = root_context(&grammar, &tree, &alternatives);
            let index = strategy.choose_expansion(&ctx, &mut rng).unwrap();
            // Never repeats an alternative while uncovered ones remain.
            assert!(chosen.insert(index));
        }
        assert_eq!(strategy.expansion_coverage().len(), 10);
    }

    #[test]
    fn test_lookahead_prefers_uncovered_subtree() {
        // Both <start> alternatives covered; only <b> still has uncovered
        // keys below it, so the lookahead must pick index 1.
        let grammar = Grammar::from_rules([
            ("<start>", vec!["<a>", "<b>"]),
            ("<a>", vec!["x"]),
            ("<b>", vec!["y", "z"]),
        ]);
        let tree = DerivationTree::new("<start>");
        let alternatives = grammar.alternatives("<start>").unwrap().to_vec();

        let mut strategy = FlatCoverageStrategy::new();
        strategy.covered.insert_new(expansion_key("<start>", "<a>"));
        strategy.covered.insert_new(expansion_key("<start>", "<b>"));
        strategy.covered.insert_new(expansion_key("<a>", "x"));
        strategy.covered.insert_new(expansion_key("<b>", "y"));

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..5 {
            let ctx = root_context(&grammar, &tree, &alternatives);
            assert_eq!(strategy.choose_expansion(&ctx, &mut rng), Some(1));
        }
    }

    #[test]
    fn test_abstains_when_everything_covered() {
        let grammar = digit_grammar();
        let tree = DerivationTree::new("<digit>");
        let alternatives = grammar.alternatives("<digit>").unwrap().to_vec();
        let mut strategy = FlatCoverageStrategy::new();
        for alt in &alternatives {
            strategy.covered.insert_new(expansion_key("<digit>", alt));
        }
        strategy.covered.insert_new(expansion_key("<start>", "<digit>"));

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let ctx = root_context(&grammar, &tree, &alternatives);
        assert_eq!(strategy.choose_expansion(&ctx, &mut rng), None);
    }

    #[test]
    fn test_reset_clears_coverage() {
        let grammar = expr_grammar();
        let tree = DerivationTree::new("<expr>");
        let alternatives = grammar.alternatives("<expr>").unwrap().to_vec();
        let mut strategy = FlatCoverageStrategy::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let ctx = root_context(&grammar, &tree, &alternatives);
        strategy.choose_expansion(&ctx, &mut rng).unwrap();
        assert_eq!(strategy.expansion_coverage().len(), 1);

        strategy.reset_coverage();
        assert!(strategy.expansion_coverage().is_empty());
        assert_eq!(
            strategy.missing_coverage(&grammar),
            max_expansion_coverage(&grammar)
        );
    }
}
