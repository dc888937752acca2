//! Reachable-coverage computation.
//!
//! Which expansion keys can still be discovered by unfolding a symbol for a
//! bounded number of nonterminal hops. The traversal is an explicit work
//! queue with a visited set shared across the whole call, so each symbol is
//! expanded at most once per top-level call and the computation terminates
//! on recursive grammars regardless of the depth bound.

use std::collections::{HashSet, VecDeque};

use tessera_grammar::{nonterminals, Grammar};

use crate::coverage::expansion_key;

/// Depth bound meaning "unfold without limit".
pub const UNBOUNDED: usize = usize::MAX;

/// All expansion keys reachable from `symbol` within `max_depth` nonterminal
/// hops. Depth 0 reaches nothing.
///
/// Panics if a referenced nonterminal is missing from the grammar: that is a
/// malformed grammar supplied by the caller, not a recoverable condition.
pub fn max_symbol_expansion_coverage(
    grammar: &Grammar,
    symbol: &str,
    max_depth: usize,
) -> HashSet<String> {
    let mut coverage = HashSet::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<(String, usize)> = VecDeque::new();
    queue.push_back((symbol.to_string(), max_depth));

    while let Some((sym, depth)) = queue.pop_front() {
        if depth == 0 {
            continue;
        }
        if !visited.insert(sym.clone()) {
            continue;
        }
        let alternatives = grammar
            .alternatives(&sym)
            .unwrap_or_else(|| panic!("nonterminal {sym} is not defined in the grammar"));
        for alt in alternatives {
            coverage.insert(expansion_key(&sym, alt));
            for nt in nonterminals(alt) {
                if !visited.contains(&nt) {
                    queue.push_back((nt, depth - 1));
                }
            }
        }
    }

    coverage
}

/// The full expansion-coverage universe: one key per nonterminal ×
/// alternative, constant per grammar.
pub fn max_expansion_coverage(grammar: &Grammar) -> HashSet<String> {
    let mut coverage = HashSet::new();
    for (symbol, alternatives) in grammar.iter() {
        for alt in alternatives {
            coverage.insert(expansion_key(symbol, alt));
        }
    }
    coverage
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_grammar::samples::{digit_grammar, expr_grammar};
    use tessera_grammar::START_SYMBOL;

    #[test]
    fn test_universe_size_digit_grammar() {
        // 1 <start> alternative + 10 <digit> alternatives.
        assert_eq!(max_expansion_coverage(&digit_grammar()).len(), 11);
    }

    #[test]
    fn test_depth_zero_is_empty() {
        let g = digit_grammar();
        assert!(max_symbol_expansion_coverage(&g, START_SYMBOL, 0).is_empty());
    }

    #[test]
    fn test_depth_one_covers_own_alternatives_only() {
        let g = digit_grammar();
        let cov = max_symbol_expansion_coverage(&g, START_SYMBOL, 1);
        assert_eq!(cov.len(), 1);
        assert!(cov.contains("<start> -> <digit>"));
    }

    #[test]
    fn test_depth_grows_monotonically() {
        let g = expr_grammar();
        let mut previous = 0;
        for depth in 0..=g.len() {
            let size = max_symbol_expansion_coverage(&g, START_SYMBOL, depth).len();
            assert!(size >= previous);
            previous = size;
        }
    }

    #[test]
    fn test_unbounded_equals_universe_when_all_reachable() {
        for g in [digit_grammar(), expr_grammar()] {
            assert_eq!(
                max_symbol_expansion_coverage(&g, START_SYMBOL, UNBOUNDED),
                max_expansion_coverage(&g)
            );
        }
    }

    #[test]
    fn test_terminates_on_cyclic_grammar() {
        // <a> and <b> reference each other; the visited set stops the loop.
        let g = tessera_grammar::Grammar::from_rules([
            ("<start>", vec!["<a>"]),
            ("<a>", vec!["<b>", "x"]),
            ("<b>", vec!["<a>", "y"]),
        ]);
        let cov = max_symbol_expansion_coverage(&g, START_SYMBOL, UNBOUNDED);
        assert_eq!(cov, max_expansion_coverage(&g));
    }

    #[test]
    #[should_panic(expected = "not defined in the grammar")]
    fn test_missing_nonterminal_panics() {
        let g = tessera_grammar::Grammar::from_rules([("<start>", vec!["<ghost>"])]);
        max_symbol_expansion_coverage(&g, START_SYMBOL, UNBOUNDED);
    }
}
