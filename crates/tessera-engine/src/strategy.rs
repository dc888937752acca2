//! Pluggable expansion-choice strategies.
//!
//! The engine walks the tree and rewrites nodes; the strategy is the brain
//! that picks which alternative to apply at a node. A strategy that has no
//! preference returns `None` and the engine falls back to uniform random.

use rand_chacha::ChaCha8Rng;
use tessera_grammar::Grammar;

use crate::tree::{DerivationTree, NodeId};

/// Everything a strategy may consult when choosing an expansion.
///
/// The tree under construction is passed explicitly on every call, so
/// strategies never carry a reference to a stale tree between runs.
pub struct ChoiceContext<'a> {
    pub grammar: &'a Grammar,
    /// The tree currently being built.
    pub tree: &'a DerivationTree,
    /// The node being expanded. Its symbol is `tree.symbol(node)`.
    pub node: NodeId,
    /// Candidate expansion alternatives, in grammar order (possibly filtered
    /// by the engine's expansion phase).
    pub alternatives: &'a [String],
}

/// A decision function invoked once per node needing expansion.
pub trait ExpansionStrategy {
    /// Pick an index into `ctx.alternatives`, or `None` to delegate to the
    /// engine's uniform-random default.
    ///
    /// All randomness comes from `rng`; the caller's seed fully determines
    /// behavior.
    fn choose_expansion(&mut self, ctx: &ChoiceContext<'_>, rng: &mut ChaCha8Rng)
        -> Option<usize>;

    /// Called by the engine at the start of each generation run.
    fn begin_run(&mut self) {}

    /// Name of this strategy (for tracing).
    fn name(&self) -> &str;
}

/// The no-preference strategy: always delegates, so every choice is the
/// engine's uniform-random default. Useful as a baseline in tests.
pub struct UniformRandomStrategy;

impl ExpansionStrategy for UniformRandomStrategy {
    fn choose_expansion(
        &mut self,
        _ctx: &ChoiceContext<'_>,
        _rng: &mut ChaCha8Rng,
    ) -> Option<usize> {
        None
    }

    fn name(&self) -> &str {
        "uniform_random"
    }
}
