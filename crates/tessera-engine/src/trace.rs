//! Structured record of expansion decisions.

use crate::tree::NodeId;

/// One recorded expansion choice.
#[derive(Debug, Clone)]
pub struct Decision {
    /// Step number, monotonic within one engine instance.
    pub step: u64,
    /// The node that was expanded.
    pub node: NodeId,
    /// The node's nonterminal symbol.
    pub symbol: String,
    /// The chosen expansion text.
    pub expansion: String,
    /// Index into the candidate list presented to the strategy.
    pub index: usize,
    /// Name of the strategy consulted.
    pub strategy: String,
    /// True when the strategy had no preference and the engine's
    /// uniform-random default decided.
    pub fallback: bool,
}

/// Full decision trace for an engine instance.
#[derive(Debug, Clone, Default)]
pub struct DecisionTrace {
    decisions: Vec<Decision>,
    next_step: u64,
}

impl DecisionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        node: NodeId,
        symbol: &str,
        expansion: &str,
        index: usize,
        strategy: &str,
        fallback: bool,
    ) {
        self.decisions.push(Decision {
            step: self.next_step,
            node,
            symbol: symbol.to_string(),
            expansion: expansion.to_string(),
            index,
            strategy: strategy.to_string(),
            fallback,
        });
        self.next_step += 1;
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn clear(&mut self) {
        self.decisions.clear();
    }
}
