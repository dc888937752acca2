//! Path coverage-guided expansion strategy.
//!
//! Refines flat coverage: the unit of coverage is "expansion applied under
//! an ancestor context of height h". Low heights are tried first, so the
//! strategy first behaves like flat coverage of the node's own context and
//! then works outward to pairs, triples and deeper nestings of rules.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tessera_engine::{ChoiceContext, ExpansionStrategy};
use tessera_grammar::tokenize;

use crate::coverage::CoverageSet;
use crate::path::AncestorPath;

#[derive(Debug, Clone, Default)]
pub struct PathCoverageStrategy {
    covered: CoverageSet,
}

impl PathCoverageStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all coverage; the next run starts from zero. The tree itself
    /// arrives fresh in every `ChoiceContext`, so there is no tree
    /// reference to clear here.
    pub fn reset_coverage(&mut self) {
        self.covered.reset();
    }

    /// Serialized path keys covered so far.
    pub fn covered_paths(&self) -> &CoverageSet {
        &self.covered
    }
}

impl ExpansionStrategy for PathCoverageStrategy {
    fn choose_expansion(
        &mut self,
        ctx: &ChoiceContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Option<usize> {
        let path = AncestorPath::to_node(ctx.tree, ctx.tree.root(), ctx.node)?;

        for height in 0..=path.depth() {
            let sub = path.subpath(height);
            let mut fresh_indices = Vec::new();
            let mut fresh_keys = Vec::new();
            for (i, alt) in ctx.alternatives.iter().enumerate() {
                let candidate = sub
                    .append(tokenize(alt))
                    .expect("subpath of a node lineage has no appended children");
                let key = candidate.key();
                if !self.covered.contains(&key) {
                    fresh_indices.push(i);
                    fresh_keys.push(key);
                }
            }
            if !fresh_indices.is_empty() {
                let pick = rng.gen_range(0..fresh_indices.len());
                self.covered.insert_new(fresh_keys.swap_remove(pick));
                return Some(fresh_indices[pick]);
            }
        }

        // Every candidate is covered in every available context height.
        None
    }

    fn name(&self) -> &str {
        "path_coverage"
    }
}
