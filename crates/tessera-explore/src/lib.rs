//! Coverage-guided expansion strategies.
//!
//! Two strategies plug into the engine's `ExpansionStrategy` seam:
//!
//! - [`flat::FlatCoverageStrategy`] tracks which (nonterminal, expansion)
//!   pairs have been exercised and steers generation toward uncovered ones,
//!   looking ahead through the grammar when everything local is covered.
//! - [`combinatorial::PathCoverageStrategy`] refines the unit of coverage to
//!   "expansion applied under a bounded-height ancestor context",
//!   approximating combinatorial coverage of nested rule uses.

pub mod combinatorial;
pub mod coverage;
pub mod flat;
pub mod path;
pub mod reachability;

pub use combinatorial::PathCoverageStrategy;
pub use coverage::{expansion_key, node_expansion_key, CoverageSet};
pub use flat::FlatCoverageStrategy;
pub use path::{AncestorPath, PathError};
pub use reachability::{max_expansion_coverage, max_symbol_expansion_coverage};
