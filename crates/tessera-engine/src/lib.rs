pub mod engine;
pub mod strategy;
pub mod trace;
pub mod tree;

pub use engine::{ExpansionEngine, ExpansionError};
pub use strategy::{ChoiceContext, ExpansionStrategy, UniformRandomStrategy};
pub use tree::{DerivationTree, NodeId, TreeNode};
