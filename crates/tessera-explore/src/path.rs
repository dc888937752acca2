//! Ancestor-chain paths.
//!
//! A path is the single-branch lineage of one node occurrence inside a
//! derivation tree: the root-to-node symbol spine, plus (after a candidate
//! expansion is attached) the candidate's children at the leaf. Unlike a
//! derivation tree a path never branches along the spine.

use serde::Serialize;
use tessera_engine::{DerivationTree, NodeId};
use tessera_grammar::Token;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path leaf already has children")]
    LeafAlreadyExpanded,
}

/// Root-to-node ancestor chain.
///
/// `spine` is never empty; `appended` stays `None` until a candidate's
/// children are attached at the leaf with [`AncestorPath::append`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AncestorPath {
    spine: Vec<String>,
    appended: Option<Vec<Token>>,
}

impl AncestorPath {
    /// Locate `node` under `root` by arena identity and return its lineage,
    /// or `None` when `node` does not occur below `root`. Two nodes with
    /// identical symbols are different occurrences with different ids, so
    /// the search never confuses them.
    pub fn to_node(tree: &DerivationTree, root: NodeId, node: NodeId) -> Option<Self> {
        let mut spine = Vec::new();
        if descend(tree, root, node, &mut spine) {
            Some(Self {
                spine,
                appended: None,
            })
        } else {
            None
        }
    }

    /// Number of ancestors above the target node.
    pub fn depth(&self) -> usize {
        self.spine.len() - 1
    }

    /// The target node's symbol.
    pub fn leaf_symbol(&self) -> &str {
        self.spine.last().expect("spine is never empty")
    }

    /// The target node plus its nearest `height` ancestors. `height` 0 is
    /// the node alone; heights past the root are clamped.
    pub fn subpath(&self, height: usize) -> AncestorPath {
        let start = self.spine.len().saturating_sub(height + 1);
        AncestorPath {
            spine: self.spine[start..].to_vec(),
            appended: self.appended.clone(),
        }
    }

    /// Attach candidate children at the leaf. The leaf must not already
    /// have children; overwriting is never allowed.
    pub fn append(&self, children: Vec<Token>) -> Result<AncestorPath, PathError> {
        if self.appended.is_some() {
            return Err(PathError::LeafAlreadyExpanded);
        }
        Ok(AncestorPath {
            spine: self.spine.clone(),
            appended: Some(children),
        })
    }

    /// Full structural serialization of the path, used as a coverage key.
    /// JSON escaping keeps distinct structures at distinct keys, and
    /// terminal/nonterminal children serialize differently, so two literally
    /// different expansions never collide.
    pub fn key(&self) -> String {
        serde_json::to_string(self).expect("path serialization cannot fail")
    }
}

fn descend(
    tree: &DerivationTree,
    current: NodeId,
    target: NodeId,
    spine: &mut Vec<String>,
) -> bool {
    spine.push(tree.symbol(current).to_string());
    if current == target {
        return true;
    }
    if let Some(children) = tree.children(current) {
        for &c in children {
            if descend(tree, c, target, spine) {
                return true;
            }
        }
    }
    spine.pop();
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `<start> -> <expr> -> [<expr>, " + ", <term>]`.
    fn sample_tree() -> (DerivationTree, NodeId, NodeId) {
        let mut tree = DerivationTree::new("<start>");
        let expr = tree.add_node("<expr>", None);
        tree.set_children(tree.root(), vec![expr]);
        let lhs = tree.add_node("<expr>", None);
        let plus = tree.add_node(" + ", Some(vec![]));
        let rhs = tree.add_node("<term>", None);
        tree.set_children(expr, vec![lhs, plus, rhs]);
        (tree, lhs, rhs)
    }

    #[test]
    fn test_path_to_node_spine() {
        let (tree, lhs, _) = sample_tree();
        let path = AncestorPath::to_node(&tree, tree.root(), lhs).unwrap();
        assert_eq!(path.depth(), 2);
        assert_eq!(path.leaf_symbol(), "<expr>");
    }

    #[test]
    fn test_path_distinguishes_identical_occurrences() {
        // lhs has the same symbol as its parent; identity search still
        // finds the inner occurrence, giving depth 2 not 1.
        let (tree, lhs, rhs) = sample_tree();
        let to_lhs = AncestorPath::to_node(&tree, tree.root(), lhs).unwrap();
        let to_rhs = AncestorPath::to_node(&tree, tree.root(), rhs).unwrap();
        assert_eq!(to_lhs.depth(), to_rhs.depth());
        assert_ne!(to_lhs.key(), to_rhs.key());
    }

    #[test]
    fn test_path_to_node_not_found() {
        let (tree, lhs, _) = sample_tree();
        // Search restricted to the lhs subtree cannot find the root.
        assert!(AncestorPath::to_node(&tree, lhs, tree.root()).is_none());
    }

    #[test]
    fn test_subpath_heights() {
        let (tree, lhs, _) = sample_tree();
        let path = AncestorPath::to_node(&tree, tree.root(), lhs).unwrap();
        assert_eq!(path.subpath(0).depth(), 0);
        assert_eq!(path.subpath(1).depth(), 1);
        assert_eq!(path.subpath(2).depth(), 2);
        // Clamped past the root.
        assert_eq!(path.subpath(99), path);
    }

    #[test]
    fn test_append_changes_key_and_rejects_second_append() {
        let (tree, lhs, _) = sample_tree();
        let path = AncestorPath::to_node(&tree, tree.root(), lhs).unwrap();
        let appended = path
            .append(vec![Token::Nonterminal("<term>".into())])
            .unwrap();
        assert_ne!(appended.key(), path.key());

        let err = appended.append(vec![Token::Terminal("x".into())]).unwrap_err();
        assert_eq!(err, PathError::LeafAlreadyExpanded);
    }

    #[test]
    fn test_terminal_and_nonterminal_children_serialize_apart() {
        let (tree, lhs, _) = sample_tree();
        let path = AncestorPath::to_node(&tree, tree.root(), lhs).unwrap();
        let as_terminal = path.append(vec![Token::Terminal("<term>".into())]).unwrap();
        let as_nonterminal = path
            .append(vec![Token::Nonterminal("<term>".into())])
            .unwrap();
        assert_ne!(as_terminal.key(), as_nonterminal.key());
    }
}
