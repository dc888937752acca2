//! Arena-backed derivation tree.
//!
//! Nodes are identified by arena index, so "the same node occurrence" is
//! plain index equality even when two subtrees have identical content. A
//! tree is owned by one generation run and replaced wholesale on the next.

use std::fmt;

/// Arena index of a tree node.
pub type NodeId = usize;

/// One node in a derivation tree.
///
/// `children == None` marks an unexpanded nonterminal leaf, `Some([])` a
/// fully-terminal leaf, and a non-empty list an expanded nonterminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub symbol: String,
    pub children: Option<Vec<NodeId>>,
}

/// A derivation tree under construction.
#[derive(Debug, Clone)]
pub struct DerivationTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl DerivationTree {
    /// A fresh tree holding a single unexpanded root.
    pub fn new(start_symbol: &str) -> Self {
        Self {
            nodes: vec![TreeNode {
                symbol: start_symbol.to_string(),
                children: None,
            }],
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn symbol(&self, id: NodeId) -> &str {
        &self.nodes[id].symbol
    }

    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes[id].children.as_deref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node, returning its id.
    pub fn add_node(&mut self, symbol: &str, children: Option<Vec<NodeId>>) -> NodeId {
        self.nodes.push(TreeNode {
            symbol: symbol.to_string(),
            children,
        });
        self.nodes.len() - 1
    }

    /// Attach children to a node, expanding it.
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.nodes[id].children = Some(children);
    }

    /// Ids of all unexpanded nonterminal leaves under `id`, in depth-first
    /// left-to-right order.
    pub fn unexpanded_leaves(&self, id: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        self.collect_unexpanded(id, &mut leaves);
        leaves
    }

    fn collect_unexpanded(&self, id: NodeId, out: &mut Vec<NodeId>) {
        match self.children(id) {
            None => out.push(id),
            Some(children) => {
                for &c in children {
                    self.collect_unexpanded(c, out);
                }
            }
        }
    }

    /// Terminal flattening: concatenation of all terminal leaves under `id`.
    /// Unexpanded nonterminal leaves render as their symbol.
    pub fn all_terminals(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.flatten(id, &mut out);
        out
    }

    fn flatten(&self, id: NodeId, out: &mut String) {
        match self.children(id) {
            None => out.push_str(self.symbol(id)),
            Some([]) => out.push_str(self.symbol(id)),
            Some(children) => {
                for &c in children {
                    self.flatten(c, out);
                }
            }
        }
    }

    fn fmt_node(&self, id: NodeId, indent: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node(id);
        let marker = match &node.children {
            None => " (unexpanded)",
            Some(c) if c.is_empty() => " (terminal)",
            Some(_) => "",
        };
        writeln!(f, "{:indent$}{}{marker}", "", node.symbol, indent = indent)?;
        if let Some(children) = self.children(id) {
            for &c in children {
                self.fmt_node(c, indent + 2, f)?;
            }
        }
        Ok(())
    }
}

/// Indented rendering, diagnostic only.
impl fmt::Display for DerivationTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(self.root, 0, f)
    }
}
