//! Element Query and Methods
//!
//! querySelectorAll, matches, closest and the static NodeList they return.

use crate::{DomResult, DomTree, NodeId, SelectorList};

/// Ordered, static list of nodes (the result of a query or a child snapshot)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList {
    nodes: Vec<NodeId>,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn length(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn into_vec(self) -> Vec<NodeId> {
        self.nodes
    }
}

impl IntoIterator for NodeList {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl FromIterator<NodeId> for NodeList {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl DomTree {
    /// Whether `node` is an element matching `selector`
    pub fn matches(&self, node: NodeId, selector: &str) -> DomResult<bool> {
        let list = SelectorList::parse(selector)?;
        Ok(list.matches(self, node))
    }

    /// All descendant elements of `root` matching `selector`, in document order
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> DomResult<NodeList> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(root)
            .into_iter()
            .filter(|&node| list.matches(self, node))
            .collect())
    }

    /// First descendant element of `root` matching `selector`
    pub fn query_selector(&self, root: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(root)
            .into_iter()
            .find(|&node| list.matches(self, node)))
    }

    /// Closest inclusive ancestor of `node` matching `selector`
    pub fn closest(&self, node: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|&candidate| list.matches(self, candidate)))
    }
}
