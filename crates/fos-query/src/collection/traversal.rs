//! Traversal: new collections relative to the primary node

use fos_dom::{Document, NodeId, NodeType};

use super::{matches, parse_selector, AsNode, NodeCollection};
use crate::{QueryError, QueryResult};

impl NodeCollection {
    /// Number of element siblings before the primary node. Text and comment
    /// siblings are skipped without ending the walk.
    pub fn index(&self) -> QueryResult<usize> {
        let node = self
            .first_node()
            .ok_or(QueryError::InvalidState("index() on an empty collection"))?;

        let doc = self.doc.borrow();
        let tree = &doc.tree;
        let mut count = 0;
        let mut prev = tree.prev_sibling(node);
        while let Some(sibling) = prev {
            if tree.is_element(sibling) {
                count += 1;
            }
            prev = tree.prev_sibling(sibling);
        }
        Ok(count)
    }

    pub fn parent(&self) -> Option<NodeCollection> {
        self.step(|doc, node| doc.tree.parent(node))
    }

    /// Child nodes of the primary node, optionally only those matching
    /// `filter`
    pub fn children(&self, filter: Option<&str>) -> NodeCollection {
        let Some(node) = self.first_node() else {
            return self.derive(Vec::new());
        };

        let nodes = {
            let doc = self.doc.borrow();
            let tree = &doc.tree;
            match filter {
                Some(selector) => match parse_selector(selector) {
                    Some(list) => tree
                        .children(node)
                        .filter(|&child| matches(tree, child, &list))
                        .collect(),
                    None => Vec::new(),
                },
                None => tree.children(node).collect(),
            }
        };
        self.derive(nodes)
    }

    /// First child node
    pub fn first(&self) -> Option<NodeCollection> {
        self.step(|doc, node| doc.tree.first_child(node))
    }

    /// Last child node
    pub fn last(&self) -> Option<NodeCollection> {
        self.step(|doc, node| doc.tree.last_child(node))
    }

    /// Previous sibling of any kind
    pub fn prev(&self) -> Option<NodeCollection> {
        self.step(|doc, node| doc.tree.prev_sibling(node))
    }

    /// Next sibling of any kind
    pub fn next(&self) -> Option<NodeCollection> {
        self.step(|doc, node| doc.tree.next_sibling(node))
    }

    pub fn prev_element(&self) -> Option<NodeCollection> {
        self.step(|doc, node| doc.tree.prev_element_sibling(node))
    }

    pub fn next_element(&self) -> Option<NodeCollection> {
        self.step(|doc, node| doc.tree.next_element_sibling(node))
    }

    /// Lowercased node names from the primary node upward, stopping before
    /// `context` (default: the body)
    pub fn get_path(&self, context: Option<NodeId>) -> Vec<String> {
        let Some(node) = self.first_node() else {
            return Vec::new();
        };

        let doc = self.doc.borrow();
        let tree = &doc.tree;
        let context = context.or_else(|| doc.body()).unwrap_or(NodeId::NONE);

        let mut path = vec![self.name.clone()];
        if node == context {
            return path;
        }
        let mut parent = tree.parent(node);
        while let Some(current) = parent {
            if current == context {
                break;
            }
            path.push(tree.node_name(current).to_lowercase());
            parent = tree.parent(current);
        }
        path
    }

    /// Whether `other` is a descendant of the primary node. A document
    /// contains every node that is not itself a document. `None` when this
    /// collection is empty.
    pub fn contains(&self, other: impl AsNode) -> Option<bool> {
        let node = self.first_node()?;
        let Some(other) = other.as_node() else {
            return Some(false);
        };

        let doc = self.doc.borrow();
        let tree = &doc.tree;
        if tree.node_type(node) == Some(NodeType::Document)
            && tree.node_type(other) != Some(NodeType::Document)
        {
            return Some(true);
        }
        Some(tree.ancestors(other).any(|ancestor| ancestor == node))
    }

    /// Descendants of the primary node matching `selector`. Empty unless the
    /// primary node is an element.
    pub fn find(&self, selector: &str) -> NodeCollection {
        let node = match self.first_node() {
            Some(node) if self.is_element() => node,
            _ => return self.derive(Vec::new()),
        };

        match self.query_all(node, selector) {
            Ok(nodes) => self.derive(nodes),
            Err(err) => {
                tracing::warn!("find({:?}) matched nothing: {}", selector, err);
                self.derive(Vec::new())
            }
        }
    }

    /// Nearest inclusive ancestor of the primary node matching `selector`
    pub fn closest(&self, selector: &str) -> NodeCollection {
        self.closest_with(selector, |doc, node| doc.tree.parent(node))
    }

    /// Like [`closest`](Self::closest), walking upward with `get_parent`
    /// instead of the parent link
    pub fn closest_with(
        &self,
        selector: &str,
        mut get_parent: impl FnMut(&Document, NodeId) -> Option<NodeId>,
    ) -> NodeCollection {
        let Some(list) = parse_selector(selector) else {
            return self.derive(Vec::new());
        };

        let found = {
            let doc = self.doc.borrow();
            let mut current = self.first_node();
            loop {
                match current {
                    Some(node) if matches(&doc.tree, node, &list) => break Some(node),
                    Some(node) => current = get_parent(&*doc, node),
                    None => break None,
                }
            }
        };
        self.derive(found.into_iter().collect())
    }

    fn query_all(&self, root: NodeId, selector: &str) -> QueryResult<Vec<NodeId>> {
        let doc = self.doc.borrow();
        Ok(doc.tree.query_selector_all(root, selector)?.into_vec())
    }

    /// One-step move from the primary node
    fn step(&self, f: impl FnOnce(&Document, NodeId) -> Option<NodeId>) -> Option<NodeCollection> {
        let node = self.first_node()?;
        let next = f(&*self.doc.borrow(), node)?;
        Some(self.derive(vec![next]))
    }
}
