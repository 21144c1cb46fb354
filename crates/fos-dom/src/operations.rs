//! DOM Node Operations
//!
//! Core node manipulation: appendChild, removeChild, insertBefore,
//! replaceChild, cloneNode.

use crate::{DomTree, Node, NodeId, NodeType};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type for the operation
    #[error("invalid node type")]
    InvalidNodeType,
    /// Reference node is not a child of the given parent
    #[error("node is not a child")]
    NotAChild,
    /// Selector text could not be parsed
    #[error("invalid selector: {0}")]
    Syntax(String),
}

impl DomTree {
    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_type = self.node_type(parent).ok_or(DomError::NotFound)?;
        let child_type = self.node_type(child).ok_or(DomError::NotFound)?;

        if !matches!(
            parent_type,
            NodeType::Element | NodeType::Document | NodeType::DocumentFragment
        ) {
            return Err(DomError::HierarchyRequest);
        }
        if child_type == NodeType::Document {
            return Err(DomError::InvalidNodeType);
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    /// Append a child node (moves it if already attached)
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `new_child` before `reference` (or at the end for `None`).
    /// Inserting a document fragment moves its children instead.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, new_child)?;
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild);
            }
        }

        if self.node_type(new_child) == Some(NodeType::DocumentFragment) {
            let children: Vec<NodeId> = self.children(new_child).collect();
            for child in children {
                self.insert_before(parent, child, reference)?;
            }
            return Ok(new_child);
        }

        let reference = match reference {
            Some(r) if r == new_child => self.next_sibling(new_child),
            other => other,
        };

        self.detach(new_child);
        self.link_before(parent, new_child, reference);
        Ok(new_child)
    }

    fn link_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        match reference {
            Some(next) => {
                let prev = self.node_mut(next).prev_sibling;
                {
                    let node = self.node_mut(child);
                    node.prev_sibling = prev;
                    node.next_sibling = next;
                }
                self.node_mut(next).prev_sibling = child;
                if prev.is_valid() {
                    self.node_mut(prev).next_sibling = child;
                } else {
                    self.node_mut(parent).first_child = child;
                }
            }
            None => {
                let last = self.node_mut(parent).last_child;
                {
                    let node = self.node_mut(child);
                    node.prev_sibling = last;
                    node.next_sibling = NodeId::NONE;
                }
                if last.is_valid() {
                    self.node_mut(last).next_sibling = child;
                } else {
                    self.node_mut(parent).first_child = child;
                }
                self.node_mut(parent).last_child = child;
            }
        }
        self.node_mut(child).parent = parent;
    }

    /// Unlink a node from its parent. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.node_mut(prev).next_sibling = next;
        } else {
            self.node_mut(parent).first_child = next;
        }
        if next.is_valid() {
            self.node_mut(next).prev_sibling = prev;
        } else {
            self.node_mut(parent).last_child = prev;
        }

        let node = self.node_mut(id);
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Remove a child node
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    /// Replace `old_child` with `new_child`, returning the removed node
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId> {
        if self.parent(old_child) != Some(parent) {
            return Err(DomError::NotAChild);
        }
        if new_child == old_child {
            return Ok(old_child);
        }
        self.check_insert(parent, new_child)?;

        let mut reference = self.next_sibling(old_child);
        if reference == Some(new_child) {
            reference = self.next_sibling(new_child);
        }
        self.detach(old_child);
        self.insert_before(parent, new_child, reference)?;
        Ok(old_child)
    }

    /// Remove every child of `id`
    pub fn remove_children(&mut self, id: NodeId) {
        while let Some(child) = self.first_child(id) {
            self.detach(child);
        }
    }

    /// Clone a node. The copy is detached; listeners are not copied.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let data = self.get(id).ok_or(DomError::NotFound)?.data.clone();
        let copy = self.push(Node::new(data));

        if deep {
            let children: Vec<NodeId> = self.children(id).collect();
            for child in children {
                let child_copy = self.clone_node(child, true)?;
                self.link_before(copy, child_copy, None);
            }
        }
        Ok(copy)
    }
}
