//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: detaching a node only unlinks it, so a `NodeId`
//! stays valid for the lifetime of the tree.

use crate::{InternedString, Node, NodeData, NodeId, NodeList, NodeType, StringInterner};

/// Arena-based DOM tree for memory efficiency
#[derive(Debug, Clone)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node (`NodeId::ROOT`)
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve an interned tag name
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    /// Access the interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Access the interner mutably
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    // ------------------------------------------------------------------
    // Node creation. New nodes are detached.
    // ------------------------------------------------------------------

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create an element; the tag name is lowercased
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(Node::element(name))
    }

    /// Create a text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text.to_string()))
    }

    /// Create a comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::new(NodeData::Comment(text.to_string())))
    }

    /// Create a doctype node
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.push(Node::new(NodeData::Doctype {
            name,
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }))
    }

    /// Create an empty document fragment
    pub fn create_fragment(&mut self) -> NodeId {
        self.push(Node::new(NodeData::DocumentFragment))
    }

    // ------------------------------------------------------------------
    // Node kind and names
    // ------------------------------------------------------------------

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.get(id).map(Node::node_type)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Lowercase tag name for elements
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| self.resolve(e.name))
    }

    /// DOM `nodeName`: uppercase tag for elements, `#text` etc. otherwise
    pub fn node_name(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match &node.data {
            NodeData::Element(e) => self.resolve(e.name).to_ascii_uppercase(),
            NodeData::Text(_) => "#text".to_string(),
            NodeData::Comment(_) => "#comment".to_string(),
            NodeData::Document => "#document".to_string(),
            NodeData::DocumentFragment => "#document-fragment".to_string(),
            NodeData::Doctype { name, .. } => self.resolve(*name).to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    fn link(&self, id: NodeId, f: impl Fn(&Node) -> NodeId) -> Option<NodeId> {
        let linked = f(self.get(id)?);
        linked.is_valid().then_some(linked)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.parent)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.first_child)
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.last_child)
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.prev_sibling)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.next_sibling)
    }

    /// Closest preceding sibling that is an element
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.prev_sibling(id);
        while let Some(sibling) = current {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            current = self.prev_sibling(sibling);
        }
        None
    }

    /// Closest following sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.next_sibling(id);
        while let Some(sibling) = current {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            current = self.next_sibling(sibling);
        }
        None
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Snapshot of the direct children
    pub fn child_nodes(&self, id: NodeId) -> NodeList {
        NodeList::from_vec(self.children(id).collect())
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Pre-order walk of the descendants of `id` (excluding `id`)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let mut kids: Vec<NodeId> = self.children(current).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?
            .as_element()?
            .get_attr(&name.to_ascii_lowercase())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute; names are lowercased like HTML `setAttribute`.
    /// Non-elements are ignored.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.get_mut(id).and_then(Node::as_element_mut) {
            elem.set_attr(&name.to_ascii_lowercase(), value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(elem) = self.get_mut(id).and_then(Node::as_element_mut) {
            elem.attrs.remove_attribute(&name.to_ascii_lowercase());
        }
    }

    /// `(name, value)` pairs in source order
    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        self.get(id)
            .and_then(Node::as_element)
            .map(|e| {
                e.attrs
                    .iter()
                    .map(|a| (a.name.clone(), a.value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// DOM `textContent`: concatenated descendant text for elements and
    /// fragments, own data for text/comments, empty for documents
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match &node.data {
            NodeData::Text(t) => t.content.clone(),
            NodeData::Comment(c) => c.clone(),
            NodeData::Document | NodeData::Doctype { .. } => String::new(),
            NodeData::Element(_) | NodeData::DocumentFragment => self
                .descendants(id)
                .into_iter()
                .filter_map(|d| self.get(d).and_then(Node::as_text))
                .collect(),
        }
    }

    /// Replace all children with a single text node (or set own data)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        match self.node_type(id) {
            Some(NodeType::Element | NodeType::DocumentFragment) => {
                self.remove_children(id);
                if !text.is_empty() {
                    let text_id = self.create_text(text);
                    let _ = self.append_child(id, text_id);
                }
            }
            Some(NodeType::Text | NodeType::Comment) => {
                if let Some(node) = self.get_mut(id) {
                    match &mut node.data {
                        NodeData::Text(t) => t.content = text.to_string(),
                        NodeData::Comment(c) => *c = text.to_string(),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Iterator over a node's ancestors
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
