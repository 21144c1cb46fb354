//! Node collection
//!
//! An ordered, chainable wrapper around `NodeId`s of a shared document.
//! Duplicates are allowed and index 0 is the primary node for single-node
//! accessors. Each entry owns the event registry for its node.
//!
//! Traversal, `eq`, `clone_nodes` and `replace_with` return new collections.
//! Mutation and event operations act through the receiver and return it.

mod attributes;
mod events;
mod geometry;
mod mutation;
mod traversal;

use std::fmt;
use std::ops::{ControlFlow, Index};

use fos_dom::{DocumentRef, DomTree, NodeId, NodeType, SelectorList, Window};

use crate::EventRegistry;

pub use geometry::{ClientRect, Offset};

#[derive(Clone)]
struct Entry {
    node: NodeId,
    events: EventRegistry,
}

/// Chainable multi-node wrapper
#[derive(Clone)]
pub struct NodeCollection {
    doc: DocumentRef,
    entries: Vec<Entry>,
    // Cached from entry 0 at construction
    name: String,
    node_type: Option<NodeType>,
    window: Option<Window>,
    root: Option<NodeId>,
    /// Inline display value remembered by `hide`
    saved_display: Option<String>,
}

impl NodeCollection {
    /// Wrap already-resolved nodes. `root` is the context they were
    /// resolved against.
    pub fn new(doc: &DocumentRef, nodes: Vec<NodeId>, root: Option<NodeId>) -> Self {
        let (name, node_type, window) = match nodes.first() {
            Some(&first) => {
                let document = doc.borrow();
                (
                    document.tree.node_name(first).to_lowercase(),
                    document.tree.node_type(first),
                    Some(document.window().clone()),
                )
            }
            None => (String::new(), None, None),
        };

        Self {
            doc: doc.clone(),
            entries: nodes
                .into_iter()
                .map(|node| Entry {
                    node,
                    events: EventRegistry::new(),
                })
                .collect(),
            name,
            node_type,
            window,
            root,
            saved_display: None,
        }
    }

    /// Empty collection over `doc`
    pub fn none(doc: &DocumentRef) -> Self {
        Self::new(doc, Vec::new(), None)
    }

    /// The shared document
    pub fn document(&self) -> &DocumentRef {
        &self.doc
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.entries.get(index).map(|e| e.node)
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|e| e.node)
    }

    /// Lowercased `nodeName` of the primary node, `""` when empty
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_type(&self) -> Option<NodeType> {
        self.node_type
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    /// Context the collection was resolved against
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Visit nodes in index order until the visitor breaks
    pub fn each(&self, mut visit: impl FnMut(NodeId, usize) -> ControlFlow<()>) -> &Self {
        for (index, entry) in self.entries.iter().enumerate() {
            if visit(entry.node, index).is_break() {
                break;
            }
        }
        self
    }

    /// Nodes as a plain vector
    pub fn to_vec(&self) -> Vec<NodeId> {
        self.iter().collect()
    }

    pub fn is_element(&self) -> bool {
        self.node_type == Some(NodeType::Element)
    }

    pub fn is_text(&self) -> bool {
        self.node_type == Some(NodeType::Text)
    }

    /// Single-node collection for `index`
    pub fn eq(&self, index: usize) -> Option<NodeCollection> {
        self.get(index).map(|node| self.derive(vec![node]))
    }

    /// Whether the primary node is `other`
    pub fn equal(&self, other: impl AsNode) -> bool {
        match (self.first_node(), other.as_node()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn first_node(&self) -> Option<NodeId> {
        self.entries.first().map(|e| e.node)
    }

    /// New collection over the same document with no context
    fn derive(&self, nodes: Vec<NodeId>) -> NodeCollection {
        NodeCollection::new(&self.doc, nodes, None)
    }
}

impl Index<usize> for NodeCollection {
    type Output = NodeId;

    fn index(&self, index: usize) -> &NodeId {
        &self.entries[index].node
    }
}

impl fmt::Debug for NodeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCollection")
            .field("name", &self.name)
            .field("nodes", &self.to_vec())
            .field("root", &self.root)
            .finish()
    }
}

/// Anything that designates a node: a `NodeId` or a collection's primary node
pub trait AsNode {
    fn as_node(&self) -> Option<NodeId>;
}

impl AsNode for NodeId {
    fn as_node(&self) -> Option<NodeId> {
        self.is_valid().then_some(*self)
    }
}

impl AsNode for Option<NodeId> {
    fn as_node(&self) -> Option<NodeId> {
        self.and_then(|node| node.as_node())
    }
}

impl AsNode for NodeCollection {
    fn as_node(&self) -> Option<NodeId> {
        self.first_node()
    }
}

impl<T: AsNode + ?Sized> AsNode for &T {
    fn as_node(&self) -> Option<NodeId> {
        (**self).as_node()
    }
}

/// Parse selector text for the native predicate; invalid text matches nothing
fn parse_selector(selector: &str) -> Option<SelectorList> {
    match SelectorList::parse(selector) {
        Ok(list) => Some(list),
        Err(err) => {
            tracing::warn!("Selector {:?} matches nothing: {}", selector, err);
            None
        }
    }
}

/// Native "matches selector" predicate; only elements match
fn matches(tree: &DomTree, node: NodeId, list: &SelectorList) -> bool {
    tree.is_element(node) && list.matches(tree, node)
}
