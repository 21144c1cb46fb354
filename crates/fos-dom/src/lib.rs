//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree with the host primitives a query toolkit needs:
//! selector matching, attributes, class lists, inline and computed style,
//! listener registration with capture/bubble dispatch, and element geometry.

mod attributes;
mod classlist;
mod config;
mod document;
mod dom_events;
mod element;
mod geometry;
mod handle;
mod interner;
mod node;
mod operations;
mod tree;
mod window;

pub mod selector;
pub mod style;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::DOMTokenList;
pub use config::Config;
pub use document::Document;
pub use dom_events::{Event, EventListener, EventPhase, EventTargets};
pub use element::NodeList;
pub use geometry::{DOMRect, ElementGeometry};
pub use handle::DocumentRef;
pub use interner::{InternedString, StringInterner};
pub use node::{ElementData, Node, NodeData, NodeType, TextData};
pub use operations::{DomError, DomResult};
pub use selector::SelectorList;
pub use style::CssStyleDeclaration;
pub use tree::{Ancestors, Children, DomTree};
pub use window::Window;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Invalid/null node ID
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if valid
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
