//! fOS Query - chainable DOM manipulation
//!
//! A small toolkit over the fOS arena DOM:
//! - [`selector`]: normalizes every way of naming nodes (CSS text, markup,
//!   node handles, lists, other collections, fragments) into one ordered
//!   sequence
//! - [`NodeCollection`]: fluent traversal, attribute/style/content access,
//!   structural mutation and listener bookkeeping over that sequence
//! - [`string`]: regex helpers for property names, colors and serialized
//!   attribute/style text
//!
//! ```ignore
//! use fos_query::{build, DocumentRef};
//!
//! let doc = DocumentRef::new(fos_html::parse("<ul><li>a</li></ul>"));
//! build(&doc, "ul", None).append("<li>b</li>");
//! assert_eq!(build(&doc, "li", None).len(), 2);
//! ```

mod collection;
mod error;
mod registry;

pub mod selector;
pub mod string;

pub use collection::{AsNode, ClientRect, NodeCollection, Offset};
pub use error::{QueryError, QueryResult};
pub use registry::EventRegistry;
pub use selector::{resolve, Selector};
pub use string::{
    get_attr_map, get_computed_style, get_style_map, to_camel_case, to_hex, to_map, CaseMode,
    MapInput,
};

pub use fos_dom::{DocumentRef, EventListener, NodeId};

/// Resolve `selector` against `doc` and wrap the result. `context` scopes
/// CSS queries (default: the whole document) and is kept as the
/// collection's root for later insertions.
pub fn build<'a>(doc: &DocumentRef, selector: impl Into<Selector<'a>>, context: Option<NodeId>) -> NodeCollection {
    let selector = selector.into();
    let nodes = resolve(&mut doc.borrow_mut(), &selector, context);
    NodeCollection::new(doc, nodes, context)
}
