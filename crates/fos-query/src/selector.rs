//! Selector resolution
//!
//! Every input shape a caller can target nodes with is normalized here, once,
//! into an ordered `Vec<NodeId>`. Nothing downstream inspects the input again.

use std::borrow::Cow;
use std::sync::LazyLock;

use fancy_regex::Regex;
use fos_dom::{Document, NodeId, NodeList, NodeType};
use fos_html::HtmlParser;

use crate::NodeCollection;

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.+>").expect("markup pattern"));

/// What a call should target
#[derive(Debug, Clone)]
pub enum Selector<'a> {
    /// Nothing
    Empty,
    /// CSS selector text, queried below the context
    Css(Cow<'a, str>),
    /// Standalone markup, parsed into new detached nodes
    Markup(Cow<'a, str>),
    /// A single node
    Node(NodeId),
    /// A host node list
    NodeList(NodeList),
    /// An ordered sequence of nodes
    Nodes(Vec<NodeId>),
    /// Another collection's nodes
    Collection(&'a NodeCollection),
    /// The children of a document fragment
    Fragment(NodeId),
}

impl<'a> Selector<'a> {
    /// Classify selector text: empty, markup (contains a tag) or CSS
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Selector::Empty
        } else if MARKUP.is_match(&text).unwrap_or(false) {
            Selector::Markup(text)
        } else {
            Selector::Css(text)
        }
    }

    /// Target the children of a document fragment
    pub fn fragment(node: NodeId) -> Self {
        Selector::Fragment(node)
    }

    /// Whether the selector was given as text
    pub fn is_text(&self) -> bool {
        matches!(self, Selector::Css(_) | Selector::Markup(_))
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Selector::Markup(_))
    }
}

impl<'a> From<&'a str> for Selector<'a> {
    fn from(text: &'a str) -> Self {
        Selector::text(text)
    }
}

impl From<String> for Selector<'_> {
    fn from(text: String) -> Self {
        Selector::text(text)
    }
}

impl<'a> From<&'a String> for Selector<'a> {
    fn from(text: &'a String) -> Self {
        Selector::text(text.as_str())
    }
}

impl From<NodeId> for Selector<'_> {
    fn from(node: NodeId) -> Self {
        Selector::Node(node)
    }
}

impl From<Option<NodeId>> for Selector<'_> {
    fn from(node: Option<NodeId>) -> Self {
        node.map_or(Selector::Empty, Selector::Node)
    }
}

impl From<NodeList> for Selector<'_> {
    fn from(list: NodeList) -> Self {
        Selector::NodeList(list)
    }
}

impl From<Vec<NodeId>> for Selector<'_> {
    fn from(nodes: Vec<NodeId>) -> Self {
        Selector::Nodes(nodes)
    }
}

impl From<&[NodeId]> for Selector<'_> {
    fn from(nodes: &[NodeId]) -> Self {
        Selector::Nodes(nodes.to_vec())
    }
}

impl<'a> From<&'a NodeCollection> for Selector<'a> {
    fn from(collection: &'a NodeCollection) -> Self {
        Selector::Collection(collection)
    }
}

/// Resolve `selector` to nodes of `doc`, in document or insertion order.
/// `context` scopes CSS queries and defaults to the document node.
pub fn resolve(doc: &mut Document, selector: &Selector<'_>, context: Option<NodeId>) -> Vec<NodeId> {
    let nodes = match selector {
        Selector::Empty => Vec::new(),
        Selector::Css(css) => {
            let root = context.unwrap_or_else(|| doc.root());
            match doc.tree.query_selector_all(root, css) {
                Ok(list) => list.into_vec(),
                Err(err) => {
                    tracing::warn!("Selector {:?} resolved to nothing: {}", css, err);
                    Vec::new()
                }
            }
        }
        Selector::Markup(markup) => parse_markup(doc, markup),
        Selector::Node(node) if doc.tree.node_type(*node) == Some(NodeType::DocumentFragment) => {
            doc.tree.children(*node).collect()
        }
        Selector::Node(node) => vec![*node],
        Selector::NodeList(list) => list.iter().collect(),
        Selector::Nodes(nodes) => nodes.clone(),
        Selector::Collection(collection) => collection.to_vec(),
        Selector::Fragment(fragment) => doc.tree.children(*fragment).collect(),
    };

    tracing::trace!("Resolved {} nodes", nodes.len());
    nodes
}

/// Table parts that only parse inside a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scaffold {
    None,
    Row,
    Cell,
}

impl Scaffold {
    fn detect(markup: &str) -> Self {
        let Some(rest) = markup.strip_prefix('<') else {
            return Scaffold::None;
        };
        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        match rest[..end].to_ascii_lowercase().as_str() {
            "tr" => Scaffold::Row,
            "td" | "th" => Scaffold::Cell,
            _ => Scaffold::None,
        }
    }

    fn wrap(self, markup: &str) -> Cow<'_, str> {
        match self {
            Scaffold::None => Cow::Borrowed(markup),
            Scaffold::Row => Cow::Owned(format!("<table><tbody>{markup}</tbody></table>")),
            Scaffold::Cell => Cow::Owned(format!("<table><tbody><tr>{markup}</tr></tbody></table>")),
        }
    }
}

/// Parse markup into detached top-level nodes. The parser's holder element
/// is unlinked from every returned node.
fn parse_markup(doc: &mut Document, markup: &str) -> Vec<NodeId> {
    let markup = markup.trim();
    let scaffold = Scaffold::detect(markup);
    let body = HtmlParser::new().parse_detached(&mut doc.tree, &scaffold.wrap(markup));

    let tree = &doc.tree;
    let nodes: Vec<NodeId> = match scaffold {
        Scaffold::None => tree.children(body).collect(),
        _ => match tree.query_selector(body, "tr") {
            Ok(Some(row)) if scaffold == Scaffold::Cell => {
                tree.children(row).filter(|&c| tree.is_element(c)).collect()
            }
            Ok(Some(row)) => tree.children(row).collect(),
            _ => Vec::new(),
        },
    };

    for &node in &nodes {
        doc.tree.detach(node);
    }
    nodes
}
