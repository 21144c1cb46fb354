//! HTML5 Parser implementation
//!
//! Uses html5ever's build-in RcDom and converts to our DOM format.
//! This is simpler and more reliable than implementing TreeSink directly.

use fos_dom::{Config, Document, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        self.parse_with_config(html, Config::with_url(url))
    }

    /// Parse HTML into a document built from `config`
    pub fn parse_with_config(&self, html: &str, config: Config) -> Document {
        tracing::debug!("Parsing HTML document: {}", config.url);

        let dom = Self::parse_rc(html);

        let mut document = Document::empty_with_config(config);
        let root = document.root();
        convert_node(&dom.document, document.tree_mut(), root);

        // Find html, head, body elements
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Parse standalone markup as its own document and import the resulting
    /// `<body>` into `tree` as a detached element. Its children are the
    /// top-level nodes the markup produced, after html5ever's error recovery.
    pub fn parse_detached(&self, tree: &mut DomTree, markup: &str) -> NodeId {
        let dom = Self::parse_rc(markup);

        let body = tree.create_element("body");
        if let Some(source) = find_child_element(&dom.document, "html")
            .and_then(|html| find_child_element(&html, "body"))
        {
            for child in source.children.borrow().iter() {
                convert_node(child, tree, body);
            }
        }

        tracing::trace!("Imported {} top-level nodes", tree.children(body).count());
        body
    }

    fn parse_rc(html: &str) -> RcDom {
        parse_document(RcDom::default(), Default::default()).one(html)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn find_child_element(handle: &Handle, tag: &str) -> Option<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, RcNodeData::Element { name, .. } if &*name.local == tag))
        .cloned()
}

/// Convert an RcDom node to our DOM format
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    let id = match &handle.data {
        RcNodeData::Document => {
            // Document node - just process children
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, parent);
            }
            return;
        }
        RcNodeData::Doctype {
            name,
            public_id,
            system_id,
        } => tree.create_doctype(name, public_id, system_id),
        RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
        RcNodeData::Comment { contents } => tree.create_comment(contents),
        RcNodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } => {
            let id = tree.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                let attr_name = match &attr.name.prefix {
                    Some(prefix) => format!("{}:{}", &**prefix, &*attr.name.local),
                    None => attr.name.local.to_string(),
                };
                tree.set_attribute(id, &attr_name, &attr.value);
            }
            if let Err(err) = tree.append_child(parent, id) {
                tracing::warn!("Dropping <{}>: {}", &*name.local, err);
                return;
            }

            // Process children; <template> keeps its content in a separate fragment
            let children = match &*template_contents.borrow() {
                Some(contents) => contents.children.borrow().clone(),
                None => handle.children.borrow().clone(),
            };
            for child in children.iter() {
                convert_node(child, tree, id);
            }
            return;
        }
        RcNodeData::ProcessingInstruction { .. } => {
            // Ignore processing instructions
            return;
        }
    };

    if let Err(err) = tree.append_child(parent, id) {
        tracing::warn!("Dropping parsed node: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html);

        assert_eq!(doc.title(), "Test");
        let body = doc.body().unwrap();
        let p = doc.tree().first_child(body).unwrap();
        assert_eq!(doc.tree().tag_name(p), Some("p"));
        assert_eq!(doc.tree().text_content(p), "Hello");
    }

    #[test]
    fn test_parse_fragment() {
        let html = "<div><span>Text</span></div>";
        let doc = HtmlParser::new().parse(html);

        // Even fragments get wrapped in html/head/body by html5ever
        assert!(doc.document_element().is_some());
        assert!(doc.head().is_some());
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_whitespace_text_is_kept() {
        let doc = HtmlParser::new().parse("<div><b>a</b> <i>b</i></div>");
        let div = doc.tree().first_child(doc.body().unwrap()).unwrap();
        assert_eq!(doc.tree().children(div).count(), 3);
    }

    #[test]
    fn test_parse_detached() {
        let mut doc = Document::default();
        let before = doc.tree().len();
        let body = HtmlParser::new().parse_detached(doc.tree_mut(), "<p id=\"a\">x</p><!--c-->text");

        let tree = doc.tree();
        assert!(tree.len() > before);
        assert_eq!(tree.parent(body), None);
        let kids: Vec<_> = tree.children(body).collect();
        assert_eq!(kids.len(), 3);
        assert_eq!(tree.get_attribute(kids[0], "id"), Some("a"));
        assert_eq!(tree.text_content(kids[2]), "text");
    }

    #[test]
    fn test_template_contents() {
        let doc = HtmlParser::new().parse("<template><p>inside</p></template>");
        let tree = doc.tree();
        let template = tree.query_selector(tree.root(), "template").unwrap().unwrap();
        assert_eq!(tree.text_content(template), "inside");
    }
}
