//! HTML Serialization (innerHTML/outerHTML)
//!
//! Key features:
//! - innerHTML/outerHTML serialization
//! - Shallow serialization (start and end tag only) for attribute scanning
//! - Proper HTML escaping
//! - Void element handling

use fos_dom::{DomTree, NodeData, NodeId};

/// HTML serializer
pub struct HtmlSerializer {
    /// Whether to format output with indentation
    pub pretty_print: bool,
    /// Indentation string
    pub indent: String,
}

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            ..Self::default()
        }
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        if is_raw_text(tree, node_id) {
            self.serialize_children_raw(tree, node_id, &mut output);
        } else {
            self.serialize_children(tree, node_id, &mut output, 0);
        }
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output, 0, true);
        output
    }

    /// Serialize a node without its children, as the outerHTML of a shallow
    /// clone would read
    pub fn serialize_shallow(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output, 0, false);
        output
    }

    /// Serialize a node and, when `deep`, its descendants
    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String, depth: usize, deep: bool) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document | NodeData::DocumentFragment => {
                if deep {
                    self.serialize_children(tree, node_id, output, depth);
                }
            }
            NodeData::Element(elem) => {
                let tag = tree.resolve(elem.name);
                let is_void = VOID_ELEMENTS.contains(&tag);

                // Indentation
                if self.pretty_print && depth > 0 {
                    self.newline(output, depth);
                }

                // Start tag
                output.push('<');
                output.push_str(tag);

                // Attributes
                for attr in elem.attrs.iter() {
                    output.push(' ');
                    output.push_str(&attr.name);
                    if !attr.value.is_empty() {
                        output.push_str("=\"");
                        escape_attribute(&attr.value, output);
                        output.push('"');
                    }
                }
                output.push('>');

                if is_void {
                    return;
                }

                if deep {
                    if RAW_TEXT_ELEMENTS.contains(&tag) {
                        // Raw content, no escaping
                        self.serialize_children_raw(tree, node_id, output);
                    } else {
                        self.serialize_children(tree, node_id, output, depth + 1);
                        if self.pretty_print && node.first_child.is_valid() {
                            self.newline(output, depth);
                        }
                    }
                }

                // End tag
                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            NodeData::Text(text) => {
                escape_text(&text.content, output);
            }
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Doctype { name, .. } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(tree.resolve(*name));
                output.push('>');
            }
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String, depth: usize) {
        for child_id in tree.children(parent_id) {
            self.serialize_node(tree, child_id, output, depth, true);
        }
    }

    fn serialize_children_raw(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for child_id in tree.children(parent_id) {
            if let Some(text) = tree.get(child_id).and_then(|n| n.as_text()) {
                output.push_str(text);
            }
        }
    }

    fn newline(&self, output: &mut String, depth: usize) {
        output.push('\n');
        for _ in 0..depth {
            output.push_str(&self.indent);
        }
    }
}

fn is_raw_text(tree: &DomTree, node_id: NodeId) -> bool {
    tree.tag_name(node_id)
        .is_some_and(|tag| RAW_TEXT_ELEMENTS.contains(&tag))
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Utility: Get innerHTML of an element
pub fn get_inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// Utility: Get outerHTML of an element
pub fn get_outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}
