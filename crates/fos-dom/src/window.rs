//! Window - viewport and computed style

use crate::style::{default_display, CssStyleDeclaration};
use crate::{Config, DomTree, NodeId};

/// Viewport owning a document
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub inner_width: f64,
    pub inner_height: f64,
}

impl Window {
    pub fn new(config: &Config) -> Self {
        Self {
            inner_width: config.viewport_width,
            inner_height: config.viewport_height,
        }
    }

    /// `getComputedStyle`: user-agent defaults overridden by inline style.
    /// `None` for anything that is not an element.
    pub fn get_computed_style(&self, tree: &DomTree, node: NodeId) -> Option<CssStyleDeclaration> {
        let tag = tree.tag_name(node)?;

        let mut computed = CssStyleDeclaration::new();
        let display = if tree.has_attribute(node, "hidden") {
            "none"
        } else {
            default_display(tag)
        };
        computed.set_property("display", display);
        computed.set_property("visibility", "visible");
        computed.set_property("width", "auto");
        computed.set_property("height", "auto");

        for (name, value) in tree.inline_style(node).iter() {
            computed.set_property(name, value);
        }
        Some(computed)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_defaults_and_overrides() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "style", "width: 50px");

        let window = Window::default();
        let computed = window.get_computed_style(&tree, div).unwrap();
        assert_eq!(computed.get_property_value("display"), "block");
        assert_eq!(computed.get_property_value("width"), "50px");
        assert_eq!(computed.get_property_value("height"), "auto");
    }

    #[test]
    fn test_hidden_attribute() {
        let mut tree = DomTree::new();
        let span = tree.create_element("span");
        tree.set_attribute(span, "hidden", "");
        let computed = Window::default().get_computed_style(&tree, span).unwrap();
        assert_eq!(computed.get_property_value("display"), "none");
    }

    #[test]
    fn test_text_has_no_computed_style() {
        let mut tree = DomTree::new();
        let text = tree.create_text("x");
        assert!(Window::default().get_computed_style(&tree, text).is_none());
    }
}
