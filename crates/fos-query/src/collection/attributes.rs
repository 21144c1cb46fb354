//! Attribute, class, style and content accessors
//!
//! Getters read the primary node and fall back to an empty value; setters
//! apply to every node in index order.

use std::collections::HashMap;

use fos_dom::{DOMTokenList, Document, NodeId};
use fos_html::{HtmlParser, HtmlSerializer};

use super::NodeCollection;
use crate::string::{get_attr_map, get_computed_style, get_style_map, parse_float};

impl NodeCollection {
    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Every attribute of the primary element, read back from its
    /// serialized start tag
    pub fn attrs(&self) -> HashMap<String, String> {
        let Some(node) = self.first_node().filter(|_| self.is_element()) else {
            return HashMap::new();
        };
        let doc = self.doc.borrow();
        get_attr_map(&HtmlSerializer::new().serialize_shallow(&doc.tree, node))
    }

    /// Attribute of the primary element
    pub fn attr(&self, name: &str) -> Option<String> {
        let node = self.first_node().filter(|_| self.is_element())?;
        self.doc
            .borrow()
            .tree
            .get_attribute(node, name)
            .map(str::to_string)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for node in self.iter() {
                doc.tree.set_attribute(node, name, value);
            }
        }
        self
    }

    /// Set several attributes on every node
    pub fn set_attrs<K, V>(&mut self, attrs: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in attrs {
            self.set_attr(name.as_ref(), value.as_ref());
        }
        self
    }

    pub fn remove_attr(&mut self, name: &str) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for node in self.iter() {
                doc.tree.remove_attribute(node, name);
            }
        }
        self
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    pub fn has_class(&self, class: &str) -> bool {
        self.first_node()
            .is_some_and(|node| self.doc.borrow().tree.class_list(node).contains(class))
    }

    pub fn add_class(&mut self, class: &str) -> &mut Self {
        self.update_classes(|list| {
            list.add(class);
        })
    }

    pub fn remove_class(&mut self, class: &str) -> &mut Self {
        self.update_classes(|list| {
            list.remove(class);
        })
    }

    fn update_classes(&mut self, mut update: impl FnMut(&mut DOMTokenList)) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for node in self.iter() {
                if !doc.tree.is_element(node) {
                    continue;
                }
                let mut list = doc.tree.class_list(node);
                update(&mut list);
                doc.tree.set_class_list(node, &list);
            }
        }
        self
    }

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    /// Inline value of a property, else its computed value, else `""`.
    /// Accepts kebab-case or camelCase names.
    pub fn css(&self, name: &str) -> String {
        let Some(node) = self.first_node().filter(|_| !self.is_text()) else {
            return String::new();
        };

        let doc = self.doc.borrow();
        let inline = doc.tree.inline_style(node);
        match inline.get_property_value(name) {
            "" => get_computed_style(&doc, node, name).unwrap_or_default(),
            value => value.to_string(),
        }
    }

    /// Inline declarations of the primary element
    pub fn style_map(&self) -> HashMap<String, String> {
        get_style_map(&self.attr("style").unwrap_or_default())
    }

    /// Set one inline property on every element; `""` removes it
    pub fn set_css(&mut self, name: &str, value: &str) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for node in self.iter() {
                doc.tree.set_style_property(node, name, value);
            }
        }
        self
    }

    pub fn set_css_map<K, V>(&mut self, declarations: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in declarations {
            self.set_css(name.as_ref(), value.as_ref());
        }
        self
    }

    /// Numeric `width`; `auto` measures the live box. `0.0` when unparseable.
    pub fn width(&self) -> f64 {
        self.dimension("width", |doc, node| doc.offset_width(node))
    }

    /// Numeric `height`; `auto` measures the live box. `0.0` when unparseable.
    pub fn height(&self) -> f64 {
        self.dimension("height", |doc, node| doc.offset_height(node))
    }

    fn dimension(&self, name: &str, measure: impl Fn(&Document, NodeId) -> f64) -> f64 {
        let value = self.css(name);
        if value == "auto" {
            return match self.first_node() {
                Some(node) => measure(&*self.doc.borrow(), node),
                None => 0.0,
            };
        }
        parse_float(&value).unwrap_or(0.0)
    }

    /// Show hidden nodes. `None` restores the display value remembered by
    /// [`hide`](Self::hide). No-op unless the primary node is `display: none`.
    pub fn show(&mut self, display: Option<&str>) -> &mut Self {
        let display = display
            .map(str::to_string)
            .or_else(|| self.saved_display.clone())
            .unwrap_or_default();
        let display = if display == "none" { String::new() } else { display };

        if self.css("display") != "none" {
            return self;
        }
        self.set_css("display", &display)
    }

    /// Set `display: none`, remembering the primary node's inline display
    pub fn hide(&mut self) -> &mut Self {
        let Some(node) = self.first_node() else {
            return self;
        };
        let saved = self
            .doc
            .borrow()
            .tree
            .inline_style(node)
            .get_property_value("display")
            .to_string();
        self.saved_display = Some(saved);
        self.set_css("display", "none")
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Serialized children of the primary node
    pub fn html(&self) -> String {
        let Some(node) = self.first_node() else {
            return String::new();
        };
        HtmlSerializer::new().serialize_inner(&self.doc.borrow().tree, node)
    }

    /// Replace the children of every element with freshly parsed markup
    pub fn set_html(&mut self, markup: &str) -> &mut Self {
        let parser = HtmlParser::new();
        {
            let mut doc = self.doc.borrow_mut();
            let tree = &mut doc.tree;
            for node in self.iter() {
                if !tree.is_element(node) {
                    continue;
                }
                tree.remove_children(node);
                let body = parser.parse_detached(tree, markup);
                let children: Vec<_> = tree.children(body).collect();
                for child in children {
                    if let Err(err) = tree.append_child(node, child) {
                        tracing::warn!("set_html dropped a node: {}", err);
                    }
                }
            }
        }
        self
    }

    /// Text content of the primary node
    pub fn text(&self) -> String {
        match self.first_node() {
            Some(node) => self.doc.borrow().tree.text_content(node),
            None => String::new(),
        }
    }

    pub fn set_text(&mut self, text: &str) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for node in self.iter() {
                doc.tree.set_text_content(node, text);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::build;
    use fos_dom::{DocumentRef, ElementGeometry};
    use fos_html::HtmlParser;

    fn document() -> DocumentRef {
        DocumentRef::new(HtmlParser::new().parse(concat!(
            r#"<div id="x" class="a b" disabled style="color: rgb(255,0,0); width: 12.5px">"#,
            "<p>one</p><p>two</p>",
            "</div>",
            r#"<span id="auto">s</span>"#
        )))
    }

    fn owned(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_attrs_from_serialized_tag() {
        let doc = document();
        let mut div = build(&doc, "#x", None);
        div.remove_attr("style");
        assert_eq!(
            div.attrs(),
            owned(&[("id", "x"), ("class", "a b"), ("disabled", "")])
        );
    }

    #[test]
    fn test_attr_get_set() {
        let doc = document();
        let mut ps = build(&doc, "p", None);
        assert_eq!(ps.attr("title"), None);

        ps.set_attr("title", "t").set_attrs([("lang", "en"), ("dir", "ltr")]);
        assert_eq!(build(&doc, "p", None).eq(1).unwrap().attr("title").as_deref(), Some("t"));
        assert_eq!(ps.attr("lang").as_deref(), Some("en"));

        ps.remove_attr("title");
        assert_eq!(ps.attr("title"), None);
        assert_eq!(build(&doc, ".none", None).attr("id"), None);
    }

    #[test]
    fn test_classes() {
        let doc = document();
        let mut div = build(&doc, "#x", None);
        assert!(div.has_class("a"));
        assert!(!div.has_class("c"));

        div.add_class("c").remove_class("a");
        assert_eq!(div.attr("class").as_deref(), Some("b c"));
        assert!(!build(&doc, ".none", None).has_class("a"));
    }

    #[test]
    fn test_css_inline_then_computed() {
        let doc = document();
        let div = build(&doc, "#x", None);
        assert_eq!(div.css("width"), "12.5px");
        assert_eq!(div.css("display"), "block");
        assert_eq!(div.css("float"), "");
        assert_eq!(div.style_map()["color"], "#FF0000");

        let text = build(&doc, "p", None).first().unwrap();
        assert_eq!(text.css("display"), "");
    }

    #[test]
    fn test_set_css() {
        let doc = document();
        let mut ps = build(&doc, "p", None);
        ps.set_css("backgroundColor", "red").set_css_map([("margin", "0"), ("padding", "1px")]);

        let second = build(&doc, "p", None).eq(1).unwrap();
        assert_eq!(second.css("background-color"), "red");
        assert_eq!(
            second.style_map(),
            owned(&[("background-color", "red"), ("margin", "0"), ("padding", "1px")])
        );

        ps.set_css("margin", "");
        assert_eq!(second.css("margin"), "");
    }

    #[test]
    fn test_width_and_height() {
        let doc = document();
        let span = build(&doc, "#auto", None);
        doc.borrow_mut()
            .set_geometry(span[0], ElementGeometry::from_box(0.0, 0.0, 40.0, 16.0));

        assert_eq!(build(&doc, "#x", None).width(), 12.5);
        assert_eq!(span.width(), 40.0);
        assert_eq!(span.height(), 16.0);

        build(&doc, "#auto", None).set_css("height", "bogus");
        assert_eq!(span.height(), 0.0);
        assert_eq!(build(&doc, ".none", None).width(), 0.0);
    }

    #[test]
    fn test_hide_show_round_trip() {
        let doc = document();
        let mut span = build(&doc, "#auto", None);
        span.set_css("display", "inline-block");

        span.hide();
        assert_eq!(span.css("display"), "none");
        span.show(None);
        assert_eq!(span.css("display"), "inline-block");

        // Already visible
        span.show(Some("flex"));
        assert_eq!(span.css("display"), "inline-block");
    }

    #[test]
    fn test_show_none_clears_inline_display() {
        let doc = document();
        let mut span = build(&doc, "#auto", None);
        span.set_css("display", "none");
        span.show(Some("none"));
        assert_eq!(span.css("display"), "inline");
    }

    #[test]
    fn test_html_get_set() {
        let doc = document();
        let mut div = build(&doc, "#x", None);
        assert_eq!(div.html(), "<p>one</p><p>two</p>");

        div.set_html("<b>bold</b> tail");
        assert_eq!(div.html(), "<b>bold</b> tail");
        assert_eq!(build(&doc, "#x b", None).len(), 1);
        assert_eq!(build(&doc, ".none", None).html(), "");
    }

    #[test]
    fn test_text_get_set() {
        let doc = document();
        let mut ps = build(&doc, "p", None);
        assert_eq!(ps.text(), "one");

        ps.set_text("<x>");
        assert_eq!(build(&doc, "#x", None).text(), "<x><x>");
        assert_eq!(build(&doc, "#x", None).html(), "<p>&lt;x&gt;</p><p>&lt;x&gt;</p>");
    }
}
