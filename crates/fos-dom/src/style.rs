//! Inline and computed style
//!
//! The inline style lives in the `style` attribute; `CssStyleDeclaration` is a
//! parsed snapshot of it. Property names are accepted in kebab-case
//! (`background-color`) or camelCase (`backgroundColor`).

use crate::{DomTree, NodeId};

/// Ordered set of `property: value` declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssStyleDeclaration {
    declarations: Vec<(String, String)>,
}

impl CssStyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse declaration text such as `color: red; margin: 0`
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        for declaration in text.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if !name.is_empty() && !value.is_empty() {
                style.set_property(name, value);
            }
        }
        style
    }

    /// Value of a property, `""` when unset
    pub fn get_property_value(&self, name: &str) -> &str {
        let name = property_name(name);
        self.declarations
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Set a property; an empty value removes it
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = property_name(name);
        let value = value.trim();
        if value.is_empty() {
            self.remove_property(&name);
            return;
        }
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value.to_string(),
            None => self.declarations.push((name, value.to_string())),
        }
    }

    /// Remove a property, returning its previous value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = property_name(name);
        let index = self.declarations.iter().position(|(n, _)| *n == name)?;
        Some(self.declarations.remove(index).1)
    }

    pub fn length(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialized form: `color: red; margin: 0;`
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Normalize a property name to lowercase kebab-case
pub fn property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        // Custom properties are case-sensitive
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl DomTree {
    /// Parsed inline style of an element
    pub fn inline_style(&self, id: NodeId) -> CssStyleDeclaration {
        self.get_attribute(id, "style")
            .map(CssStyleDeclaration::parse)
            .unwrap_or_default()
    }

    /// Set one inline property and write the declaration back.
    /// Non-elements are ignored.
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) {
        if !self.is_element(id) {
            return;
        }
        let mut style = self.inline_style(id);
        style.set_property(name, value);
        self.set_attribute(id, "style", &style.css_text());
    }
}

/// User-agent `display` value for a tag
pub fn default_display(tag: &str) -> &'static str {
    match tag {
        "head" | "script" | "style" | "template" | "title" | "meta" | "link" | "base"
        | "noscript" => "none",
        "html" | "body" | "div" | "p" | "ul" | "ol" | "dl" | "dd" | "dt" | "section"
        | "article" | "aside" | "header" | "footer" | "nav" | "main" | "form" | "fieldset"
        | "figure" | "figcaption" | "blockquote" | "pre" | "hr" | "address" | "details"
        | "summary" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "block",
        "li" => "list-item",
        "table" => "table",
        "caption" => "table-caption",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        "col" => "table-column",
        "colgroup" => "table-column-group",
        "button" | "input" | "select" | "textarea" | "img" => "inline-block",
        _ => "inline",
    }
}
