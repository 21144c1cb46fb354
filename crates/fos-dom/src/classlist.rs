//! DOMTokenList (classList)
//!
//! Space-separated token view over an element's `class` attribute. The list is
//! a snapshot: write it back with `DomTree::set_class_list`.

use crate::{DomTree, NodeId};

/// DOMTokenList for managing space-separated tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Number of tokens
    pub fn length(&self) -> usize {
        self.tokens.len()
    }

    /// Token at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token; returns false when it was already present or is empty
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token; returns whether it was present
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Serialized attribute value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl std::fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl DomTree {
    /// Class tokens of an element (empty for other node kinds)
    pub fn class_list(&self, id: NodeId) -> DOMTokenList {
        self.get_attribute(id, "class")
            .map(DOMTokenList::from_string)
            .unwrap_or_default()
    }

    /// Write a token list back into the `class` attribute
    pub fn set_class_list(&mut self, id: NodeId, list: &DOMTokenList) {
        self.set_attribute(id, "class", &list.value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let list = DOMTokenList::from_string("btn  btn-primary active btn");
        assert_eq!(list.length(), 3);
        assert!(list.contains("btn"));
        assert!(list.contains("btn-primary"));
        assert_eq!(list.value(), "btn btn-primary active");
    }

    #[test]
    fn test_add_remove() {
        let mut list = DOMTokenList::new();
        assert!(list.add("foo"));
        assert!(!list.add("foo"));
        assert!(list.add("bar"));
        assert_eq!(list.length(), 2);

        assert!(list.remove("foo"));
        assert!(!list.remove("foo"));
        assert_eq!(list.item(0), Some("bar"));
    }

    #[test]
    fn test_tree_round_trip() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let mut list = tree.class_list(div);
        list.add("a");
        list.add("b");
        tree.set_class_list(div, &list);
        assert_eq!(tree.get_attribute(div, "class"), Some("a b"));
    }
}
