//! String Interner - Deduplicate tag names
//!
//! Tag names repeat constantly ("div", "span", "td") so every element stores a
//! 4-byte `InternedString` instead of an owned `String`.

use std::collections::HashMap;

/// Interned string ID - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String interner for deduplicating strings
#[derive(Debug, Clone)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create a new string interner with common HTML tag names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(128),
            map: HashMap::with_capacity(128),
        };

        // Index 0 is always the empty string
        interner.intern("");

        const COMMON_TAGS: &[&str] = &[
            "html", "head", "body", "div", "span", "p", "a", "img",
            "ul", "ol", "li", "table", "tr", "td", "th", "thead", "tbody",
            "form", "input", "button", "select", "option", "textarea",
            "h1", "h2", "h3", "h4", "h5", "h6",
            "header", "footer", "nav", "main", "section", "article", "aside",
            "script", "style", "link", "meta", "title",
            "br", "hr", "strong", "em", "b", "i", "u",
        ];

        for tag in COMMON_TAGS {
            interner.intern(tag);
        }

        interner
    }

    /// Intern a string, returning its ID.
    /// If the string is already interned, returns the existing ID
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&idx) = self.map.get(s) {
            return InternedString(idx);
        }

        let idx = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), idx);
        InternedString(idx)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&idx| InternedString(idx))
    }

    /// Get the string for an interned ID
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let mut interner = StringInterner::new();
        let id1 = interner.intern("custom-tag");
        let id2 = interner.intern("custom-tag");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_get_string() {
        let mut interner = StringInterner::new();
        let id = interner.intern("world");
        assert_eq!(interner.get(id), "world");
        assert_eq!(interner.get(InternedString::EMPTY), "");
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let interner = StringInterner::new();
        assert!(interner.lookup("div").is_some());
        assert!(interner.lookup("never-seen").is_none());
    }
}
