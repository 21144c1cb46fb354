//! CSS Selectors
//!
//! Parsing and matching of selector lists against the arena tree. This is the
//! tree's native matcher: `matches`, `closest` and `query_selector_all` in
//! `element.rs` are built on it.

use crate::{DomError, DomResult, DomTree, NodeId, NodeType};

/// Comma-separated list of complex selectors
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// Compound selectors joined by combinators, stored left to right
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    /// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`
    pub combinators: Vec<Combinator>,
}

/// Sequence of simple selectors that all apply to one element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector(pub Vec<SelectorComponent>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// A component of a selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (lowercase tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :nth-child(), etc.
    PseudoClass(PseudoClass),
}

/// Supported pseudo-classes
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),
    Not(SelectorList),
    Checked,
    Disabled,
    Enabled,
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase().replace(' ', "");

        match s.as_str() {
            "odd" => return Some(Self::new(2, 1)),
            "even" => return Some(Self::new(2, 0)),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::new(0, n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a => a.parse().ok()?,
        };
        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else {
            rest.trim_start_matches('+').parse().ok()?
        };
        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        // Widened so extreme offsets cannot overflow
        let (a, diff) = (i64::from(self.a), i64::from(n) - i64::from(self.b));
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(val)) = (&self.matcher, value) else {
            return self.matcher.is_none() && value.is_some();
        };
        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(val);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{expected}-"))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && val.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && val.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && val.contains(&fold(expected))
            }
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

impl SelectorList {
    /// Parse selector text
    pub fn parse(input: &str) -> DomResult<Self> {
        let mut parser = Parser {
            chars: input.chars().collect(),
            pos: 0,
            source: input,
        };
        let list = parser.parse_list()?;
        parser.skip_ws();
        if parser.pos < parser.chars.len() {
            return Err(parser.error());
        }
        Ok(list)
    }

    /// Whether `node` matches any selector in the list
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.0.iter().any(|complex| complex.matches(tree, node))
    }
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn error(&self) -> DomError {
        DomError::Syntax(self.source.to_string())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> DomResult<()> {
        if self.eat(c) { Ok(()) } else { Err(self.error()) }
    }

    /// Returns whether any whitespace was consumed
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn parse_list(&mut self) -> DomResult<SelectorList> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_complex()?);
            self.skip_ws();
            if !self.eat(',') {
                break;
            }
        }
        Ok(SelectorList(selectors))
    }

    fn parse_complex(&mut self) -> DomResult<ComplexSelector> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                None | Some(',') | Some(')') => break,
                Some(_) if had_ws => Combinator::Descendant,
                Some(_) => return Err(self.error()),
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_ws();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> DomResult<CompoundSelector> {
        let mut parts = Vec::new();

        if self.eat('*') {
            parts.push(SelectorComponent::Universal);
        } else if self.peek().is_some_and(is_ident_char) {
            parts.push(SelectorComponent::Type(self.ident()?.to_ascii_lowercase()));
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    parts.push(SelectorComponent::Id(self.ident()?));
                }
                Some('.') => {
                    self.pos += 1;
                    parts.push(SelectorComponent::Class(self.ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    parts.push(SelectorComponent::Attribute(self.attribute()?));
                }
                Some(':') => {
                    self.pos += 1;
                    parts.push(SelectorComponent::PseudoClass(self.pseudo_class()?));
                }
                _ => break,
            }
        }

        if parts.is_empty() {
            return Err(self.error());
        }
        Ok(CompoundSelector(parts))
    }

    fn ident(&mut self) -> DomResult<String> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                let escaped = self.peek().ok_or_else(|| self.error())?;
                out.push(escaped);
                self.pos += 1;
            } else if is_ident_char(c) {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if out.is_empty() {
            return Err(self.error());
        }
        Ok(out)
    }

    fn attribute(&mut self) -> DomResult<AttributeSelector> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();

        if self.eat(']') {
            return Ok(AttributeSelector {
                name,
                matcher: None,
                case_insensitive: false,
            });
        }

        let op = match self.peek() {
            Some('=') => None,
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.pos += 1;
                Some(c)
            }
            _ => return Err(self.error()),
        };
        self.expect('=')?;
        self.skip_ws();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let mut value = String::new();
                loop {
                    match self.peek() {
                        Some(c) if c == quote => {
                            self.pos += 1;
                            break;
                        }
                        Some('\\') => {
                            self.pos += 1;
                            let escaped = self.peek().ok_or_else(|| self.error())?;
                            value.push(escaped);
                            self.pos += 1;
                        }
                        Some(c) => {
                            value.push(c);
                            self.pos += 1;
                        }
                        None => return Err(self.error()),
                    }
                }
                value
            }
            _ => self.ident()?,
        };

        self.skip_ws();
        let case_insensitive = if self.peek().is_some_and(|c| c == 'i' || c == 'I') {
            self.pos += 1;
            self.skip_ws();
            true
        } else {
            false
        };
        self.expect(']')?;

        let matcher = match op {
            None => AttributeMatcher::Exact(value),
            Some('~') => AttributeMatcher::Contains(value),
            Some('|') => AttributeMatcher::DashMatch(value),
            Some('^') => AttributeMatcher::Prefix(value),
            Some('$') => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };

        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
            case_insensitive,
        })
    }

    fn pseudo_class(&mut self) -> DomResult<PseudoClass> {
        let name = self.ident()?.to_ascii_lowercase();

        let simple = match name.as_str() {
            "root" => Some(PseudoClass::Root),
            "empty" => Some(PseudoClass::Empty),
            "first-child" => Some(PseudoClass::FirstChild),
            "last-child" => Some(PseudoClass::LastChild),
            "only-child" => Some(PseudoClass::OnlyChild),
            "first-of-type" => Some(PseudoClass::FirstOfType),
            "last-of-type" => Some(PseudoClass::LastOfType),
            "only-of-type" => Some(PseudoClass::OnlyOfType),
            "checked" => Some(PseudoClass::Checked),
            "disabled" => Some(PseudoClass::Disabled),
            "enabled" => Some(PseudoClass::Enabled),
            _ => None,
        };
        if let Some(pseudo) = simple {
            return Ok(pseudo);
        }

        self.expect('(')?;
        if name == "not" {
            let inner = self.parse_list()?;
            self.skip_ws();
            self.expect(')')?;
            return Ok(PseudoClass::Not(inner));
        }

        let start = self.pos;
        while self.peek().is_some_and(|c| c != ')') {
            self.pos += 1;
        }
        let arg: String = self.chars[start..self.pos].iter().collect();
        self.expect(')')?;
        let expr = NthExpression::parse(&arg).ok_or_else(|| self.error())?;

        match name.as_str() {
            "nth-child" => Ok(PseudoClass::NthChild(expr)),
            "nth-last-child" => Ok(PseudoClass::NthLastChild(expr)),
            "nth-of-type" => Ok(PseudoClass::NthOfType(expr)),
            "nth-last-of-type" => Ok(PseudoClass::NthLastOfType(expr)),
            _ => Err(self.error()),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

// ============================================================================
// Matching
// ============================================================================

impl ComplexSelector {
    /// Whether `node` matches, checked right to left
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.match_from(tree, n - 1, node),
        }
    }

    fn match_from(&self, tree: &DomTree, idx: usize, node: NodeId) -> bool {
        if !self.compounds[idx].matches(tree, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        match self.combinators[idx - 1] {
            Combinator::Child => tree
                .parent(node)
                .is_some_and(|p| self.match_from(tree, idx - 1, p)),
            Combinator::Descendant => tree
                .ancestors(node)
                .any(|a| self.match_from(tree, idx - 1, a)),
            Combinator::NextSibling => tree
                .prev_element_sibling(node)
                .is_some_and(|s| self.match_from(tree, idx - 1, s)),
            Combinator::SubsequentSibling => {
                let mut current = tree.prev_element_sibling(node);
                while let Some(sibling) = current {
                    if self.match_from(tree, idx - 1, sibling) {
                        return true;
                    }
                    current = tree.prev_element_sibling(sibling);
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    /// Only elements can match
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(tag) = tree.tag_name(node) else {
            return false;
        };
        self.0.iter().all(|component| match component {
            SelectorComponent::Universal => true,
            SelectorComponent::Type(name) => tag.eq_ignore_ascii_case(name),
            SelectorComponent::Id(id) => tree.get_attribute(node, "id") == Some(id.as_str()),
            SelectorComponent::Class(class) => tree.class_list(node).contains(class),
            SelectorComponent::Attribute(attr) => {
                attr.matches(tree.get_attribute(node, &attr.name))
            }
            SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(pseudo, tree, node, tag),
        })
    }
}

const FORM_ELEMENTS: &[&str] = &[
    "button", "input", "select", "textarea", "option", "optgroup", "fieldset",
];

/// Match a pseudo-class against an element
fn match_pseudo_class(pseudo: &PseudoClass, tree: &DomTree, node: NodeId, tag: &str) -> bool {
    let position = || SiblingPosition::of(tree, node, tag);

    match pseudo {
        PseudoClass::Root => tree
            .parent(node)
            .is_some_and(|p| tree.node_type(p) == Some(NodeType::Document)),
        PseudoClass::Empty => tree.children(node).all(|child| match tree.get(child) {
            Some(n) if n.is_element() => false,
            Some(n) => n.as_text().is_none_or(str::is_empty),
            None => true,
        }),
        PseudoClass::FirstChild => position().index == 1,
        PseudoClass::LastChild => {
            let p = position();
            p.index == p.count
        }
        PseudoClass::OnlyChild => position().count == 1,
        PseudoClass::FirstOfType => position().type_index == 1,
        PseudoClass::LastOfType => {
            let p = position();
            p.type_index == p.type_count
        }
        PseudoClass::OnlyOfType => position().type_count == 1,
        PseudoClass::NthChild(expr) => expr.matches(position().index as i32),
        PseudoClass::NthLastChild(expr) => {
            let p = position();
            expr.matches((p.count - p.index + 1) as i32)
        }
        PseudoClass::NthOfType(expr) => expr.matches(position().type_index as i32),
        PseudoClass::NthLastOfType(expr) => {
            let p = position();
            expr.matches((p.type_count - p.type_index + 1) as i32)
        }
        PseudoClass::Not(list) => !list.matches(tree, node),
        PseudoClass::Checked => match tag {
            "input" => tree.has_attribute(node, "checked"),
            "option" => tree.has_attribute(node, "selected"),
            _ => false,
        },
        PseudoClass::Disabled => {
            FORM_ELEMENTS.contains(&tag) && tree.has_attribute(node, "disabled")
        }
        PseudoClass::Enabled => {
            FORM_ELEMENTS.contains(&tag) && !tree.has_attribute(node, "disabled")
        }
    }
}

/// 1-based position of an element among its element siblings
struct SiblingPosition {
    index: usize,
    count: usize,
    type_index: usize,
    type_count: usize,
}

impl SiblingPosition {
    fn of(tree: &DomTree, node: NodeId, tag: &str) -> Self {
        let mut pos = Self {
            index: 1,
            count: 1,
            type_index: 1,
            type_count: 1,
        };
        let Some(parent) = tree.parent(node) else {
            return pos;
        };

        pos.count = 0;
        pos.type_count = 0;
        for sibling in tree.children(parent) {
            let Some(sibling_tag) = tree.tag_name(sibling) else {
                continue;
            };
            pos.count += 1;
            let same_type = sibling_tag == tag;
            if same_type {
                pos.type_count += 1;
            }
            if sibling == node {
                pos.index = pos.count;
                pos.type_index = pos.type_count;
            }
        }
        pos
    }
}
