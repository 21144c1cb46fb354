//! String and markup utilities
//!
//! Regex-grammar converters for property names, colors and serialized
//! attribute/style text. The grammars are kept behind these functions so a
//! structural tokenizer can replace them without touching callers.
//!
//! Quoted attribute values containing the same quote character (escaped or
//! nested) are not recognized.

use std::collections::HashMap;
use std::sync::LazyLock;

use fancy_regex::Regex;
use fos_dom::{Document, NodeId};

static RGB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgb\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").expect("rgb pattern")
});

static RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\.(\d+)$").expect("range pattern"));

/// Widest `a..b` range `to_map` expands; wider ranges are kept as literal keys
pub const MAX_RANGE_SPAN: u64 = 65_536;

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\s+(?:",
        r"([\w\-:]+)",
        r#"|(?:([\w\-:]+)=([^\s"'<>]+))"#,
        r#"|(?:([\w\-:"]+)="([^"]*)")"#,
        r#"|(?:([\w\-:"]+)='([^']*)')"#,
        r")(?=(?:\s|/|>)+)",
    ))
    .expect("attribute pattern")
});

static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([\w\-]+)\s*:([^;]*)(;|$)").expect("declaration pattern"));

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("number pattern")
});

/// Camel-case flavour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMode {
    /// `backgroundColor`
    #[default]
    Lower,
    /// `BackgroundColor`
    Upper,
}

/// Convert a hyphenated name to camel case
pub fn to_camel_case(value: &str, mode: CaseMode) -> String {
    value
        .split('-')
        .enumerate()
        .map(|(index, segment)| {
            let mut chars = segment.chars();
            let Some(first) = chars.next() else {
                return String::new();
            };
            let head: String = if mode == CaseMode::Upper || index > 0 {
                first.to_uppercase().collect()
            } else {
                first.to_lowercase().collect()
            };
            head + chars.as_str()
        })
        .collect()
}

/// Replace every `rgb(r, g, b)` with `#RRGGBB`
pub fn to_hex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in RGB.captures_iter(text) {
        let caps = match caps {
            Ok(caps) => caps,
            Err(err) => {
                tracing::warn!("Color scan aborted: {}", err);
                break;
            }
        };
        let (Some(whole), Some(hex)) = (caps.get(0), channels_hex(&caps)) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&hex);
        last = whole.end();
    }

    out.push_str(&text[last..]);
    out
}

fn channels_hex(caps: &fancy_regex::Captures<'_>) -> Option<String> {
    let mut hex = String::from("#");
    for group in 1..=3 {
        let channel: u64 = caps.get(group)?.as_str().parse().ok()?;
        hex.push_str(&format!("{channel:02X}"));
    }
    Some(hex)
}

/// Input accepted by [`to_map`]
#[derive(Debug, Clone)]
pub enum MapInput<'a> {
    /// Delimited text
    Text(&'a str),
    /// Already split entries
    Items(Vec<&'a str>),
}

impl<'a> From<&'a str> for MapInput<'a> {
    fn from(text: &'a str) -> Self {
        MapInput::Text(text)
    }
}

impl<'a> From<&'a [&'a str]> for MapInput<'a> {
    fn from(items: &'a [&'a str]) -> Self {
        MapInput::Items(items.to_vec())
    }
}

impl<'a> From<Vec<&'a str>> for MapInput<'a> {
    fn from(items: Vec<&'a str>) -> Self {
        MapInput::Items(items)
    }
}

/// Build an inclusion set. Entries of the form `a..b` expand to every
/// integer in the inclusive range, up to [`MAX_RANGE_SPAN`] keys. The
/// delimiter defaults to `,`.
pub fn to_map<'a>(value: impl Into<MapInput<'a>>, delimiter: Option<&str>) -> HashMap<String, bool> {
    let items = match value.into() {
        MapInput::Text(text) => text.split(delimiter.unwrap_or(",")).collect(),
        MapInput::Items(items) => items,
    };

    let mut map = HashMap::new();
    for item in items {
        match parse_range(item) {
            Some((start, end)) if end.saturating_sub(start) >= MAX_RANGE_SPAN => {
                tracing::warn!("Range {:?} exceeds {} keys, kept literally", item, MAX_RANGE_SPAN);
                map.insert(item.to_string(), true);
            }
            Some((start, end)) => {
                for i in start..=end {
                    map.insert(i.to_string(), true);
                }
            }
            None => {
                map.insert(item.to_string(), true);
            }
        }
    }
    map
}

fn parse_range(item: &str) -> Option<(u64, u64)> {
    let caps = RANGE.captures(item).ok()??;
    let start = caps.get(1)?.as_str().parse().ok()?;
    let end = caps.get(2)?.as_str().parse().ok()?;
    Some((start, end))
}

/// Scan serialized start-tag markup for attributes. Keys are lowercased and
/// bare attributes map to `""`.
pub fn get_attr_map(markup: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();

    for caps in ATTRIBUTE.captures_iter(markup) {
        let caps = match caps {
            Ok(caps) => caps,
            Err(err) => {
                tracing::warn!("Attribute scan aborted: {}", err);
                break;
            }
        };
        let group = |i: usize| caps.get(i).map(|m| m.as_str());

        let Some(key) = group(1).or(group(2)).or(group(4)).or(group(6)) else {
            continue;
        };
        let value = if group(2).is_some() {
            group(3)
        } else if group(4).is_some() {
            group(5)
        } else {
            group(7)
        };
        map.insert(key.to_lowercase(), value.unwrap_or_default().to_string());
    }
    map
}

/// Scan `key: value;` declarations. Keys are lowercased, colors in values
/// normalized to hex.
pub fn get_style_map(style: &str) -> HashMap<String, String> {
    let style = style.replace("&quot;", "\"");
    let mut map = HashMap::new();

    for caps in DECLARATION.captures_iter(&style) {
        let caps = match caps {
            Ok(caps) => caps,
            Err(err) => {
                tracing::warn!("Style scan aborted: {}", err);
                break;
            }
        };
        let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        map.insert(
            key.as_str().to_lowercase().trim().to_string(),
            to_hex(value.as_str()).trim().to_string(),
        );
    }
    map
}

/// Computed value of one property of `node`, through the document's window.
/// `None` for nodes without computed style.
pub fn get_computed_style(doc: &Document, node: NodeId, name: &str) -> Option<String> {
    let style = doc.computed_style(node)?;
    let value = style.get_property_value(&to_camel_case(name, CaseMode::Lower));
    Some(value.to_string())
}

/// Leading decimal number of a CSS value (`"12.5px"` is `12.5`)
pub(crate) fn parse_float(value: &str) -> Option<f64> {
    let found = LEADING_NUMBER.find(value).ok()??;
    found.as_str().trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("background-color", CaseMode::Lower), "backgroundColor");
        assert_eq!(to_camel_case("background-color", CaseMode::Upper), "BackgroundColor");
        assert_eq!(to_camel_case("Width", CaseMode::default()), "width");
        assert_eq!(to_camel_case("-webkit-box", CaseMode::Lower), "WebkitBox");
        assert_eq!(to_camel_case("", CaseMode::Lower), "");
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex("rgb(255,0,0)"), "#FF0000");
        assert_eq!(to_hex("1px solid RGB( 1 , 2 ,3 )"), "1px solid #010203");
        assert_eq!(
            to_hex("rgb(0,0,0) to rgb(16, 32, 255)"),
            "#000000 to #1020FF"
        );
        assert_eq!(to_hex("rgba(1,2,3,0.5)"), "rgba(1,2,3,0.5)");
    }

    #[test]
    fn test_to_map() {
        let expected: HashMap<String, bool> = ["1", "2", "3", "7"]
            .iter()
            .map(|k| (k.to_string(), true))
            .collect();
        assert_eq!(to_map("1..3,7", None), expected);
        assert_eq!(to_map(vec!["1..3", "7"], None), expected);
        assert_eq!(to_map("a|b", Some("|")).len(), 2);
        assert!(to_map("3..1", None).is_empty());
    }

    #[test]
    fn test_to_map_oversized_range_is_literal() {
        let map = to_map("0..18446744073709551615", None);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("0..18446744073709551615"));

        let widest = format!("1..{MAX_RANGE_SPAN}");
        assert_eq!(to_map(widest.as_str(), None).len() as u64, MAX_RANGE_SPAN);
    }

    #[test]
    fn test_attr_map_shapes() {
        let markup = r#"<input id="x" class='a b' type=text disabled data-x="">"#;
        assert_eq!(
            get_attr_map(markup),
            map(&[
                ("id", "x"),
                ("class", "a b"),
                ("type", "text"),
                ("disabled", ""),
                ("data-x", ""),
            ])
        );
    }

    #[test]
    fn test_attr_map_keys_lowercased() {
        assert_eq!(get_attr_map(r#"<div DATA-Foo="Bar"></div>"#), map(&[("data-foo", "Bar")]));
    }

    #[test]
    fn test_attr_map_self_closing_and_empty() {
        assert_eq!(get_attr_map("<br hidden/>"), map(&[("hidden", "")]));
        assert!(get_attr_map("<div></div>").is_empty());
    }

    #[test]
    fn test_style_map() {
        assert_eq!(
            get_style_map("color: rgb(255,0,0); margin:4px;"),
            map(&[("color", "#FF0000"), ("margin", "4px")])
        );
        assert_eq!(
            get_style_map("font-family: &quot;A&quot;; COLOR: red"),
            map(&[("font-family", "\"A\""), ("color", "red")])
        );
    }

    #[test]
    fn test_computed_style_lookup() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        doc.tree.set_attribute(body, "style", "background-color: red");

        assert_eq!(get_computed_style(&doc, body, "display").as_deref(), Some("block"));
        assert_eq!(
            get_computed_style(&doc, body, "background-color").as_deref(),
            Some("red")
        );
        let text = doc.tree.create_text("x");
        assert_eq!(get_computed_style(&doc, text, "display"), None);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("12.5px"), Some(12.5));
        assert_eq!(parse_float(" -3"), Some(-3.0));
        assert_eq!(parse_float(".5em"), Some(0.5));
        assert_eq!(parse_float("1e2"), Some(100.0));
        assert_eq!(parse_float("auto"), None);
        assert_eq!(parse_float(""), None);
    }
}
