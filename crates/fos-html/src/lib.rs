//! fOS HTML Parser
//!
//! HTML5 parsing built on html5ever, plus the serializer that turns the
//! arena tree back into markup.

mod parser;
mod serializer;

pub use fos_dom::Document;
pub use parser::HtmlParser;
pub use serializer::{get_inner_html, get_outer_html, HtmlSerializer};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}
