//! knot-html - HTML loading
//!
//! Parses HTML with html5ever and converts the result into a
//! [`knot_dom::Document`].

mod parser;

pub use knot_dom::Document;
pub use parser::HtmlParser;

/// Parse an HTML string into a document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// HTML loading error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
