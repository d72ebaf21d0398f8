//! knot-css - Selector engine
//!
//! Parses CSS selectors and runs them against the knot-dom arena. This is the
//! query capability the selector finder verifies its candidates with.

mod escape;
mod parser;
mod query;
pub mod selectors;

pub use escape::escape_identifier;
pub use parser::parse_selector_list;
pub use query::{ElementQuery, select_all};
pub use selectors::{ComplexSelector, CompoundSelector, SelectorList};

/// Selector parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },

    #[error("unexpected end of selector")]
    UnexpectedEnd,

    #[error("unterminated string")]
    UnterminatedString,

    #[error("unterminated attribute selector")]
    UnterminatedAttribute,

    #[error("invalid nth expression: {0:?}")]
    InvalidNth(String),

    #[error("unsupported pseudo-class: {0}")]
    UnsupportedPseudo(String),
}
