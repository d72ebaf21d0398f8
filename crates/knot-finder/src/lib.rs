//! knot-finder - Unique CSS selector generation
//!
//! Given one or more elements, produce a short, readable selector that
//! matches exactly those elements. Ids, word-like class names and
//! whitelisted attributes are preferred over tag names, which are preferred
//! over positional pseudo-classes.
//!
//! ```ignore
//! let doc = knot_html::parse(html);
//! let selector = knot_finder::find_one(&doc, node)?;
//! ```
//!
//! Any document model can be searched by implementing [`Dom`]; the
//! knot-dom `Document` implements it out of the box.

mod adapter;
mod budget;
mod config;
mod dom;
mod error;
mod fallback;
mod finder;
mod knot;
mod optimize;
mod oracle;
mod permute;
pub mod predicates;
mod render;
mod search;
mod tie;

pub use config::{AttrPredicate, NamePredicate, Options, SearchLimits};
pub use dom::{Dom, QueryError};
pub use error::{FinderError, NotFoundReason};
pub use finder::{find, find_one};
pub use knot::{Knot, Path, by_penalty, penalty, score};
pub use render::selector;
pub use tie::tie;
