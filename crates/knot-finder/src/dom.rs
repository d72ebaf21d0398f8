//! Document access
//!
//! Everything the finder needs from a document model: element accessors,
//! sibling positions, a selector query engine and identifier escaping.

use std::fmt::Debug;
use std::hash::Hash;

/// Failure reported by the host query engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A document the finder can search and query.
///
/// The document must not change while a search runs.
pub trait Dom {
    /// Node handle
    type Node: Copy + Eq + Hash + Debug;

    /// The document node, used as the default query scope
    fn document(&self) -> Self::Node;

    /// Check if `node` is an element
    fn is_element(&self, node: Self::Node) -> bool;

    /// Parent of any kind (the document node included)
    fn parent_node(&self, node: Self::Node) -> Option<Self::Node>;

    /// Parent, only if it is an element
    fn parent_element(&self, node: Self::Node) -> Option<Self::Node> {
        self.parent_node(node).filter(|&parent| self.is_element(parent))
    }

    /// Check if `node` is a strict descendant of `scope`
    fn contains(&self, scope: Self::Node, node: Self::Node) -> bool {
        let mut cur = self.parent_node(node);
        while let Some(parent) = cur {
            if parent == scope {
                return true;
            }
            cur = self.parent_node(parent);
        }
        false
    }

    /// Tag name of an element
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// Value of the `id` attribute
    fn id(&self, node: Self::Node) -> Option<&str>;

    /// Class tokens in source order
    fn class_list(&self, node: Self::Node) -> Vec<&str>;

    /// Attribute name/value pairs in source order, `class` excluded
    fn attributes(&self, node: Self::Node) -> Vec<(&str, &str)>;

    /// 1-based position among element siblings; `None` without a parent
    fn sibling_index(&self, node: Self::Node) -> Option<usize>;

    /// 1-based position among element siblings with the same tag
    fn sibling_index_of_tag(&self, node: Self::Node) -> Option<usize>;

    /// Every element strictly inside `scope` matching `selector`, in document order
    fn query_all(&self, scope: Self::Node, selector: &str) -> Result<Vec<Self::Node>, QueryError>;

    /// Escape an id, class, attribute name or value into a selector token
    fn escape(&self, token: &str) -> String;
}
