//! Element Query
//!
//! querySelectorAll, querySelector, matches and closest over the arena DOM.

use crate::{SelectorError, SelectorList, parse_selector_list};
use knot_dom::{Document, DomTree, NodeId};

/// Selector queries against a DOM
pub trait ElementQuery {
    /// Every element strictly inside `scope` matching `selector`, in document
    /// order. Combinators may match ancestors outside `scope`.
    fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError>;

    /// First element inside `scope` matching `selector`
    fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// Check if `element` matches `selector`
    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError>;

    /// Nearest inclusive ancestor of `element` matching `selector`
    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;
}

/// Run an already parsed selector list over the subtree below `scope`
pub fn select_all<'a>(
    tree: &'a DomTree,
    scope: NodeId,
    list: &'a SelectorList,
) -> impl Iterator<Item = NodeId> + 'a {
    tree.descendants(scope)
        .filter(move |&node| tree.as_element(node).is_some() && list.matches(tree, node))
}

impl ElementQuery for DomTree {
    fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        let found: Vec<_> = select_all(self, scope, &list).collect();
        tracing::trace!(selector, matched = found.len(), "query_selector_all");
        Ok(found)
    }

    fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        let first = select_all(self, scope, &list).next();
        Ok(first)
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        let list = parse_selector_list(selector)?;
        Ok(self.as_element(element).is_some() && list.matches(self, element))
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        let mut cur = self.as_element(element).map(|_| element);
        while let Some(node) = cur {
            if list.matches(self, node) {
                return Ok(Some(node));
            }
            cur = self.parent_element(node);
        }
        Ok(None)
    }
}

impl ElementQuery for Document {
    fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        self.tree().query_selector_all(scope, selector)
    }

    fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        self.tree().query_selector(scope, selector)
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        self.tree().matches(element, selector)
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        self.tree().closest(element, selector)
    }
}
