//! `Dom` implementation for the knot-dom document, queried through knot-css

use crate::dom::{Dom, QueryError};
use knot_css::{ElementQuery, escape_identifier};
use knot_dom::{Document, NodeId};

impl Dom for Document {
    type Node = NodeId;

    fn document(&self) -> NodeId {
        self.tree().root()
    }

    fn is_element(&self, node: NodeId) -> bool {
        self.tree().as_element(node).is_some()
    }

    fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.tree().parent(node)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tree().tag_name(node)
    }

    fn id(&self, node: NodeId) -> Option<&str> {
        let tree = self.tree();
        tree.as_element(node)?.id.map(|id| tree.resolve(id))
    }

    fn class_list(&self, node: NodeId) -> Vec<&str> {
        let tree = self.tree();
        tree.as_element(node)
            .map(|elem| elem.classes.iter().map(|&class| tree.resolve(class)).collect())
            .unwrap_or_default()
    }

    fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        let tree = self.tree();
        let Some(elem) = tree.as_element(node) else {
            return Vec::new();
        };
        elem.attrs
            .iter()
            .map(|attr| (tree.resolve(attr.name.local), attr.value.as_str()))
            .filter(|&(name, _)| name != "class")
            .collect()
    }

    fn sibling_index(&self, node: NodeId) -> Option<usize> {
        self.tree().element_index(node)
    }

    fn sibling_index_of_tag(&self, node: NodeId) -> Option<usize> {
        self.tree().element_index_of_type(node)
    }

    fn query_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, QueryError> {
        self.query_selector_all(scope, selector)
            .map_err(|e| QueryError::new(e.to_string()))
    }

    fn escape(&self, token: &str) -> String {
        escape_identifier(token)
    }
}
