//! Document
//!
//! Owns the tree and remembers where the root, head and body elements are.

use crate::{DomTree, NodeId};

/// A parsed or hand-built HTML document.
///
/// The structural elements are `NodeId::NONE` until they exist.
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Document node only; call `finalize` once the tree is built
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate <html>, <head> and <body> after the tree was built externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let find_child = |parent: NodeId, tag: &str| {
            tree.element_children(parent)
                .find(|&child| tree.tag_name(child) == Some(tag))
                .unwrap_or(NodeId::NONE)
        };

        self.html_element = find_child(tree.root(), "html");
        if self.html_element.is_valid() {
            self.head_element = find_child(self.html_element, "head");
            self.body_element = find_child(self.html_element, "body");
        }

        tracing::trace!(
            nodes = self.tree.len(),
            has_body = self.body_element.is_valid(),
            "document finalized"
        );
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    pub fn head(&self) -> NodeId {
        self.head_element
    }

    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// First element in document order whose id is `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let wanted = self.tree.interner().lookup(id)?;
        self.tree
            .descendants(self.tree.root())
            .find(|&node| self.tree.as_element(node).is_some_and(|e| e.id == Some(wanted)))
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
