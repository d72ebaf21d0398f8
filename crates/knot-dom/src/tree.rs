//! DOM Tree (arena-based allocation)

use crate::{ElementData, Node, NodeData, NodeId, QualName, StringInterner};

/// Arena-based DOM tree. Slot 0 is always the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree, document node included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move an unlinked node into the arena
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element. HTML tag names are stored lower-cased.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let local = self.interner.intern(&tag.to_ascii_lowercase());
        self.insert(Node::element(QualName::local(local)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.insert(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.insert(Node::comment(content.to_string()))
    }

    /// Append `child` as the last child of `parent`, unlinking it first if needed
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Unlink a node from its parent and siblings
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Set an attribute on an element, keeping the id and class caches in sync.
    /// Returns false when `id` is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let local = self.interner.intern(name);
        let cached_id = (name == "id").then(|| self.interner.intern(value));
        let classes: Vec<_> = if name == "class" {
            value
                .split_ascii_whitespace()
                .map(|class| self.interner.intern(class))
                .collect()
        } else {
            Vec::new()
        };

        let Some(elem) = self.get_mut(id).and_then(Node::as_element_mut) else {
            return false;
        };
        match name {
            "id" => elem.id = cached_id,
            "class" => elem.classes = classes,
            _ => {}
        }
        elem.set_attr(QualName::local(local), value.to_string());
        true
    }

    /// Access the string interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Access the string interner mutably
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned string
    #[inline]
    pub fn resolve(&self, s: crate::InternedString) -> &str {
        self.interner.get(s)
    }

    /// Element data for `id`, if it is an element
    #[inline]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Local tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| self.resolve(e.name.local))
    }

    /// Attribute value by name
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.as_element(id)?.get_attr(name)
    }

    /// Parent node of any kind
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Parent node, only if it is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.as_element(p).is_some())
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate over direct children that are elements
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
    }

    /// Iterate over ancestors, nearest first, excluding `id` itself
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id).unwrap_or(NodeId::NONE),
        }
    }

    /// Pre-order walk of everything below `id`, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Nearest preceding sibling that is an element
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.get(id)?.prev_sibling;
        while cur.is_valid() {
            let node = self.get(cur)?;
            if node.is_element() {
                return Some(cur);
            }
            cur = node.prev_sibling;
        }
        None
    }

    /// 1-based position among element siblings; `None` without a parent
    pub fn element_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.element_children(parent)
            .position(|child| child == id)
            .map(|pos| pos + 1)
    }

    /// 1-based position among element siblings with the same tag name
    pub fn element_index_of_type(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        let name = self.as_element(id)?.name.local;
        self.element_children(parent)
            .filter(|&child| self.as_element(child).is_some_and(|e| e.name.local == name))
            .position(|child| child == id)
            .map(|pos| pos + 1)
    }

    /// Number of element siblings, `id` included
    pub fn element_sibling_count(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        Some(self.element_children(parent).count())
    }

    /// Number of element siblings sharing the tag name, `id` included
    pub fn element_sibling_count_of_type(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        let name = self.as_element(id)?.name.local;
        Some(
            self.element_children(parent)
                .filter(|&child| self.as_element(child).is_some_and(|e| e.name.local == name))
                .count(),
        )
    }

    /// Check whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Check whether the element has no element or text children
    pub fn is_empty_element(&self, id: NodeId) -> bool {
        self.children(id)
            .all(|(_, node)| !matches!(node.data, NodeData::Element(_) | NodeData::Text(_)))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Iterator over the ancestors of a node
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some(id)
    }
}

/// Pre-order iterator over the subtree below a node
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Descendants<'_> {
    fn successor(&self, id: NodeId) -> NodeId {
        let Some(node) = self.tree.get(id) else {
            return NodeId::NONE;
        };
        if node.first_child.is_valid() {
            return node.first_child;
        }

        let mut cur = id;
        while cur != self.root {
            let Some(node) = self.tree.get(cur) else {
                break;
            };
            if node.next_sibling.is_valid() {
                return node.next_sibling;
            }
            cur = node.parent;
        }
        NodeId::NONE
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next;
        self.tree.get(id)?;
        self.next = self.successor(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_tree() -> (DomTree, NodeId, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        tree.append_child(tree.root(), ul);
        let items: Vec<_> = ["li", "p", "li"]
            .iter()
            .map(|tag| {
                let id = tree.create_element(tag);
                tree.append_child(ul, id);
                id
            })
            .collect();
        (tree, ul, items)
    }

    #[test]
    fn test_element_index() {
        let (tree, ul, items) = list_tree();
        assert_eq!(tree.element_index(items[0]), Some(1));
        assert_eq!(tree.element_index(items[2]), Some(3));
        assert_eq!(tree.element_index_of_type(items[2]), Some(2));
        assert_eq!(tree.element_index_of_type(items[1]), Some(1));
        assert_eq!(tree.element_index(ul), Some(1));
    }

    #[test]
    fn test_detached_has_no_index() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        assert_eq!(tree.element_index(div), None);
        assert_eq!(tree.element_index_of_type(div), None);
    }

    #[test]
    fn test_text_does_not_shift_index() {
        let (mut tree, ul, items) = list_tree();
        let text = tree.create_text("hi");
        tree.append_child(ul, text);
        let li = tree.create_element("li");
        tree.append_child(ul, li);
        assert_eq!(tree.element_index(li), Some(4));
        assert_eq!(tree.element_sibling_count(items[0]), Some(4));
        assert_eq!(tree.element_sibling_count_of_type(items[0]), Some(3));
    }

    #[test]
    fn test_descendants_preorder() {
        let (tree, ul, items) = list_tree();
        let all: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(all, vec![ul, items[0], items[1], items[2]]);

        let below_ul: Vec<_> = tree.descendants(ul).collect();
        assert_eq!(below_ul, items);
        assert_eq!(tree.descendants(items[0]).count(), 0);
    }

    #[test]
    fn test_append_moves_child() {
        let (mut tree, ul, items) = list_tree();
        tree.append_child(ul, items[0]);
        let order: Vec<_> = tree.element_children(ul).collect();
        assert_eq!(order, vec![items[1], items[2], items[0]]);
    }

    #[test]
    fn test_set_attribute_updates_caches() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        assert!(tree.set_attribute(div, "id", "main"));
        assert!(tree.set_attribute(div, "class", "a  b"));

        let elem = tree.as_element(div).unwrap();
        assert_eq!(elem.id.map(|id| tree.resolve(id)), Some("main"));
        assert_eq!(elem.classes.len(), 2);
        assert_eq!(tree.attribute(div, "class"), Some("a  b"));

        let text = tree.create_text("x");
        assert!(!tree.set_attribute(text, "id", "nope"));
    }
}
