//! HTML5 Parser implementation
//!
//! Parses into html5ever's RcDom and converts that into our arena DOM.

use crate::HtmlError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use knot_dom::{Document, DomTree, Node, NodeData, NodeId, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        self.convert(&dom, url)
    }

    /// Parse raw bytes, decoding them as UTF-8
    pub fn parse_bytes(&self, mut bytes: &[u8], url: &str) -> Result<Document, HtmlError> {
        tracing::debug!("Parsing HTML bytes: {} ({} bytes)", url, bytes.len());

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut bytes)?;
        Ok(self.convert(&dom, url))
    }

    fn convert(&self, dom: &RcDom, url: &str) -> Document {
        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Convert an RcDom node (and its subtree) under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Doctype {
                name,
                public_id,
                system_id,
            } => {
                let name = tree.interner_mut().intern(name);
                let id = tree.insert(Node::new(NodeData::Doctype {
                    name,
                    public_id: public_id.to_string(),
                    system_id: system_id.to_string(),
                }));
                tree.append_child(parent, id);
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                // Whitespace-only text never affects element positions
                if !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id);
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let ns = tree.interner_mut().intern(&name.ns);
                let local = tree.interner_mut().intern(&name.local);
                let id = tree.insert(Node::element(QualName::new(ns, local)));

                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value);
                }
                tree.append_child(parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {}
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
