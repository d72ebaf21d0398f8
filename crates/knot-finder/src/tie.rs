//! Fragment generation for a single element

use crate::config::Options;
use crate::dom::Dom;
use crate::knot::{Knot, penalty};

/// Candidate fragments for `node`, ordered by kind: id, classes,
/// attributes, tag, nth-of-type, nth-child. Levels are set to 0.
pub fn tie<D: Dom>(dom: &D, node: D::Node, options: &Options<D::Node>) -> Vec<Knot> {
    let mut knots = Vec::new();

    if let Some(id) = dom.id(node).filter(|id| !id.is_empty()) {
        if (options.id_name)(id) {
            knots.push(Knot::new(format!("#{}", dom.escape(id)), penalty::ID, 0));
        }
    }

    for class in dom.class_list(node) {
        if (options.class_name)(class) {
            knots.push(Knot::new(format!(".{}", dom.escape(class)), penalty::CLASS, 0));
        }
    }

    for (name, value) in dom.attributes(node) {
        if (options.attr)(name, value) {
            let fragment = format!("[{}=\"{}\"]", dom.escape(name), dom.escape(value));
            knots.push(Knot::new(fragment, penalty::ATTRIBUTE, 0));
        }
    }

    let tag = dom.tag_name(node).unwrap_or_default().to_ascii_lowercase();
    if (options.tag_name)(&tag) {
        knots.push(Knot::new(tag.clone(), penalty::TAG, 0));
        if let Some(index) = dom.sibling_index_of_tag(node) {
            knots.push(Knot::new(nth_of_type(&tag, index), penalty::NTH_OF_TYPE, 0));
        }
    }

    if let Some(index) = dom.sibling_index(node) {
        knots.push(Knot::new(nth_child(&tag, index), penalty::NTH_CHILD, 0));
    }

    knots
}

/// `tag:nth-of-type(index)`; the root element is always plain `html`
pub(crate) fn nth_of_type(tag: &str, index: usize) -> String {
    if tag == "html" {
        return tag.to_string();
    }
    format!("{tag}:nth-of-type({index})")
}

/// `tag:nth-child(index)`; the root element is always plain `html`
pub(crate) fn nth_child(tag: &str, index: usize) -> String {
    if tag == "html" {
        return tag.to_string();
    }
    format!("{tag}:nth-child({index})")
}
