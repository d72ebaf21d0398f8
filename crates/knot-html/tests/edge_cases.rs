//! Edge case tests for knot-html
//!
//! Malformed and unusual markup still produces a usable tree.

use knot_html::HtmlParser;

#[test]
fn test_parse_only_whitespace() {
    let doc = HtmlParser::new().parse("   \t\n\r\n   ");
    assert!(doc.body().is_valid());
}

#[test]
fn test_parse_only_doctype() {
    let doc = HtmlParser::new().parse("<!DOCTYPE html>");
    assert!(doc.document_element().is_valid());
}

#[test]
fn test_parse_unclosed_tags() {
    let doc = HtmlParser::new().parse("<div><p><span>text");
    let tree = doc.tree();
    let span = tree
        .descendants(tree.root())
        .find(|&id| tree.tag_name(id) == Some("span"))
        .unwrap();
    assert_eq!(tree.ancestors(span).count(), 5); // p, div, body, html, document
}

#[test]
fn test_duplicate_ids_preserved() {
    let doc = HtmlParser::new().parse(r#"<div id="foo"></div><div id="foo"></div>"#);
    let tree = doc.tree();
    let with_id = tree
        .descendants(tree.root())
        .filter(|&id| tree.attribute(id, "id") == Some("foo"))
        .count();
    assert_eq!(with_id, 2);
}

#[test]
fn test_uppercase_tags_lowercased() {
    let doc = HtmlParser::new().parse("<DIV CLASS=\"Box\"></DIV>");
    let tree = doc.tree();
    let div = tree.element_children(doc.body()).next().unwrap();
    assert_eq!(tree.tag_name(div), Some("div"));
    assert_eq!(tree.attribute(div, "class"), Some("Box"));
}

#[test]
fn test_invalid_utf8_bytes() {
    let doc = HtmlParser::new()
        .parse_bytes(b"<p>\xff\xfe</p>", "about:blank")
        .unwrap();
    assert!(doc.body().is_valid());
}
