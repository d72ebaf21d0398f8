//! Comprehensive tests for knot-html
//!
//! Conversion of parsed HTML into the arena DOM.

use knot_html::{Document, HtmlParser};

fn first_by_tag(doc: &Document, tag: &str) -> knot_dom::NodeId {
    let tree = doc.tree();
    tree.descendants(tree.root())
        .find(|&id| tree.tag_name(id) == Some(tag))
        .unwrap_or_else(|| panic!("no <{tag}> in document"))
}

#[test]
fn test_parse_structure() {
    let doc = HtmlParser::new().parse("<html><head></head><body><p>x</p></body></html>");
    let tree = doc.tree();

    assert_eq!(tree.tag_name(doc.document_element()), Some("html"));
    assert_eq!(tree.tag_name(doc.head()), Some("head"));
    assert_eq!(tree.tag_name(doc.body()), Some("body"));
}

#[test]
fn test_parse_with_attributes() {
    let html = r#"
        <nav id="main" class="links  primary" data-kind="top">
            <a href="/docs" rel="help">Docs</a>
        </nav>
    "#;

    let doc = HtmlParser::new().parse(html);
    let tree = doc.tree();
    let nav = doc.get_element_by_id("main").unwrap();
    let elem = tree.as_element(nav).unwrap();

    let classes: Vec<_> = elem.classes.iter().map(|&c| tree.resolve(c)).collect();
    assert_eq!(classes, vec!["links", "primary"]);
    assert_eq!(tree.attribute(nav, "data-kind"), Some("top"));

    let a = first_by_tag(&doc, "a");
    assert_eq!(tree.attribute(a, "rel"), Some("help"));
    assert_eq!(tree.parent_element(a), Some(nav));
}

#[test]
fn test_whitespace_text_dropped() {
    let html = "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>";
    let doc = HtmlParser::new().parse(html);
    let tree = doc.tree();
    let ul = first_by_tag(&doc, "ul");

    assert_eq!(tree.children(ul).count(), 2);
}

#[test]
fn test_sibling_positions() {
    let html = "<div><span></span><p></p><span></span></div>";
    let doc = HtmlParser::new().parse(html);
    let tree = doc.tree();
    let div = first_by_tag(&doc, "div");
    let children: Vec<_> = tree.element_children(div).collect();

    assert_eq!(tree.element_index(children[2]), Some(3));
    assert_eq!(tree.element_index_of_type(children[2]), Some(2));
    assert_eq!(tree.element_index(doc.document_element()), Some(1));
}

#[test]
fn test_parse_comments() {
    let html = r#"
        <!-- header -->
        <div>
            <!-- list of
                 items -->
            <p>Content</p>
        </div>
    "#;

    let doc = HtmlParser::new().parse(html);
    let tree = doc.tree();
    let p = first_by_tag(&doc, "p");
    // The comment precedes <p> but is not an element
    assert_eq!(tree.element_index(p), Some(1));
}

#[test]
fn test_parse_table_inserts_tbody() {
    let html = "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>";

    let doc = HtmlParser::new().parse(html);
    let tree = doc.tree();
    let cells = tree
        .descendants(tree.root())
        .filter(|&id| tree.tag_name(id) == Some("td"))
        .count();
    assert_eq!(cells, 3);

    // Rows end up under an implied <tbody>
    let tr = first_by_tag(&doc, "tr");
    let parent = tree.parent_element(tr).and_then(|p| tree.tag_name(p));
    assert_eq!(parent, Some("tbody"));
}

#[test]
fn test_parse_large_document() {
    let items: String = (0..1000)
        .map(|i| format!(r#"<li id="row-{i}"><span>{i}</span></li>"#))
        .collect();
    let doc = HtmlParser::new().parse(&format!("<ul>{items}</ul>"));

    assert!(doc.tree().len() > 3000);
    let last = doc.get_element_by_id("row-999").unwrap();
    assert_eq!(doc.tree().element_index(last), Some(1000));
}
