//! CSS Selectors
//!
//! Selector AST plus matching against the arena DOM.

use knot_dom::{DomTree, ElementData, NodeData, NodeId};

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// "odd" (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// "even" (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// A plain index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from strings like "2n+1", "odd", "even", "3", "-n + 3"
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match s.as_str() {
            "" => return None,
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a_str => a_str.parse().ok()?,
        };

        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else if rest.starts_with('+') || rest.starts_with('-') {
            rest.parse().ok()?
        } else {
            return None;
        };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        let diff = n - self.b;
        if self.a > 0 {
            diff >= 0 && diff % self.a == 0
        } else {
            diff <= 0 && diff % self.a == 0
        }
    }
}

/// Pseudo-classes the engine understands. All are structural.
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),
    /// :not() over a compound selector
    Not(CompoundSelector),
}

/// A simple selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :nth-child(), :first-of-type, etc.
    PseudoClass(PseudoClass),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(value)) = (&self.matcher, value) else {
            return self.matcher.is_none() && value.is_some();
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let value = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => value == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                value.split_ascii_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                value == expected || value.starts_with(&format!("{expected}-"))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && value.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && value.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && value.contains(&fold(expected))
            }
        }
    }
}

/// Simple selectors that must all hold for one element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// Relationship between two compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `A B`
    Descendant,
    /// `A > B`
    Child,
    /// `A + B`
    NextSibling,
    /// `A ~ B`
    SubsequentSibling,
}

/// Compounds joined by combinators, written left to right.
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`; the
/// last compound is the subject.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Check if any selector in the list matches `node`
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.selectors.iter().any(|sel| sel.matches(tree, node))
    }
}

/// Outcome of matching part of a complex selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchResult {
    Matched,
    NotMatched,
    /// No higher ancestor can satisfy the remaining compounds either
    NotMatchedGlobally,
}

impl ComplexSelector {
    /// Check if this selector matches `node`
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.match_from(tree, n - 1, node) == MatchResult::Matched,
        }
    }

    /// Match `compounds[..=idx]` with `compounds[idx]` anchored on `node`,
    /// backtracking over ancestors and siblings.
    fn match_from(&self, tree: &DomTree, idx: usize, node: NodeId) -> MatchResult {
        if !match_compound(&self.compounds[idx], tree, node) {
            return MatchResult::NotMatched;
        }
        if idx == 0 {
            return MatchResult::Matched;
        }

        let next = idx - 1;
        match self.combinators[next] {
            Combinator::Child => match tree.parent_element(node) {
                Some(parent) => self.match_from(tree, next, parent),
                None => MatchResult::NotMatchedGlobally,
            },
            Combinator::Descendant => {
                let mut cur = tree.parent_element(node);
                while let Some(ancestor) = cur {
                    match self.match_from(tree, next, ancestor) {
                        MatchResult::NotMatched => cur = tree.parent_element(ancestor),
                        result => return result,
                    }
                }
                MatchResult::NotMatchedGlobally
            }
            Combinator::NextSibling => match tree.prev_element_sibling(node) {
                Some(sibling) => local(self.match_from(tree, next, sibling)),
                None => MatchResult::NotMatched,
            },
            Combinator::SubsequentSibling => {
                let mut cur = tree.prev_element_sibling(node);
                while let Some(sibling) = cur {
                    if self.match_from(tree, next, sibling) == MatchResult::Matched {
                        return MatchResult::Matched;
                    }
                    cur = tree.prev_element_sibling(sibling);
                }
                MatchResult::NotMatched
            }
        }
    }
}

/// Sibling hops change the subject, so a global failure below them only
/// rules out this candidate.
fn local(result: MatchResult) -> MatchResult {
    match result {
        MatchResult::NotMatchedGlobally => MatchResult::NotMatched,
        other => other,
    }
}

/// Match a compound selector against an element
pub fn match_compound(compound: &CompoundSelector, tree: &DomTree, node: NodeId) -> bool {
    let Some(element) = tree.as_element(node) else {
        return false;
    };
    compound
        .components
        .iter()
        .all(|component| match_component(component, tree, node, element))
}

/// Match a single selector component against an element
pub fn match_component(
    component: &SelectorComponent,
    tree: &DomTree,
    node: NodeId,
    element: &ElementData,
) -> bool {
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => tree.resolve(element.name.local).eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => element.id.is_some_and(|own| tree.resolve(own) == id),
        SelectorComponent::Class(class) => element.classes.iter().any(|&c| tree.resolve(c) == class),
        SelectorComponent::Attribute(attr) => {
            let value = element
                .attrs
                .iter()
                .find(|a| tree.resolve(a.name.local).eq_ignore_ascii_case(&attr.name))
                .map(|a| a.value.as_str());
            attr.matches(value)
        }
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(pseudo, tree, node),
    }
}

/// Match a pseudo-class against an element
pub fn match_pseudo_class(pseudo: &PseudoClass, tree: &DomTree, node: NodeId) -> bool {
    let index = || tree.element_index(node);
    let type_index = || tree.element_index_of_type(node);
    let count = || tree.element_sibling_count(node);
    let type_count = || tree.element_sibling_count_of_type(node);
    let nth = |expr: &NthExpression, pos: Option<usize>| pos.is_some_and(|p| expr.matches(p as i32));
    let from_end = |pos: Option<usize>, total: Option<usize>| Some(total? - pos? + 1);

    match pseudo {
        PseudoClass::Root => tree
            .parent(node)
            .and_then(|p| tree.get(p))
            .is_some_and(|p| matches!(p.data, NodeData::Document)),
        PseudoClass::Empty => tree.is_empty_element(node),
        PseudoClass::FirstChild => index() == Some(1),
        PseudoClass::LastChild => index().is_some() && index() == count(),
        PseudoClass::OnlyChild => count() == Some(1),
        PseudoClass::FirstOfType => type_index() == Some(1),
        PseudoClass::LastOfType => type_index().is_some() && type_index() == type_count(),
        PseudoClass::OnlyOfType => type_count() == Some(1),
        PseudoClass::NthChild(expr) => nth(expr, index()),
        PseudoClass::NthLastChild(expr) => nth(expr, from_end(index(), count())),
        PseudoClass::NthOfType(expr) => nth(expr, type_index()),
        PseudoClass::NthLastOfType(expr) => nth(expr, from_end(type_index(), type_count())),
        PseudoClass::Not(compound) => !match_compound(compound, tree, node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(expr: NthExpression) -> Vec<i32> {
        (1..=8).filter(|&n| expr.matches(n)).collect()
    }

    #[test]
    fn test_nth_positions() {
        assert_eq!(positions(NthExpression::odd()), vec![1, 3, 5, 7]);
        assert_eq!(positions(NthExpression::even()), vec![2, 4, 6, 8]);
        assert_eq!(positions(NthExpression::index(5)), vec![5]);
        assert_eq!(positions(NthExpression::new(3, -1)), vec![2, 5, 8]);
        assert_eq!(positions(NthExpression::new(-1, 3)), vec![1, 2, 3]);
        assert!(positions(NthExpression::index(0)).is_empty());
    }

    #[test]
    fn test_nth_parse_forms() {
        let cases = [
            ("7", Some(NthExpression::index(7))),
            ("ODD", Some(NthExpression::odd())),
            ("n", Some(NthExpression::new(1, 0))),
            ("+3n-2", Some(NthExpression::new(3, -2))),
            ("-n+4", Some(NthExpression::new(-1, 4))),
            (" 4n + 1 ", Some(NthExpression::new(4, 1))),
            ("2x", None),
            ("", None),
        ];
        for (text, expected) in cases {
            assert_eq!(NthExpression::parse(text), expected, "{text:?}");
        }
    }

    fn attr(matcher: Option<AttributeMatcher>, case_insensitive: bool) -> AttributeSelector {
        AttributeSelector {
            name: "data-kind".to_string(),
            matcher,
            case_insensitive,
        }
    }

    #[test]
    fn test_attribute_value_matchers() {
        let exact = attr(Some(AttributeMatcher::Exact("blog".into())), false);
        assert!(exact.matches(Some("blog")));
        assert!(!exact.matches(Some("Blog")));
        assert!(!exact.matches(None));

        let folded = attr(Some(AttributeMatcher::Exact("blog".into())), true);
        assert!(folded.matches(Some("BLOG")));

        let word = attr(Some(AttributeMatcher::Contains("post".into())), false);
        assert!(word.matches(Some("blog post")));
        assert!(!word.matches(Some("blogpost")));

        let dash = attr(Some(AttributeMatcher::DashMatch("pt".into())), false);
        assert!(dash.matches(Some("pt-BR")));
        assert!(!dash.matches(Some("ptx")));

        let ends = attr(Some(AttributeMatcher::Suffix(".png".into())), false);
        assert!(ends.matches(Some("logo.png")));
        assert!(!ends.matches(Some("png")));
    }

    #[test]
    fn test_attribute_presence() {
        let present = attr(None, false);
        assert!(present.matches(Some("")));
        assert!(!present.matches(None));
    }
}
