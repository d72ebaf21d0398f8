//! Uniqueness checks

use std::collections::HashMap;

use crate::dom::Dom;
use crate::error::FinderError;
use crate::knot::Knot;
use crate::render::selector;

/// Answers whether a path selects exactly the target set inside the scope.
/// Verdicts are memoized per rendered selector for the lifetime of the oracle.
pub(crate) struct Oracle<'a, D: Dom> {
    dom: &'a D,
    scope: D::Node,
    targets: &'a [D::Node],
    verdicts: HashMap<String, bool>,
}

impl<'a, D: Dom> Oracle<'a, D> {
    pub fn new(dom: &'a D, scope: D::Node, targets: &'a [D::Node]) -> Self {
        Self {
            dom,
            scope,
            targets,
            verdicts: HashMap::new(),
        }
    }

    pub fn is_unique(&mut self, path: &[Knot]) -> Result<bool, FinderError> {
        let css = selector(path);
        if let Some(&unique) = self.verdicts.get(&css) {
            return Ok(unique);
        }

        let matched = self
            .dom
            .query_all(self.scope, &css)
            .map_err(|e| FinderError::Query {
                selector: css.clone(),
                message: e.message,
            })?;
        if matched.is_empty() {
            return Err(FinderError::NoMatch { selector: css });
        }

        let unique = matched.len() == self.targets.len()
            && self.targets.iter().all(|target| matched.contains(target));
        tracing::trace!(selector = %css, matched = matched.len(), unique, "uniqueness check");
        self.verdicts.insert(css, unique);
        Ok(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knot::penalty;
    use knot_css::ElementQuery;

    #[test]
    fn test_unique_and_ambiguous() {
        let doc = knot_html::parse("<p class=\"a\"></p><p></p>");
        let first = doc.query_selector(doc.tree().root(), "p").unwrap().unwrap();
        let targets = [first];
        let mut oracle = Oracle::new(&doc, doc.document(), &targets);

        assert!(oracle.is_unique(&[Knot::new(".a", penalty::CLASS, 0)]).unwrap());
        assert!(!oracle.is_unique(&[Knot::new("p", penalty::TAG, 0)]).unwrap());
        // Memoized verdict
        assert!(!oracle.is_unique(&[Knot::new("p", penalty::TAG, 0)]).unwrap());
    }

    #[test]
    fn test_zero_matches_is_an_error() {
        let doc = knot_html::parse("<p></p>");
        let p = doc.query_selector(doc.tree().root(), "p").unwrap().unwrap();
        let targets = [p];
        let mut oracle = Oracle::new(&doc, doc.document(), &targets);

        let err = oracle.is_unique(&[Knot::new("span", penalty::TAG, 0)]).unwrap_err();
        assert_eq!(err, FinderError::NoMatch { selector: "span".into() });
    }

    #[test]
    fn test_rejected_selector_is_a_query_error() {
        let doc = knot_html::parse("<p></p>");
        let p = doc.query_selector(doc.tree().root(), "p").unwrap().unwrap();
        let targets = [p];
        let mut oracle = Oracle::new(&doc, doc.document(), &targets);

        let err = oracle.is_unique(&[Knot::new("p[", penalty::TAG, 0)]).unwrap_err();
        assert!(matches!(err, FinderError::Query { .. }));
    }
}
