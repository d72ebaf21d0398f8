//! Path shortening
//!
//! Removes interior knots one at a time and keeps every shorter path that
//! is still unique. The first knot (the target) and the last knot (the
//! outermost anchor) always stay.

use std::collections::HashSet;

use crate::budget::Budget;
use crate::dom::Dom;
use crate::error::FinderError;
use crate::knot::{Knot, Path, without};
use crate::oracle::Oracle;
use crate::render::selector;

pub(crate) struct Optimizer {
    min_length: usize,
    explored: HashSet<String>,
}

impl Optimizer {
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            explored: HashSet::new(),
        }
    }

    /// Push every unique shortening of `path` into `out`
    pub fn optimize<D: Dom>(
        &mut self,
        path: &[Knot],
        oracle: &mut Oracle<'_, D>,
        budget: &Budget,
        out: &mut Vec<Path>,
    ) -> Result<(), FinderError> {
        if path.len() <= 2 || path.len() <= self.min_length {
            return Ok(());
        }

        for index in 1..path.len() - 1 {
            if budget.timed_out() {
                tracing::debug!("optimization stopped at deadline");
                return Ok(());
            }
            let shorter = without(path, index);
            if !oracle.is_unique(&shorter)? {
                continue;
            }
            if !self.explored.insert(selector(&shorter)) {
                continue;
            }
            out.push(shorter.clone());
            self.optimize(&shorter, oracle, budget, out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchLimits;
    use crate::knot::penalty;
    use knot_css::ElementQuery;

    #[test]
    fn test_shortens_to_anchor_and_target() {
        let doc = knot_html::parse(
            "<div id=\"app\"><div><div><div><span>a</span></div></div></div></div>\
             <div><div><div><div><span>b</span></div></div></div></div>",
        );
        let span = doc.query_selector(doc.tree().root(), "span").unwrap().unwrap();
        let targets = [span];
        let mut oracle = Oracle::new(&doc, doc.document(), &targets);
        let budget = Budget::new(&SearchLimits::default());

        let path = vec![
            Knot::new("span", penalty::TAG, 0),
            Knot::new("div", penalty::TAG, 1),
            Knot::new("div", penalty::TAG, 2),
            Knot::new("div", penalty::TAG, 3),
            Knot::new("#app", penalty::ID, 4),
        ];
        let mut out = Vec::new();
        Optimizer::new(2).optimize(&path, &mut oracle, &budget, &mut out).unwrap();

        let rendered: Vec<String> = out.iter().map(|p| selector(p)).collect();
        assert!(rendered.contains(&"#app span".to_string()));
        assert!(out.iter().all(|p| p.first() == path.first() && p.last() == path.last()));
    }

    #[test]
    fn test_respects_min_length() {
        let doc = knot_html::parse("<div id=\"app\"><div><span>a</span></div></div>");
        let span = doc.query_selector(doc.tree().root(), "span").unwrap().unwrap();
        let targets = [span];
        let mut oracle = Oracle::new(&doc, doc.document(), &targets);
        let budget = Budget::new(&SearchLimits::default());

        let path = vec![
            Knot::new("span", penalty::TAG, 0),
            Knot::new("div", penalty::TAG, 1),
            Knot::new("#app", penalty::ID, 2),
        ];
        let mut out = Vec::new();
        Optimizer::new(3).optimize(&path, &mut oracle, &budget, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
