//! Competitor search for multi-target lookups
//!
//! Every alternate unique path is shortened again, this time keeping only
//! results that beat the current best.

use std::collections::HashSet;

use crate::budget::Budget;
use crate::dom::Dom;
use crate::error::FinderError;
use crate::knot::{Knot, Path, score, without};
use crate::oracle::Oracle;
use crate::render::selector;

/// The path to beat
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bound {
    pub length: usize,
    pub score: f64,
}

impl Bound {
    pub fn of(path: &[Knot]) -> Self {
        Self {
            length: path.len(),
            score: score(path),
        }
    }
}

#[derive(Default)]
pub(crate) struct Permuter {
    visited: HashSet<String>,
}

impl Permuter {
    /// Push unique shortenings of `path` scoring below `bound` into `out`
    pub fn permute<D: Dom>(
        &mut self,
        path: &[Knot],
        bound: Bound,
        oracle: &mut Oracle<'_, D>,
        budget: &Budget,
        out: &mut Vec<Path>,
    ) -> Result<(), FinderError> {
        if path.len() <= 2 || path.len() <= bound.length {
            return Ok(());
        }

        for index in 1..path.len() - 1 {
            if budget.timed_out() {
                tracing::debug!("permutation stopped at deadline");
                return Ok(());
            }
            let shorter = without(path, index);
            if !self.visited.insert(selector(&shorter)) {
                continue;
            }
            if score(&shorter) < bound.score {
                // Removing knots only widens a match, so nothing below a
                // non-unique path can be unique
                if !oracle.is_unique(&shorter)? {
                    continue;
                }
                out.push(shorter.clone());
            }
            self.permute(&shorter, bound, oracle, budget, out)?;
        }
        Ok(())
    }
}
