//! Candidate generation
//!
//! Walks from the target towards the scope one ancestor at a time. Each
//! level contributes its fragments; every combination of one fragment per
//! level is a candidate path. Candidates are held back until
//! `seed_min_length` levels exist, then released in batches sorted by
//! score. Whatever is pending when the walk reaches the scope is released
//! last.

use crate::budget::Budget;
use crate::config::Options;
use crate::dom::Dom;
use crate::error::NotFoundReason;
use crate::knot::{Knot, Path};
use crate::tie::tie;

/// Deadline is polled once per this many enumerated combinations
const DEADLINE_STRIDE: usize = 1024;

/// Upper bound on combinations pending release at once
pub(crate) const MAX_PENDING: usize = 1 << 22;

pub(crate) enum Step {
    Candidate(Path),
    Exhausted,
    OutOfBudget(NotFoundReason),
}

/// A pending combination: `index` encodes one fragment pick per level in
/// mixed radix, the first level being the least significant digit.
struct Combo {
    score: f64,
    index: u64,
    depth: u32,
}

pub(crate) struct Search<'a, D: Dom> {
    dom: &'a D,
    options: &'a Options<D::Node>,
    scope: D::Node,
    current: Option<D::Node>,
    levels: Vec<Vec<Knot>>,
    pending: Vec<Combo>,
    ready: std::vec::IntoIter<Combo>,
}

impl<'a, D: Dom> Search<'a, D> {
    pub fn new(dom: &'a D, start: D::Node, scope: D::Node, options: &'a Options<D::Node>) -> Self {
        Self {
            dom,
            options,
            scope,
            current: Some(start),
            levels: Vec::new(),
            pending: Vec::new(),
            ready: Vec::new().into_iter(),
        }
    }

    pub fn next_step(&mut self, budget: &Budget) -> Step {
        loop {
            if let Some(combo) = self.ready.next() {
                return Step::Candidate(self.materialize(&combo));
            }

            let Some(node) = self.current.filter(|&node| node != self.scope) else {
                if self.pending.is_empty() {
                    return Step::Exhausted;
                }
                self.release();
                continue;
            };

            self.descend(node);
            if let Err(reason) = self.enumerate(budget) {
                return Step::OutOfBudget(reason);
            }
            if self.levels.len() >= self.options.limits.seed_min_length {
                self.release();
            }
        }
    }

    fn descend(&mut self, node: D::Node) {
        let depth = self.levels.len();
        let mut level = tie(self.dom, node, self.options);
        for knot in &mut level {
            knot.level = depth;
        }
        tracing::trace!(depth, fragments = level.len(), "search level");
        self.levels.push(level);
        self.current = self.dom.parent_element(node);
    }

    fn release(&mut self) {
        let mut batch = std::mem::take(&mut self.pending);
        // Stable: equal keys keep enumeration order
        batch.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.depth.cmp(&b.depth)));
        tracing::trace!(candidates = batch.len(), "releasing batch");
        self.ready = batch.into_iter();
    }

    /// Queue every combination over the current levels, first level varying
    /// fastest.
    fn enumerate(&mut self, budget: &Budget) -> Result<(), NotFoundReason> {
        let levels = &self.levels;
        if levels.iter().any(Vec::is_empty) {
            return Ok(());
        }

        let total = levels
            .iter()
            .try_fold(1usize, |acc, level| acc.checked_mul(level.len()))
            .filter(|&total| total.saturating_add(self.pending.len()) <= MAX_PENDING)
            .ok_or(NotFoundReason::CandidateLimit { candidates: MAX_PENDING })?;

        let depth = levels.len() as u32;
        let mut picks = vec![0usize; levels.len()];
        self.pending.reserve(total);
        for index in 0..total {
            if index % DEADLINE_STRIDE == 0 && budget.timed_out() {
                return Err(NotFoundReason::Timeout {
                    timeout_ms: self.options.limits.timeout_ms,
                });
            }

            let score: f64 = picks
                .iter()
                .zip(levels)
                .map(|(&pick, level)| level[pick].penalty)
                .sum();
            self.pending.push(Combo {
                score,
                index: index as u64,
                depth,
            });

            for (pick, level) in picks.iter_mut().zip(levels) {
                *pick += 1;
                if *pick < level.len() {
                    break;
                }
                *pick = 0;
            }
        }
        Ok(())
    }

    fn materialize(&self, combo: &Combo) -> Path {
        let mut rest = combo.index;
        self.levels[..combo.depth as usize]
            .iter()
            .map(|level| {
                let radix = level.len() as u64;
                let knot = level[(rest % radix) as usize].clone();
                rest /= radix;
                knot
            })
            .collect()
    }
}
