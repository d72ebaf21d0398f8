//! Selector search entry points

use crate::budget::Budget;
use crate::config::Options;
use crate::dom::Dom;
use crate::error::{FinderError, NotFoundReason};
use crate::fallback::fallback;
use crate::knot::{Path, by_penalty};
use crate::optimize::Optimizer;
use crate::oracle::Oracle;
use crate::permute::{Bound, Permuter};
use crate::render::selector;
use crate::search::{Search, Step};

/// Generate the shortest, most readable selector that matches exactly
/// `targets` inside the configured scope.
///
/// With one target the search stops at the first unique candidate; with
/// several it collects every unique candidate and refines the best.
pub fn find<D: Dom>(
    dom: &D,
    targets: &[D::Node],
    options: &Options<D::Node>,
) -> Result<String, FinderError> {
    let mut budget = Budget::new(&options.limits);
    let targets = validate(dom, targets)?;

    let is_html = |&node: &D::Node| dom.tag_name(node).is_some_and(|tag| tag.eq_ignore_ascii_case("html"));
    if targets.iter().all(is_html) {
        return Ok("html".to_string());
    }

    let scope = options.root.unwrap_or_else(|| dom.document());
    if let Some(outside) = targets.iter().find(|&&target| !dom.contains(scope, target)) {
        return Err(FinderError::InvalidInput(format!(
            "target {outside:?} is not inside the root {scope:?}"
        )));
    }

    let mut oracle = Oracle::new(dom, scope, &targets);
    let (found, stopped) = collect(dom, &targets, scope, options, &mut oracle, &mut budget)?;

    if found.is_empty() {
        let Some(reason) = stopped else {
            return Err(FinderError::SelectorNotFound(NotFoundReason::Exhausted));
        };
        tracing::warn!(%reason, checks = budget.checks(), "search budget exhausted, trying positional fallback");
        return match fallback(dom, targets[0], scope, &mut oracle)? {
            Some(path) => Ok(selector(&path)),
            None => Err(FinderError::SelectorNotFound(reason)),
        };
    }

    let best = refine(found, options, &mut oracle, &budget)?;
    let css = selector(&best);
    tracing::debug!(selector = %css, elapsed = ?budget.elapsed(), checks = budget.checks(), "selector found");
    Ok(css)
}

/// `find` for one element with default options
pub fn find_one<D: Dom>(dom: &D, target: D::Node) -> Result<String, FinderError> {
    find(dom, &[target], &Options::default())
}

/// Reject empty and non-element input, drop duplicate targets
fn validate<D: Dom>(dom: &D, targets: &[D::Node]) -> Result<Vec<D::Node>, FinderError> {
    if targets.is_empty() {
        return Err(FinderError::InvalidInput("no target elements".to_string()));
    }
    let mut unique = Vec::with_capacity(targets.len());
    for &target in targets {
        if !dom.is_element(target) {
            return Err(FinderError::InvalidInput(format!(
                "can't generate a selector for non-element node {target:?}"
            )));
        }
        if !unique.contains(&target) {
            unique.push(target);
        }
    }
    Ok(unique)
}

/// Pull candidates until the search ends. Returns the unique paths found
/// and, when the budget cut the search short, why.
fn collect<D: Dom>(
    dom: &D,
    targets: &[D::Node],
    scope: D::Node,
    options: &Options<D::Node>,
    oracle: &mut Oracle<'_, D>,
    budget: &mut Budget,
) -> Result<(Vec<Path>, Option<NotFoundReason>), FinderError> {
    let single = targets.len() == 1;
    let mut search = Search::new(dom, targets[0], scope, options);
    let mut found = Vec::new();

    loop {
        let candidate = match search.next_step(budget) {
            Step::Candidate(path) => path,
            Step::Exhausted => return Ok((found, None)),
            Step::OutOfBudget(reason) => return Ok((found, Some(reason))),
        };
        if let Some(reason) = budget.exhausted() {
            return Ok((found, Some(reason)));
        }

        budget.record_check();
        if oracle.is_unique(&candidate)? {
            tracing::trace!(selector = %selector(&candidate), "unique candidate");
            found.push(candidate);
            if single {
                return Ok((found, None));
            }
        }
    }
}

/// Pick the winner, shorten it, let the other unique paths compete
fn refine<D: Dom>(
    mut found: Vec<Path>,
    options: &Options<D::Node>,
    oracle: &mut Oracle<'_, D>,
    budget: &Budget,
) -> Result<Path, FinderError> {
    found.sort_by(|a, b| by_penalty(a, b));
    let mut found = found.into_iter();
    let Some(winner) = found.next() else {
        return Err(FinderError::SelectorNotFound(NotFoundReason::Exhausted));
    };

    let mut optimizer = Optimizer::new(options.limits.optimized_min_length);
    let mut candidates = vec![winner.clone()];
    optimizer.optimize(&winner, oracle, budget, &mut candidates)?;

    let alternates: Vec<Path> = found.collect();
    if !alternates.is_empty() {
        let bound = candidates
            .iter()
            .min_by(|a, b| by_penalty(a, b))
            .map(|best| Bound::of(best))
            .unwrap_or_else(|| Bound::of(&winner));
        let mut permuter = Permuter::default();
        for alternate in &alternates {
            let mut competitors = Vec::new();
            permuter.permute(alternate, bound, oracle, budget, &mut competitors)?;
            for competitor in competitors {
                optimizer.optimize(&competitor, oracle, budget, &mut candidates)?;
                candidates.push(competitor);
            }
        }
    }

    // First of the cheapest wins, so discovery order breaks ties
    candidates
        .into_iter()
        .min_by(|a, b| by_penalty(a, b))
        .ok_or(FinderError::SelectorNotFound(NotFoundReason::Exhausted))
}
