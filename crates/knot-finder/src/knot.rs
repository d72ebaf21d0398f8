//! Knots and paths
//!
//! A knot is one selector fragment for one element; a path is one knot per
//! ancestor level, target first.

use std::cmp::Ordering;

/// Fragment penalties; lower is preferred
pub mod penalty {
    pub const ID: f64 = 0.0;
    pub const CLASS: f64 = 1.0;
    pub const ATTRIBUTE: f64 = 2.0;
    pub const TAG: f64 = 5.0;
    pub const NTH_OF_TYPE: f64 = 10.0;
    pub const NTH_CHILD: f64 = 50.0;
}

/// One selector fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Knot {
    /// Selector text, e.g. `#menu` or `li:nth-of-type(2)`
    pub name: String,
    pub penalty: f64,
    /// Distance from the target; 0 is the target itself
    pub level: usize,
}

impl Knot {
    pub fn new(name: impl Into<String>, penalty: f64, level: usize) -> Self {
        Self {
            name: name.into(),
            penalty,
            level,
        }
    }
}

/// Knots ordered from the target outwards
pub type Path = Vec<Knot>;

/// Sum of penalties
pub fn score(path: &[Knot]) -> f64 {
    path.iter().map(|knot| knot.penalty).sum()
}

/// Ascending score, then ascending length
pub fn by_penalty(a: &[Knot], b: &[Knot]) -> Ordering {
    score(a).total_cmp(&score(b)).then(a.len().cmp(&b.len()))
}

/// Copy of `path` without the knot at `index`
pub(crate) fn without(path: &[Knot], index: usize) -> Path {
    let mut shorter = path.to_vec();
    shorter.remove(index);
    shorter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_and_order() {
        let a = vec![Knot::new("#a", penalty::ID, 0), Knot::new("div", penalty::TAG, 1)];
        let b = vec![Knot::new("div", penalty::TAG, 0)];
        assert_eq!(score(&a), 5.0);
        // Equal score, shorter wins
        assert_eq!(by_penalty(&b, &a), Ordering::Less);
        assert_eq!(by_penalty(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_without() {
        let path = vec![
            Knot::new("a", penalty::TAG, 0),
            Knot::new("b", penalty::TAG, 1),
            Knot::new("c", penalty::TAG, 2),
        ];
        let shorter = without(&path, 1);
        assert_eq!(shorter.len(), 2);
        assert_eq!(shorter[1].name, "c");
        assert_eq!(shorter[1].level, 2);
    }
}
