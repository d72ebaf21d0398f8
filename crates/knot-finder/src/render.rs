//! Path rendering

use crate::knot::Knot;

/// Render a path as a selector string.
///
/// Adjacent levels join with the child combinator, gaps with the
/// descendant combinator. The target comes last.
pub fn selector(path: &[Knot]) -> String {
    let Some((first, rest)) = path.split_first() else {
        return String::new();
    };

    let mut query = first.name.clone();
    let mut prev = first;
    for knot in rest {
        query = if prev.level + 1 == knot.level {
            format!("{} > {}", knot.name, query)
        } else {
            format!("{} {}", knot.name, query)
        };
        prev = knot;
    }
    query
}
