//! Positional fallback used when the budget runs out before any unique
//! path was found

use crate::dom::Dom;
use crate::error::FinderError;
use crate::knot::{Knot, Path};
use crate::oracle::Oracle;
use crate::tie::nth_of_type;

/// `:nth-of-type` at every level from the target up to the scope. The
/// penalty is NaN since the path never competes on score.
pub(crate) fn fallback<D: Dom>(
    dom: &D,
    target: D::Node,
    scope: D::Node,
    oracle: &mut Oracle<'_, D>,
) -> Result<Option<Path>, FinderError> {
    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(node) = current.filter(|&node| node != scope) {
        let tag = dom.tag_name(node).unwrap_or_default().to_ascii_lowercase();
        let Some(index) = dom.sibling_index_of_tag(node) else {
            return Ok(None);
        };
        path.push(Knot::new(nth_of_type(&tag, index), f64::NAN, path.len()));
        current = dom.parent_element(node);
    }

    if path.is_empty() || !oracle.is_unique(&path)? {
        return Ok(None);
    }
    Ok(Some(path))
}
