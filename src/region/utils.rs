//! Set-membership conveniences on top of [`Region`].

use super::{Axis, Region, ValueSet};
use crate::ItemValue;

/// Returns true if some value of `candidates` passes an axis described by
/// `included` / `excluded` value lists.
///
/// A non-empty `included` list decides alone. Otherwise an empty `excluded`
/// list matches everything, and a non-empty one matches if some candidate
/// is not excluded.
pub fn matches(candidates: &[ItemValue], included: &[ItemValue], excluded: &[ItemValue]) -> bool {
    if !included.is_empty() {
        return candidates.iter().any(|v| included.contains(v));
    }
    if excluded.is_empty() {
        return true;
    }
    candidates.iter().any(|v| !excluded.contains(v))
}

/// Makes sure every value of `values` is in the included set of `axis`.
///
/// Values already excluded on the axis stay out of the included set; that
/// case is logged since callers are expected never to ask for it.
pub fn ensure_values_included_for_axis(
    region: &mut Region,
    axis: &Axis,
    values: impl IntoIterator<Item = ItemValue>,
) {
    let values: ValueSet = values.into_iter().collect();
    let missing = match region.included_values(axis) {
        Some(included) => !values.is_subset(included),
        None => !values.is_empty(),
    };
    if let Some(excluded) = region.excluded_values(axis) {
        let colliding: Vec<_> = values.intersection(excluded).copied().collect();
        if !colliding.is_empty() {
            tracing::warn!(axis = axis.id(), ?colliding, "values to include are excluded on axis");
        }
    }
    if missing {
        region.add_included(axis, values);
    }
}

/// Includes `value` on `axis` unless the region already excludes it.
pub fn adjust_for_axis(region: &mut Region, axis: &Axis, value: ItemValue) {
    let excluded = region.excluded_values(axis).is_some_and(|e| e.contains(&value));
    if !excluded {
        region.add_included(axis, [value]);
    }
}

/// Restricts `region` to the connection `connection`.
pub fn adjust_for_connection(region: &mut Region, connection: ItemValue) {
    adjust_for_axis(region, &Axis::connection(), connection);
}

/// A region holding the items of a single connection.
pub fn connection_region(connection: ItemValue) -> Region {
    let mut region = Region::new();
    adjust_for_connection(&mut region, connection);
    region
}

/// Connections included by `region`; empty when the connection axis has no
/// included set.
pub fn included_connections(region: &Region) -> ValueSet {
    region
        .included_values(&Axis::connection())
        .cloned()
        .unwrap_or_default()
}
