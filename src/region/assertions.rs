use super::axis::Axis;
use super::axis_values::AxisConstraint;

/// Returns true if axes are strictly ascending by id (sorted, no duplicates).
pub fn is_sorted_unique(entries: &[(Axis, AxisConstraint)]) -> bool {
    entries.windows(2).all(|w| w[0].0 < w[1].0)
}

/// Returns true if no axis holds a value in both its included and excluded sets.
pub fn is_consistent(entries: &[(Axis, AxisConstraint)]) -> bool {
    entries.iter().all(|(_, c)| c.is_consistent())
}
