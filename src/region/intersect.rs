//! Region intersection in precise and approximate modes.

use super::{AxisConstraint, Region, RegionError};

impl AxisConstraint {
    /// Narrows `self` to the values allowed by both constraints.
    ///
    /// Included sets are intersected and excluded sets united. Returns false
    /// if the included set ends up empty.
    pub(super) fn narrow(&mut self, other: &AxisConstraint) -> bool {
        if let Some(theirs) = &other.included {
            match self.included.as_mut() {
                Some(mine) => mine.retain(|v| theirs.contains(v)),
                None => {
                    let mut included = theirs.clone();
                    if let Some(excluded) = &self.excluded {
                        included.retain(|v| !excluded.contains(v));
                    }
                    self.included = Some(included);
                }
            }
            if self.is_contradiction() {
                return false;
            }
        }
        if let Some(theirs) = &other.excluded {
            self.add_excluded(theirs.iter().copied());
            if self.is_contradiction() {
                return false;
            }
        }
        true
    }
}

impl Region {
    /// Intersects `self` with `other`.
    ///
    /// Axes only `other` constrains are copied over; shared axes are
    /// narrowed. When a shared axis admits no value:
    /// - `precise == true`: returns `None`, the intersection is empty;
    /// - `precise == false`: the axis is dropped from the result, which
    ///   widens the result to a superset of the exact intersection.
    ///
    /// Intersecting with an unconstrained region returns a copy of `self`.
    pub fn intersect(&self, other: &Region, precise: bool) -> Option<Region> {
        self.try_intersect(other, precise).ok()
    }

    /// Like [`intersect`](Region::intersect) but reports the contradictory
    /// axis. Only fails when `precise` is set.
    pub fn try_intersect(&self, other: &Region, precise: bool) -> Result<Region, RegionError> {
        let mut result = self.copy();
        for (axis, theirs) in other.iter() {
            let satisfiable = match result.axes.get_mut(axis) {
                Some(mine) => mine.narrow(theirs),
                None => {
                    result.axes.insert(axis.clone(), theirs.clone());
                    true
                }
            };
            if !satisfiable {
                if precise {
                    return Err(RegionError::Contradiction(axis.clone()));
                }
                tracing::trace!(axis = axis.id(), "dropping contradictory axis");
                result.axes.remove(axis);
            }
        }
        result.debug_check();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Axis, ValueSet};

    fn status() -> Axis {
        Axis::named("status", "Status")
    }

    fn included(values: &[u64]) -> Region {
        let mut r = Region::new();
        r.add_included(&status(), values.iter().copied());
        r
    }

    #[test]
    fn overlapping_included_sets() {
        let result = included(&[1, 2]).intersect(&included(&[2, 3]), true).unwrap();
        assert_eq!(result.included_values(&status()), Some(&ValueSet::from([2])));
        assert_eq!(result.axis_count(), 1);
    }

    #[test]
    fn disjoint_included_sets_precise() {
        assert!(included(&[1, 2]).intersect(&included(&[4]), true).is_none());
        assert_eq!(
            included(&[1, 2]).try_intersect(&included(&[4]), true),
            Err(RegionError::Contradiction(status()))
        );
    }

    #[test]
    fn disjoint_included_sets_approximate() {
        let result = included(&[1, 2]).intersect(&included(&[4]), false).unwrap();
        assert!(!result.contains_axis(&status()));
        assert!(result.allows(&status(), 1));
        assert!(result.allows(&status(), 4));
        assert!(result.allows(&status(), 99));
    }

    #[test]
    fn axis_only_in_other_is_copied() {
        let priority = Axis::new("priority");
        let mut other = Region::new();
        other.add_excluded(&priority, [3]);
        let result = included(&[1]).intersect(&other, true).unwrap();
        assert_eq!(result.axis_count(), 2);
        assert_eq!(result.excluded_values(&priority), Some(&ValueSet::from([3])));
        assert_eq!(result.included_values(&status()), Some(&ValueSet::from([1])));
    }

    #[test]
    fn excluded_sets_are_united() {
        let mut a = Region::new();
        a.add_excluded(&status(), [1]);
        let mut b = Region::new();
        b.add_excluded(&status(), [2]);
        let result = a.intersect(&b, true).unwrap();
        assert_eq!(result.excluded_values(&status()), Some(&ValueSet::from([1, 2])));
        assert!(result.included_values(&status()).is_none());
    }

    #[test]
    fn included_meets_excluded() {
        let mut a = Region::new();
        a.add_excluded(&status(), [2]);
        let result = a.intersect(&included(&[1, 2]), true).unwrap();
        assert_eq!(result.included_values(&status()), Some(&ValueSet::from([1])));
        assert!(!result.allows(&status(), 2));

        let mut all_excluded = Region::new();
        all_excluded.add_excluded(&status(), [1, 2]);
        assert!(all_excluded.intersect(&included(&[1, 2]), true).is_none());
        assert!(included(&[1, 2]).intersect(&all_excluded, true).is_none());
    }

    #[test]
    fn unconstrained_other_returns_copy() {
        let a = included(&[1, 2]);
        let result = a.intersect(&Region::new(), true).unwrap();
        assert!(result.is_same(&a));
    }

    #[test]
    fn result_is_independent_of_inputs() {
        let a = included(&[1, 2]);
        let b = included(&[2, 3]);
        let mut result = a.intersect(&b, true).unwrap();
        result.add_included(&status(), [7]);
        assert_eq!(a.included_values(&status()), Some(&ValueSet::from([1, 2])));
        assert_eq!(b.included_values(&status()), Some(&ValueSet::from([2, 3])));
    }

    #[test]
    fn approximate_keeps_other_axes() {
        let priority = Axis::new("priority");
        let mut a = included(&[1]);
        a.add_included(&priority, [5]);
        let mut b = included(&[2]);
        b.add_included(&priority, [5, 6]);
        let result = a.intersect(&b, false).unwrap();
        assert!(!result.contains_axis(&status()));
        assert_eq!(result.included_values(&priority), Some(&ValueSet::from([5])));
    }
}
