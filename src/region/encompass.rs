//! Containment between regions, used by the coverage registry.

use super::{AxisConstraint, Region};

impl AxisConstraint {
    /// Returns true if every value `sub` allows is also allowed by `self`.
    ///
    /// A constraint defined by exclusion is never contained in one defined by
    /// inclusion: the value domain is open.
    pub fn encompasses(&self, sub: &AxisConstraint) -> bool {
        if sub.is_contradiction() {
            return true;
        }
        if let Some(excluded) = self.excluded.as_ref().filter(|e| !e.is_empty()) {
            let respected = match (&sub.included, &sub.excluded) {
                (Some(included), _) => included.is_disjoint(excluded),
                (None, Some(sub_excluded)) => sub_excluded.is_superset(excluded),
                (None, None) => false,
            };
            if !respected {
                return false;
            }
        }
        if let Some(included) = &self.included {
            return match &sub.included {
                Some(sub_included) => included.is_superset(sub_included),
                None => false,
            };
        }
        true
    }
}

impl Region {
    /// Returns true if every item `sub` admits is also admitted by `self`.
    ///
    /// Each axis of `self` must be constrained in `sub` at least as tightly.
    /// An axis `sub` leaves open can only be encompassed by an unconstrained
    /// axis, so it must be absent from `self` too.
    pub fn encompasses(&self, sub: &Region) -> bool {
        self.iter().all(|(axis, mine)| match sub.values(axis) {
            Some(theirs) => mine.encompasses(theirs),
            None => mine.is_unconstrained(),
        })
    }
}
