//! Per-axis value constraints.

use std::collections::BTreeSet;
use std::fmt::Display;

use crate::ItemValue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sorted set of attribute values.
pub type ValueSet = BTreeSet<ItemValue>;

/// The constraint a region places on a single axis.
///
/// - `included`: when present, only these values satisfy the axis. An empty
///   included set is a contradiction: nothing satisfies the axis.
/// - `excluded`: when present, these values never satisfy the axis.
///
/// Adding values keeps `included ∩ excluded = ∅` by dropping excluded values
/// from the included set. An empty excluded set is stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisConstraint {
    pub(super) included: Option<ValueSet>,
    pub(super) excluded: Option<ValueSet>,
}

impl AxisConstraint {
    /// Creates a constraint that allows every value.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Creates a constraint allowing exactly `values`.
    pub fn including(values: impl IntoIterator<Item = ItemValue>) -> Self {
        let mut c = Self::default();
        c.add_included(values);
        c
    }

    /// Creates a constraint rejecting `values`.
    pub fn excluding(values: impl IntoIterator<Item = ItemValue>) -> Self {
        let mut c = Self::default();
        c.add_excluded(values);
        c
    }

    pub fn included(&self) -> Option<&ValueSet> {
        self.included.as_ref()
    }

    pub fn excluded(&self) -> Option<&ValueSet> {
        self.excluded.as_ref()
    }

    /// Adds values to the included set, creating it on first use.
    ///
    /// Values already excluded do not enter the included set.
    pub fn add_included(&mut self, values: impl IntoIterator<Item = ItemValue>) {
        let included = self.included.get_or_insert_with(ValueSet::new);
        included.extend(values);
        self.drop_excluded_from_included();
    }

    /// Adds values to the excluded set, creating it on first use.
    pub fn add_excluded(&mut self, values: impl IntoIterator<Item = ItemValue>) {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }
        self.excluded.get_or_insert_with(ValueSet::new).extend(values);
        self.drop_excluded_from_included();
    }

    fn drop_excluded_from_included(&mut self) {
        if let (Some(included), Some(excluded)) = (self.included.as_mut(), self.excluded.as_ref()) {
            included.retain(|v| !excluded.contains(v));
        }
    }

    /// Returns true if `value` satisfies this axis.
    pub fn allows(&self, value: ItemValue) -> bool {
        if self.excluded.as_ref().is_some_and(|e| e.contains(&value)) {
            return false;
        }
        self.included.as_ref().map_or(true, |i| i.contains(&value))
    }

    /// Returns true if no value can satisfy this axis.
    pub fn is_contradiction(&self) -> bool {
        self.included.as_ref().is_some_and(|i| i.is_empty())
    }

    /// Returns true if every value satisfies this axis.
    pub fn is_unconstrained(&self) -> bool {
        self.included.is_none() && self.excluded.as_ref().map_or(true, |e| e.is_empty())
    }

    /// Number of values held in both sets.
    pub fn value_count(&self) -> usize {
        self.included.as_ref().map_or(0, |s| s.len()) + self.excluded.as_ref().map_or(0, |s| s.len())
    }

    /// Returns true if the included and excluded sets are disjoint.
    pub fn is_consistent(&self) -> bool {
        match (&self.included, &self.excluded) {
            (Some(included), Some(excluded)) => included.is_disjoint(excluded),
            _ => true,
        }
    }
}

fn write_set(f: &mut std::fmt::Formatter<'_>, set: Option<&ValueSet>, sign: char) -> std::fmt::Result {
    let Some(set) = set.filter(|s| !s.is_empty()) else {
        return Ok(());
    };
    write!(f, "{}", sign)?;
    for (i, value) in set.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

impl Display for AxisConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_set(f, self.included.as_ref(), '+')?;
        write_set(f, self.excluded.as_ref(), '-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconstrained_allows_everything() {
        let c = AxisConstraint::unconstrained();
        assert!(c.is_unconstrained());
        assert!(c.allows(0));
        assert!(c.allows(u64::MAX));
    }

    #[test]
    fn included_values_restrict() {
        let c = AxisConstraint::including([1, 2]);
        assert!(c.allows(1));
        assert!(c.allows(2));
        assert!(!c.allows(3));
        assert!(c.excluded().is_none());
    }

    #[test]
    fn excluded_values_reject() {
        let c = AxisConstraint::excluding([5]);
        assert!(!c.allows(5));
        assert!(c.allows(6));
        assert!(c.included().is_none());
    }

    #[test]
    fn excluded_values_leave_included_set() {
        let mut c = AxisConstraint::including([1, 2, 3]);
        c.add_excluded([2]);
        assert_eq!(c.included().unwrap(), &ValueSet::from([1, 3]));
        assert!(c.is_consistent());

        // Adding an excluded value to the included set keeps it out
        c.add_included([2]);
        assert_eq!(c.included().unwrap(), &ValueSet::from([1, 3]));
    }

    #[test]
    fn empty_included_is_contradiction() {
        let mut c = AxisConstraint::including([4]);
        c.add_excluded([4]);
        assert!(c.is_contradiction());
        assert!(!c.allows(4));

        let empty = AxisConstraint::including([]);
        assert!(empty.is_contradiction());
    }

    #[test]
    fn empty_excluded_is_not_stored() {
        let c = AxisConstraint::excluding([]);
        assert!(c.excluded().is_none());
        assert_eq!(c, AxisConstraint::unconstrained());
    }

    #[test]
    fn display_format() {
        let mut c = AxisConstraint::including([1, 2]);
        c.add_excluded([3]);
        assert_eq!(c.to_string(), "+1,2-3");
    }

    #[test]
    fn value_count_sums_both_sets() {
        let mut c = AxisConstraint::including([1, 2]);
        c.add_excluded([7, 8, 9]);
        assert_eq!(c.value_count(), 5);
    }
}
