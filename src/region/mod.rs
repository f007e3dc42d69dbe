//! Axis-aligned regions ("cubes") approximating boolean item filters.
//!
//! A [`Region`] maps axes (attributes) to [`AxisConstraint`]s. An axis that
//! is absent is unconstrained: every value is allowed on it. A region with
//! no axes matches every item.
//!
//! Regions are plain owned values. [`Region::intersect`] and
//! [`Region::copy`] always return new, independent regions, so a region
//! handed to a registry can never be changed behind its back.

mod assertions;
mod axis;
mod axis_map;
mod axis_values;
mod builder;
mod encompass;
mod error;
mod intersect;
pub mod utils;


use std::fmt::Display;

pub use axis::{Axis, CONNECTION_AXIS_ID};
pub use axis_map::AxisMap;
pub use axis_values::{AxisConstraint, ValueSet};
pub use builder::{build_region, RegionBuilder};
pub use error::RegionError;

use crate::{Item, ItemValue};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A conjunction of per-axis value constraints.
///
/// Axes are kept sorted by id, so iteration order, `==` and
/// [`is_same`](Region::is_same) do not depend on the order in which axes
/// were added.
///
/// # Examples
///
/// ```
/// use syncube::{Axis, Region};
///
/// let status = Axis::named("status", "Status");
/// let mut a = Region::new();
/// a.add_included(&status, [1, 2]);
///
/// let mut b = Region::new();
/// b.add_included(&status, [2, 3]);
///
/// let both = a.intersect(&b, true).unwrap();
/// assert!(both.allows(&status, 2));
/// assert!(!both.allows(&status, 1));
/// assert_eq!(both.to_string(), "cube(Status+2)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "AxisMap", into = "AxisMap"))]
pub struct Region {
    axes: AxisMap,
}

impl Region {
    /// Creates a region with no axes (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a region from per-axis constraints.
    pub fn from_constraints(
        constraints: impl IntoIterator<Item = (Axis, AxisConstraint)>,
    ) -> Result<Self, RegionError> {
        Self::try_from(AxisMap::try_from(constraints.into_iter().collect::<Vec<_>>())?)
    }

    /// Constrained axes in ascending id order.
    pub fn axes(&self) -> impl Iterator<Item = &Axis> + '_ {
        self.axes.axes()
    }

    /// `(axis, constraint)` pairs in ascending axis order.
    pub fn iter(&self) -> impl Iterator<Item = (&Axis, &AxisConstraint)> + '_ {
        self.axes.iter().map(|(a, c)| (a, c))
    }

    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Returns true if no axis is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.axes.iter().all(|(_, c)| c.is_unconstrained())
    }

    /// Returns true if some axis admits no value, so the region admits no
    /// item.
    pub fn is_contradiction(&self) -> bool {
        self.axes.iter().any(|(_, c)| c.is_contradiction())
    }

    /// Total number of included and excluded values over all axes.
    pub fn value_count(&self) -> usize {
        self.axes.iter().map(|(_, c)| c.value_count()).sum()
    }

    fn drop_open_axes(&mut self) {
        let open: Vec<Axis> = self
            .axes
            .iter()
            .filter(|(_, c)| c.is_unconstrained())
            .map(|(a, _)| a.clone())
            .collect();
        for axis in &open {
            self.axes.remove(axis);
        }
    }

    /// Both value sets of `axis`, or `None` if the axis is absent.
    pub fn values(&self, axis: &Axis) -> Option<&AxisConstraint> {
        self.axes.get(axis)
    }

    /// Included values of `axis`.
    ///
    /// `None` means the axis is absent or has no included set; it never
    /// stands for an empty included set.
    pub fn included_values(&self, axis: &Axis) -> Option<&ValueSet> {
        self.axes.get(axis).and_then(AxisConstraint::included)
    }

    /// Excluded values of `axis`; `None` if the axis is absent or excludes nothing.
    pub fn excluded_values(&self, axis: &Axis) -> Option<&ValueSet> {
        self.axes.get(axis).and_then(AxisConstraint::excluded)
    }

    /// Returns true if `value` satisfies the region on `axis`.
    ///
    /// An absent axis allows every value.
    pub fn allows(&self, axis: &Axis, value: ItemValue) -> bool {
        self.axes.get(axis).map_or(true, |c| c.allows(value))
    }

    /// Returns true if every constrained axis allows the item's value.
    ///
    /// An item without a value on a constrained axis is admitted only if that
    /// axis has no included set.
    pub fn admits(&self, item: &Item) -> bool {
        self.axes.iter().all(|(axis, c)| match item.get(axis) {
            Some(&value) => c.allows(value),
            None => c.included().is_none(),
        })
    }

    pub fn contains_axis(&self, axis: &Axis) -> bool {
        self.axes.contains_axis(axis)
    }

    /// Returns true if any of `axes` is constrained.
    pub fn contains_any_axis<'a>(&self, axes: impl IntoIterator<Item = &'a Axis>) -> bool {
        axes.into_iter().any(|a| self.axes.contains_axis(a))
    }

    /// Adds values to the included set of `axis`.
    pub fn add_included(&mut self, axis: &Axis, values: impl IntoIterator<Item = ItemValue>) {
        self.axes.get_or_insert(axis).add_included(values);
        self.debug_check();
    }

    /// Adds values to the excluded set of `axis`. Excluding nothing leaves
    /// the region unchanged.
    pub fn add_excluded(&mut self, axis: &Axis, values: impl IntoIterator<Item = ItemValue>) {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }
        self.axes.get_or_insert(axis).add_excluded(values);
        self.debug_check();
    }

    /// Adds a single value as included (`include == true`) or excluded.
    pub fn add_value(&mut self, axis: &Axis, value: ItemValue, include: bool) {
        self.add_values(axis, [value], include);
    }

    pub fn add_values(&mut self, axis: &Axis, values: impl IntoIterator<Item = ItemValue>, include: bool) {
        if include {
            self.add_included(axis, values);
        } else {
            self.add_excluded(axis, values);
        }
    }

    /// Drops `axis`, making the region unconstrained on it.
    pub fn remove_axis(&mut self, axis: &Axis) -> Option<AxisConstraint> {
        self.axes.remove(axis)
    }

    /// Returns an independent deep copy of this region.
    pub fn copy(&self) -> Region {
        self.clone()
    }

    /// Structural comparison: same axes with identical value sets.
    ///
    /// This is not semantic equivalence. `{a: +[1] -[2]}` and `{a: +[1]}`
    /// admit the same values but are not the same. Because axes are always
    /// stored sorted, the construction order of the two regions does not
    /// matter.
    pub fn is_same(&self, other: &Region) -> bool {
        self == other
    }

    /// Checks the storage invariants: axes sorted by id, no duplicates, and
    /// disjoint included/excluded sets on every axis.
    pub fn validate(&self) -> Result<(), RegionError> {
        if !assertions::is_sorted_unique(&self.axes) {
            return Err(RegionError::InvariantViolation(
                "axes are not strictly sorted by id".to_string(),
            ));
        }
        if let Some((axis, _)) = self.axes.iter().find(|(_, c)| !c.is_consistent()) {
            return Err(RegionError::InvariantViolation(format!(
                "axis {} includes and excludes the same value",
                axis.id()
            )));
        }
        Ok(())
    }

    fn debug_check(&self) {
        debug_assert!(assertions::is_sorted_unique(&self.axes), "{self:?}");
        debug_assert!(assertions::is_consistent(&self.axes), "{self:?}");
    }
}

impl TryFrom<AxisMap> for Region {
    type Error = RegionError;

    /// Validates `axes`; axes that allow every value are dropped.
    fn try_from(axes: AxisMap) -> Result<Self, Self::Error> {
        let mut region = Self { axes };
        region.validate()?;
        region.drop_open_axes();
        Ok(region)
    }
}

impl From<Region> for AxisMap {
    fn from(region: Region) -> Self {
        region.axes
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("cube(")?;
        for (i, (axis, c)) in self.axes.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}{}", axis, c)?;
        }
        f.write_str(")")
    }
}
