//! A sorted container mapping axes to their constraints.
//!
//! [`AxisMap`] wraps a `Vec<(Axis, AxisConstraint)>` and guarantees the
//! **canonical invariant** at all times: entries are sorted by axis id and
//! every axis appears at most once.
//!
//! Regions hold a handful of axes, so a sorted vector with binary search
//! beats a tree map and keeps iteration order deterministic, which
//! structural comparison of regions relies on.

use std::ops::Deref;

use super::axis::Axis;
use super::axis_values::AxisConstraint;
use super::error::RegionError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sorted, duplicate-free `(Axis, AxisConstraint)` pairs.
///
/// # Transparent read access
///
/// `AxisMap` implements `Deref<Target = [(Axis, AxisConstraint)]>`, so slice
/// methods (`.len()`, `.iter()`, `.first()`, etc.) are available directly.
/// Mutation goes through methods that keep the invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<(Axis, AxisConstraint)>"))]
pub struct AxisMap(Vec<(Axis, AxisConstraint)>);

// ─────────────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────────────

impl AxisMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }
}

impl TryFrom<Vec<(Axis, AxisConstraint)>> for AxisMap {
    type Error = RegionError;

    /// Sorts the entries; fails if an axis appears twice.
    fn try_from(mut entries: Vec<(Axis, AxisConstraint)>) -> Result<Self, Self::Error> {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(w) = entries.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(RegionError::InvariantViolation(format!(
                "axis {} appears more than once",
                w[0].0.id()
            )));
        }
        Ok(Self(entries))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Lookup and mutation
// ─────────────────────────────────────────────────────────────────────

impl AxisMap {
    fn position(&self, axis: &Axis) -> Result<usize, usize> {
        self.0.binary_search_by(|(a, _)| a.cmp(axis))
    }

    pub fn get(&self, axis: &Axis) -> Option<&AxisConstraint> {
        self.position(axis).ok().map(|i| &self.0[i].1)
    }

    pub fn get_mut(&mut self, axis: &Axis) -> Option<&mut AxisConstraint> {
        match self.position(axis) {
            Ok(i) => Some(&mut self.0[i].1),
            Err(_) => None,
        }
    }

    pub fn contains_axis(&self, axis: &Axis) -> bool {
        self.position(axis).is_ok()
    }

    /// Returns the constraint for `axis`, inserting an unconstrained one at
    /// its sorted place if the axis is new.
    pub fn get_or_insert(&mut self, axis: &Axis) -> &mut AxisConstraint {
        let i = match self.position(axis) {
            Ok(i) => i,
            Err(i) => {
                self.0.insert(i, (axis.clone(), AxisConstraint::unconstrained()));
                i
            }
        };
        &mut self.0[i].1
    }

    /// Inserts or replaces the constraint for `axis`.
    pub fn insert(&mut self, axis: Axis, constraint: AxisConstraint) -> Option<AxisConstraint> {
        match self.position(&axis) {
            Ok(i) => Some(std::mem::replace(&mut self.0[i].1, constraint)),
            Err(i) => {
                self.0.insert(i, (axis, constraint));
                None
            }
        }
    }

    pub fn remove(&mut self, axis: &Axis) -> Option<AxisConstraint> {
        self.position(axis).ok().map(|i| self.0.remove(i).1)
    }

    /// Iterates axes in ascending id order.
    pub fn axes(&self) -> impl Iterator<Item = &Axis> + '_ {
        self.0.iter().map(|(a, _)| a)
    }

    pub fn into_inner(self) -> Vec<(Axis, AxisConstraint)> {
        self.0
    }
}

// ─────────────────────────────────────────────────────────────────────
// Transparent read access
// ─────────────────────────────────────────────────────────────────────

impl Deref for AxisMap {
    type Target = [(Axis, AxisConstraint)];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a AxisMap {
    type Item = &'a (Axis, AxisConstraint);
    type IntoIter = std::slice::Iter<'a, (Axis, AxisConstraint)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
