//! Leaf predicates of item filters.

use std::fmt::Display;

use crate::region::Axis;
use crate::{Item, ItemValue};

/// A test on a single item attribute.
///
/// Only [`Predicate::Equals`] maps onto a region axis directly.
/// [`Predicate::AnyOf`] is rewritten into a disjunction of equalities before
/// regions are built; [`Predicate::Range`] has no region form and always
/// forces the approximate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Attribute equals `value`.
    Equals { axis: Axis, value: ItemValue },
    /// Attribute is one of `values`.
    AnyOf { axis: Axis, values: Vec<ItemValue> },
    /// Attribute lies within `[min, max]`.
    Range {
        axis: Axis,
        min: ItemValue,
        max: ItemValue,
    },
}

impl Predicate {
    pub fn axis(&self) -> &Axis {
        match self {
            Predicate::Equals { axis, .. }
            | Predicate::AnyOf { axis, .. }
            | Predicate::Range { axis, .. } => axis,
        }
    }

    /// Evaluates the predicate against an item. A missing value never matches.
    pub fn evaluate(&self, item: &Item) -> bool {
        let Some(&actual) = item.get(self.axis()) else {
            return false;
        };
        match self {
            Predicate::Equals { value, .. } => actual == *value,
            Predicate::AnyOf { values, .. } => values.contains(&actual),
            Predicate::Range { min, max, .. } => (*min..=*max).contains(&actual),
        }
    }

    pub fn stringify(&self) -> String {
        self.to_string()
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Equals { axis, value } => write!(f, "{} = {}", axis, value),
            Predicate::AnyOf { axis, values } => {
                let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{} in [{}]", axis, values.join(", "))
            }
            Predicate::Range { axis, min, max } => write!(f, "{} in {}..={}", axis, min, max),
        }
    }
}
