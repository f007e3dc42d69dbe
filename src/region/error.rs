use thiserror::Error;

use super::axis::Axis;
use crate::constraints::ConstraintError;

/// Reasons a region cannot be built or intersected exactly.
///
/// Every variant except [`RegionError::InvariantViolation`] is an expected
/// outcome of precise mode; callers usually fall back to "not synchronized".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("No value satisfies axis {0}")]
    Contradiction(Axis),

    #[error("Constraint is always false")]
    AlwaysFalse,

    #[error("Disjunction mixes axes {first} and {second}")]
    MixedAxisDisjunction { first: Axis, second: Axis },

    #[error("Predicate cannot be expressed as axis equality: {0}")]
    UnsupportedPredicate(String),

    #[error("Negated disjunction cannot be expressed as a single axis")]
    NegatedDisjunction,

    #[error("Normalization failed: {0}")]
    Normalize(#[from] ConstraintError),

    #[error("Region invariant violated: {0}")]
    InvariantViolation(String),
}
