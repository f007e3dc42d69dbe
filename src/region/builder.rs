//! Translation of filter trees into regions.
//!
//! The tree is first normalized into an intersection of clauses. Each
//! clause becomes a region constraining at most one axis, and the clause
//! regions are intersected. A clause maps onto an axis when it is
//!
//! - an equality literal or its negation (one included / excluded value);
//! - a union of (negated) equality literals on one axis;
//! - `True` (no constraint).
//!
//! Anything else fails in precise mode. In approximate mode it is replaced
//! by the unconstrained region, so the result only ever widens: it admits at
//! least every item the tree admits. The false filter `Not(True)` is widened
//! the same way, to "matches everything".

use super::{Axis, Region, RegionError, ValueSet};
use crate::constraints::{CnfNormalizer, ConstraintNode, Normalizer, Predicate};

/// Builds regions from filter trees using a CNF [`Normalizer`].
#[derive(Debug, Clone, Default)]
pub struct RegionBuilder<N = CnfNormalizer> {
    normalizer: N,
}

impl RegionBuilder<CnfNormalizer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: Normalizer> RegionBuilder<N> {
    pub fn with_normalizer(normalizer: N) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    /// Builds the region for `tree`.
    ///
    /// Returns `None` only when `precise` is set and the tree has no exact
    /// region form, including the case where it admits no item at all.
    pub fn build(&self, tree: &ConstraintNode, precise: bool) -> Option<Region> {
        match self.try_build(tree, precise) {
            Ok(region) => Some(region),
            Err(e) => {
                tracing::debug!(error = %e, tree = %tree.stringify(), "no precise region");
                None
            }
        }
    }

    /// Like [`build`](RegionBuilder::build) but reports why a precise region
    /// could not be built. Never fails when `precise` is false.
    pub fn try_build(&self, tree: &ConstraintNode, precise: bool) -> Result<Region, RegionError> {
        let cnf = match self.normalizer.normalize(tree) {
            Ok(cnf) => cnf,
            Err(e) if precise => return Err(e.into()),
            Err(e) => {
                tracing::debug!(error = %e, "normalization failed, widening to unconstrained region");
                return Ok(Region::new());
            }
        };
        match &cnf {
            ConstraintNode::Intersection(clauses) => {
                let mut result = Region::new();
                for clause in clauses {
                    let region = build_single_clause(clause, precise)?;
                    result = result.try_intersect(&region, precise)?;
                }
                Ok(result)
            }
            clause => build_single_clause(clause, precise),
        }
    }
}

/// Builds a region from `tree` with the default CNF normalizer.
///
/// # Examples
///
/// ```
/// use syncube::constraints::ConstraintNode;
/// use syncube::{build_region, Axis};
///
/// let status = Axis::new("status");
/// let tree = ConstraintNode::union(vec![
///     ConstraintNode::equals(status.clone(), 1),
///     ConstraintNode::equals(status.clone(), 2),
/// ]);
/// let region = build_region(&tree, true).unwrap();
/// assert_eq!(region.included_values(&status).unwrap().len(), 2);
/// ```
pub fn build_region(tree: &ConstraintNode, precise: bool) -> Option<Region> {
    RegionBuilder::new().build(tree, precise)
}

/// Fails in precise mode; otherwise leaves the clause unconstrained.
fn widen_or_fail(precise: bool, reason: RegionError) -> Result<(), RegionError> {
    if precise {
        return Err(reason);
    }
    tracing::trace!(%reason, "widening clause");
    Ok(())
}

fn split_negation(node: &ConstraintNode) -> (&ConstraintNode, bool) {
    match node {
        ConstraintNode::Not(inner) => (inner.as_ref(), false),
        other => (other, true),
    }
}

fn build_single_clause(clause: &ConstraintNode, precise: bool) -> Result<Region, RegionError> {
    let mut region = Region::new();
    let (node, positive) = split_negation(clause);
    match node {
        ConstraintNode::Leaf(Predicate::Equals { axis, value }) => {
            region.add_value(axis, *value, positive);
        }
        ConstraintNode::Union(children) if positive => {
            add_disjunction(&mut region, children, precise)?;
        }
        ConstraintNode::Union(_) => widen_or_fail(precise, RegionError::NegatedDisjunction)?,
        ConstraintNode::True if positive => {}
        ConstraintNode::True => widen_or_fail(precise, RegionError::AlwaysFalse)?,
        other => widen_or_fail(precise, RegionError::UnsupportedPredicate(other.stringify()))?,
    }
    Ok(region)
}

/// Adds a union of equality literals over a single axis to `region`.
///
/// Positive literals collect into the included set `I`, negative ones into
/// the excluded set `E`. Without negative literals the clause is `x ∈ I`.
/// Otherwise `x ∈ I ∨ x ∉ E` equals `x ∉ E \ I`, which excludes one value
/// when `E \ I` is a singleton and holds for every value otherwise.
fn add_disjunction(
    region: &mut Region,
    children: &[ConstraintNode],
    precise: bool,
) -> Result<(), RegionError> {
    if children.is_empty() {
        return widen_or_fail(precise, RegionError::AlwaysFalse);
    }
    let mut single_axis: Option<&Axis> = None;
    let mut included = ValueSet::new();
    let mut excluded = ValueSet::new();
    for child in children {
        let (literal, positive) = split_negation(child);
        let ConstraintNode::Leaf(Predicate::Equals { axis, value }) = literal else {
            return widen_or_fail(precise, RegionError::UnsupportedPredicate(literal.stringify()));
        };
        match single_axis {
            Some(first) if first != axis => {
                return widen_or_fail(
                    precise,
                    RegionError::MixedAxisDisjunction {
                        first: first.clone(),
                        second: axis.clone(),
                    },
                );
            }
            Some(_) => {}
            None => single_axis = Some(axis),
        }
        if positive {
            included.insert(*value);
        } else {
            excluded.insert(*value);
        }
    }

    let Some(axis) = single_axis else {
        return Ok(());
    };
    if excluded.is_empty() {
        region.add_included(axis, included);
        return Ok(());
    }
    let rest: Vec<_> = excluded.difference(&included).copied().collect();
    if let [value] = rest[..] {
        region.add_excluded(axis, [value]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintError;
    use crate::Item;

    fn attr1() -> Axis {
        Axis::new("attr1")
    }

    fn attr2() -> Axis {
        Axis::new("attr2")
    }

    fn eq(axis: Axis, value: u64) -> ConstraintNode {
        ConstraintNode::equals(axis, value)
    }

    #[test]
    fn or_of_same_attribute() {
        let tree = ConstraintNode::union(vec![eq(attr1(), 1), eq(attr1(), 2)]);
        let region = build_region(&tree, true).unwrap();
        assert_eq!(region.axis_count(), 1);
        assert_eq!(region.included_values(&attr1()), Some(&ValueSet::from([1, 2])));
        assert!(region.excluded_values(&attr1()).is_none());
    }

    #[test]
    fn and_of_two_attributes() {
        let tree = ConstraintNode::intersection(vec![eq(attr1(), 1), eq(attr2(), 5)]);
        let region = build_region(&tree, true).unwrap();
        assert_eq!(region.axis_count(), 2);
        assert_eq!(region.included_values(&attr1()), Some(&ValueSet::from([1])));
        assert_eq!(region.included_values(&attr2()), Some(&ValueSet::from([5])));
    }

    #[test]
    fn negated_literal() {
        let region = build_region(&!eq(attr1(), 1), true).unwrap();
        assert_eq!(region.axis_count(), 1);
        assert_eq!(region.excluded_values(&attr1()), Some(&ValueSet::from([1])));
        assert!(region.included_values(&attr1()).is_none());
    }

    #[test]
    fn mixed_attribute_or() {
        let tree = ConstraintNode::union(vec![eq(attr1(), 1), eq(attr2(), 2)]);
        assert!(build_region(&tree, true).is_none());
        assert_eq!(
            RegionBuilder::new().try_build(&tree, true),
            Err(RegionError::MixedAxisDisjunction {
                first: attr1(),
                second: attr2(),
            })
        );
        let region = build_region(&tree, false).unwrap();
        assert!(region.is_unconstrained());
    }

    #[test]
    fn true_and_not_true() {
        assert!(build_region(&ConstraintNode::True, true).unwrap().is_unconstrained());
        assert!(build_region(&ConstraintNode::always_false(), true).is_none());
        assert!(build_region(&ConstraintNode::always_false(), false)
            .unwrap()
            .is_unconstrained());
    }

    #[test]
    fn range_forces_approximation() {
        let tree = ConstraintNode::intersection(vec![
            eq(attr1(), 1),
            ConstraintNode::range(attr2(), 3, 9),
        ]);
        assert!(matches!(
            RegionBuilder::new().try_build(&tree, true),
            Err(RegionError::UnsupportedPredicate(_))
        ));
        let region = build_region(&tree, false).unwrap();
        assert_eq!(region.axis_count(), 1);
        assert!(region.contains_axis(&attr1()));
    }

    #[test]
    fn any_of_is_rewritten() {
        let tree = ConstraintNode::any_of(attr1(), [4, 5, 6]);
        let region = build_region(&tree, true).unwrap();
        assert_eq!(region.included_values(&attr1()), Some(&ValueSet::from([4, 5, 6])));
    }

    #[test]
    fn negated_any_of_excludes_all() {
        let tree = !ConstraintNode::any_of(attr1(), [4, 5]);
        let region = build_region(&tree, true).unwrap();
        assert_eq!(region.excluded_values(&attr1()), Some(&ValueSet::from([4, 5])));
    }

    #[test]
    fn contradicting_clauses() {
        let tree = ConstraintNode::intersection(vec![eq(attr1(), 1), eq(attr1(), 2)]);
        assert_eq!(
            RegionBuilder::new().try_build(&tree, true),
            Err(RegionError::Contradiction(attr1()))
        );
        let region = build_region(&tree, false).unwrap();
        assert!(!region.contains_axis(&attr1()));
    }

    #[test]
    fn or_with_cancelling_literals() {
        // attr1 = 1 ∨ attr1 ≠ 1 holds for every item
        let tree = ConstraintNode::union(vec![eq(attr1(), 1), !eq(attr1(), 1)]);
        assert!(build_region(&tree, true).unwrap().is_unconstrained());
    }

    #[test]
    fn or_with_exclusion_keeps_exclusion_only() {
        // attr1 ∈ {1, 2} ∨ attr1 ∉ {2, 3}  ==  attr1 ≠ 3
        let tree = ConstraintNode::union(vec![
            eq(attr1(), 1),
            eq(attr1(), 2),
            !eq(attr1(), 2),
            !eq(attr1(), 3),
        ]);
        let region = build_region(&tree, true).unwrap();
        assert_eq!(region.excluded_values(&attr1()), Some(&ValueSet::from([3])));
        assert!(region.included_values(&attr1()).is_none());
    }

    #[test]
    fn or_with_covered_exclusion_is_unconstrained() {
        // attr1 ∈ {1, 2} ∨ attr1 ≠ 1 holds for every item
        let tree = ConstraintNode::union(vec![eq(attr1(), 1), eq(attr1(), 2), !eq(attr1(), 1)]);
        for precise in [true, false] {
            let region = build_region(&tree, precise).unwrap();
            assert!(region.is_unconstrained(), "{region}");
            assert!(region.admits(&Item::from([(attr1(), 3)])));
        }
    }

    #[test]
    fn or_with_several_exclusions_is_unconstrained() {
        // ¬(attr1 = 1 ∧ attr1 = 2) = attr1 ≠ 1 ∨ attr1 ≠ 2 holds for every item
        let tree = !ConstraintNode::intersection(vec![eq(attr1(), 1), eq(attr1(), 2)]);
        let region = build_region(&tree, true).unwrap();
        assert!(region.is_unconstrained(), "{region}");
        assert!(region.allows(&attr1(), 1));
        assert!(region.allows(&attr1(), 2));
    }

    #[test]
    fn or_with_single_remaining_exclusion() {
        // attr1 = 1 ∨ attr1 ≠ 2 = attr1 ≠ 2
        let tree = ConstraintNode::union(vec![eq(attr1(), 1), !eq(attr1(), 2)]);
        let region = build_region(&tree, true).unwrap();
        assert_eq!(region.excluded_values(&attr1()), Some(&ValueSet::from([2])));
        assert!(region.included_values(&attr1()).is_none());
    }

    #[test]
    fn or_with_range_child() {
        let tree = ConstraintNode::union(vec![eq(attr1(), 1), ConstraintNode::range(attr1(), 5, 7)]);
        assert!(build_region(&tree, true).is_none());
        assert!(build_region(&tree, false).unwrap().is_unconstrained());
    }

    #[test]
    fn distributed_or_over_and() {
        // attr1 = 1 ∨ (attr1 = 2 ∧ attr2 = 3)
        //   = (attr1 ∈ {1, 2}) ∧ (attr1 = 1 ∨ attr2 = 3)
        let tree = ConstraintNode::union(vec![
            eq(attr1(), 1),
            ConstraintNode::intersection(vec![eq(attr1(), 2), eq(attr2(), 3)]),
        ]);
        assert!(build_region(&tree, true).is_none());
        let region = build_region(&tree, false).unwrap();
        assert_eq!(region.included_values(&attr1()), Some(&ValueSet::from([1, 2])));
        assert!(!region.contains_axis(&attr2()));
    }

    #[test]
    fn normalization_failure() {
        let tree = ConstraintNode::union(vec![
            ConstraintNode::intersection(vec![eq(attr1(), 1), eq(attr1(), 2)]),
            ConstraintNode::intersection(vec![eq(attr2(), 1), eq(attr2(), 2)]),
        ]);
        let builder = RegionBuilder::with_normalizer(CnfNormalizer::default().with_max_clauses(2));
        assert_eq!(
            builder.try_build(&tree, true),
            Err(RegionError::Normalize(ConstraintError::ClauseLimitExceeded { limit: 2 }))
        );
        assert!(builder.build(&tree, false).unwrap().is_unconstrained());
    }

    #[test]
    fn custom_normalizer() {
        // A normalizer that already receives CNF input can be the identity.
        let identity =
            |tree: &ConstraintNode| -> Result<ConstraintNode, ConstraintError> { Ok(tree.clone()) };
        let builder = RegionBuilder::with_normalizer(identity);
        let tree = ConstraintNode::intersection(vec![eq(attr1(), 1), !eq(attr2(), 2)]);
        let region = builder.build(&tree, true).unwrap();
        assert_eq!(region.axis_count(), 2);
    }

    #[test]
    fn negated_union_without_normalization() {
        let identity =
            |tree: &ConstraintNode| -> Result<ConstraintNode, ConstraintError> { Ok(tree.clone()) };
        let builder = RegionBuilder::with_normalizer(identity);
        let tree = !ConstraintNode::union(vec![eq(attr1(), 1), eq(attr1(), 2)]);
        assert_eq!(builder.try_build(&tree, true), Err(RegionError::NegatedDisjunction));
        assert!(builder.build(&tree, false).unwrap().is_unconstrained());
    }
}
