use crate::constraints::ConstraintNode;

/// Pushes negations down to the leaves (negation normal form).
///
/// Double negations cancel and De Morgan's laws turn a negated
/// intersection into a union of negations and vice versa. `Not(True)` is
/// kept as the false literal.
pub fn to_nnf(node: &ConstraintNode) -> ConstraintNode {
    nnf(node, false)
}

fn nnf(node: &ConstraintNode, negated: bool) -> ConstraintNode {
    match node {
        ConstraintNode::Leaf(_) | ConstraintNode::True => {
            if negated {
                !node.clone()
            } else {
                node.clone()
            }
        }
        ConstraintNode::Not(child) => nnf(child, !negated),
        ConstraintNode::Intersection(children) => {
            let children = children.iter().map(|c| nnf(c, negated)).collect();
            if negated {
                ConstraintNode::Union(children)
            } else {
                ConstraintNode::Intersection(children)
            }
        }
        ConstraintNode::Union(children) => {
            let children = children.iter().map(|c| nnf(c, negated)).collect();
            if negated {
                ConstraintNode::Intersection(children)
            } else {
                ConstraintNode::Union(children)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Axis;

    fn eq(value: u64) -> ConstraintNode {
        ConstraintNode::equals(Axis::new("a"), value)
    }

    #[test]
    fn double_negation_cancels() {
        assert_eq!(to_nnf(&!!eq(1)), eq(1));
    }

    #[test]
    fn de_morgan_on_intersection() {
        let tree = !ConstraintNode::intersection(vec![eq(1), eq(2)]);
        assert_eq!(to_nnf(&tree), ConstraintNode::union(vec![!eq(1), !eq(2)]));
    }

    #[test]
    fn de_morgan_on_union() {
        let tree = !ConstraintNode::union(vec![eq(1), !eq(2)]);
        assert_eq!(to_nnf(&tree), ConstraintNode::intersection(vec![!eq(1), eq(2)]));
    }

    #[test]
    fn negated_true_is_false() {
        assert!(to_nnf(&!ConstraintNode::True).is_false());
        assert!(to_nnf(&!!ConstraintNode::True).is_true());
    }
}
