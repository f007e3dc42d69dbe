use crate::constraints::ConstraintNode;

fn is_literal(node: &ConstraintNode) -> bool {
    match node {
        ConstraintNode::Leaf(_) => true,
        ConstraintNode::Not(child) => child.is_leaf(),
        _ => false,
    }
}

fn is_clause(node: &ConstraintNode) -> bool {
    match node {
        ConstraintNode::Union(children) => children.iter().all(is_literal),
        other => is_literal(other),
    }
}

/// Returns true if `node` is TRUE, FALSE, a clause, or an intersection of clauses.
pub fn is_cnf(node: &ConstraintNode) -> bool {
    match node {
        ConstraintNode::True => true,
        ConstraintNode::Intersection(children) => children.iter().all(is_clause),
        other => other.is_false() || is_clause(other),
    }
}
