use crate::constraints::{ConstraintError, ConstraintNode};

/// A disjunction of literals (`Leaf` or `Not(Leaf)`).
type Clause = Vec<ConstraintNode>;

/// Converts a tree in negation normal form into conjunctive normal form.
///
/// Unions are distributed over intersections. `True` satisfies its clause
/// and `Not(True)` contributes nothing to it; an empty clause makes the whole
/// result false.
///
/// # Errors
///
/// [`ConstraintError::ClauseLimitExceeded`] if the clause count would exceed
/// `max_clauses`.
pub fn to_cnf(nnf: &ConstraintNode, max_clauses: usize) -> Result<ConstraintNode, ConstraintError> {
    let clauses = clauses_of(nnf, max_clauses)?;
    Ok(rebuild(clauses))
}

/// `vec![]` is TRUE, `vec![vec![]]` is FALSE.
fn clauses_of(node: &ConstraintNode, limit: usize) -> Result<Vec<Clause>, ConstraintError> {
    match node {
        ConstraintNode::True => Ok(Vec::new()),
        n if n.is_false() => Ok(vec![Vec::new()]),
        ConstraintNode::Leaf(_) | ConstraintNode::Not(_) => Ok(vec![vec![node.clone()]]),
        ConstraintNode::Intersection(children) => {
            let mut result = Vec::new();
            for child in children {
                result.extend(clauses_of(child, limit)?);
                if result.len() > limit {
                    return Err(ConstraintError::ClauseLimitExceeded { limit });
                }
            }
            Ok(result)
        }
        ConstraintNode::Union(children) => {
            let mut acc: Vec<Clause> = vec![Vec::new()];
            for child in children {
                let child_clauses = clauses_of(child, limit)?;
                if child_clauses.is_empty() {
                    return Ok(Vec::new());
                }
                if acc.len().saturating_mul(child_clauses.len()) > limit {
                    return Err(ConstraintError::ClauseLimitExceeded { limit });
                }
                acc = acc
                    .iter()
                    .flat_map(|a| child_clauses.iter().map(move |b| merge(a, b)))
                    .collect();
            }
            Ok(acc)
        }
    }
}

fn merge(a: &Clause, b: &Clause) -> Clause {
    let mut clause = a.clone();
    for literal in b {
        if !clause.contains(literal) {
            clause.push(literal.clone());
        }
    }
    clause
}

fn rebuild(clauses: Vec<Clause>) -> ConstraintNode {
    if clauses.iter().any(|c| c.is_empty()) {
        return ConstraintNode::always_false();
    }
    let mut nodes: Vec<ConstraintNode> = clauses
        .into_iter()
        .map(|mut clause| match clause.len() {
            1 => clause.swap_remove(0),
            _ => ConstraintNode::Union(clause),
        })
        .collect();
    match nodes.len() {
        0 => ConstraintNode::True,
        1 => nodes.swap_remove(0),
        _ => ConstraintNode::Intersection(nodes),
    }
}
