//! Pluggable rewrite rules applied before CNF conversion.

use std::fmt::Debug;
use std::sync::Arc;

use crate::constraints::predicate::Predicate;
use crate::constraints::{ConstraintError, ConstraintNode};

/// Rewrites a single node into an equivalent one.
///
/// Rules see nodes bottom-up: children are already rewritten when a rule
/// is offered their parent.
pub trait RewriteRule: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// Returns the replacement for `node`, or `None` to leave it unchanged.
    fn rewrite(&self, node: &ConstraintNode) -> Option<ConstraintNode>;
}

/// Replaces "attribute is one of" leaves with a union of equality leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyOfToEquals;

impl RewriteRule for AnyOfToEquals {
    fn name(&self) -> &'static str {
        "any-of-to-equals"
    }

    fn rewrite(&self, node: &ConstraintNode) -> Option<ConstraintNode> {
        let ConstraintNode::Leaf(Predicate::AnyOf { axis, values }) = node else {
            return None;
        };
        let mut equals: Vec<ConstraintNode> = values
            .iter()
            .map(|&value| ConstraintNode::equals(axis.clone(), value))
            .collect();
        Some(match equals.len() {
            0 => ConstraintNode::always_false(),
            1 => equals.swap_remove(0),
            _ => ConstraintNode::Union(equals),
        })
    }
}

/// Applies `rules` to every node, bottom-up, until none fires.
///
/// Each time a rule fires the replacement is reduced again; more than
/// `max_passes` nested rewrites is reported as non-convergence.
pub fn reduce(
    node: &ConstraintNode,
    rules: &[Arc<dyn RewriteRule>],
    max_passes: usize,
) -> Result<ConstraintNode, ConstraintError> {
    reduce_node(node, rules, max_passes, 0)
}

fn reduce_node(
    node: &ConstraintNode,
    rules: &[Arc<dyn RewriteRule>],
    max_passes: usize,
    pass: usize,
) -> Result<ConstraintNode, ConstraintError> {
    if pass > max_passes {
        return Err(ConstraintError::RewriteDidNotConverge { passes: max_passes });
    }
    let rebuilt = match node {
        ConstraintNode::Leaf(_) | ConstraintNode::True => node.clone(),
        ConstraintNode::Not(child) => !reduce_node(child, rules, max_passes, pass)?,
        ConstraintNode::Intersection(children) => ConstraintNode::Intersection(
            children
                .iter()
                .map(|c| reduce_node(c, rules, max_passes, pass))
                .collect::<Result<_, _>>()?,
        ),
        ConstraintNode::Union(children) => ConstraintNode::Union(
            children
                .iter()
                .map(|c| reduce_node(c, rules, max_passes, pass))
                .collect::<Result<_, _>>()?,
        ),
    };
    for rule in rules {
        if let Some(next) = rule.rewrite(&rebuilt) {
            tracing::trace!(rule = rule.name(), "rewrite rule fired");
            return reduce_node(&next, rules, max_passes, pass + 1);
        }
    }
    Ok(rebuilt)
}
