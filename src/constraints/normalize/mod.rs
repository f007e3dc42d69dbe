//! Normalization of filter trees into conjunctive normal form.
//!
//! The region builder consumes trees shaped as an intersection of clauses,
//! each clause a literal or a union of literals. [`CnfNormalizer`] produces
//! that shape in three steps: pluggable rewrite rules, negation push-down,
//! and distribution of unions over intersections.

mod distribution;
mod negation;
mod rules;

pub use distribution::to_cnf;
pub use negation::to_nnf;
pub use rules::{reduce, AnyOfToEquals, RewriteRule};

#[cfg(debug_assertions)]
pub mod assertions;

#[cfg(not(debug_assertions))]
pub mod assertions {
    use crate::constraints::ConstraintNode;

    pub fn is_cnf(_node: &ConstraintNode) -> bool {
        true
    }
}

use std::sync::Arc;

use super::{ConstraintError, ConstraintNode};

/// Rewrites a filter tree into conjunctive normal form.
///
/// Implementations must be pure: the same input always yields the same
/// output. Closures of the right shape implement this trait.
pub trait Normalizer {
    fn normalize(&self, tree: &ConstraintNode) -> Result<ConstraintNode, ConstraintError>;
}

impl<F> Normalizer for F
where
    F: Fn(&ConstraintNode) -> Result<ConstraintNode, ConstraintError>,
{
    fn normalize(&self, tree: &ConstraintNode) -> Result<ConstraintNode, ConstraintError> {
        self(tree)
    }
}

/// Default clause budget for CNF distribution.
pub const DEFAULT_MAX_CLAUSES: usize = 256;

/// Default bound on nested rule rewrites.
pub const DEFAULT_MAX_REWRITE_PASSES: usize = 32;

/// Rule-driven CNF normalizer.
///
/// Starts with the [`AnyOfToEquals`] rule; more rules can be appended with
/// [`with_rule`](CnfNormalizer::with_rule).
#[derive(Debug, Clone)]
pub struct CnfNormalizer {
    rules: Vec<Arc<dyn RewriteRule>>,
    max_clauses: usize,
    max_rewrite_passes: usize,
}

impl CnfNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer that applies no rewrite rules.
    pub fn without_rules() -> Self {
        Self {
            rules: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, rule: impl RewriteRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn with_max_clauses(mut self, max_clauses: usize) -> Self {
        self.max_clauses = max_clauses;
        self
    }

    pub fn with_max_rewrite_passes(mut self, passes: usize) -> Self {
        self.max_rewrite_passes = passes;
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name())
    }

    pub fn max_clauses(&self) -> usize {
        self.max_clauses
    }

    pub fn max_rewrite_passes(&self) -> usize {
        self.max_rewrite_passes
    }
}

impl Default for CnfNormalizer {
    fn default() -> Self {
        Self {
            rules: vec![Arc::new(AnyOfToEquals)],
            max_clauses: DEFAULT_MAX_CLAUSES,
            max_rewrite_passes: DEFAULT_MAX_REWRITE_PASSES,
        }
    }
}

impl Normalizer for CnfNormalizer {
    fn normalize(&self, tree: &ConstraintNode) -> Result<ConstraintNode, ConstraintError> {
        let reduced = reduce(tree, &self.rules, self.max_rewrite_passes)?;
        let cnf = to_cnf(&to_nnf(&reduced), self.max_clauses)?;
        debug_assert!(assertions::is_cnf(&cnf), "not in CNF: {}", cnf.stringify());
        Ok(cnf)
    }
}
