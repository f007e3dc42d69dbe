use thiserror::Error;

/// Errors that can occur while normalizing constraint trees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("Conjunctive normal form exceeds {limit} clauses")]
    ClauseLimitExceeded { limit: usize },

    #[error("Rewrite rules did not converge after {passes} passes")]
    RewriteDidNotConverge { passes: usize },
}
