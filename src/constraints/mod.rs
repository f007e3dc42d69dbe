//! Boolean item filters: predicates, trees, and CNF normalization.

pub mod error;
pub mod node;
pub mod normalize;
pub mod predicate;

pub use error::ConstraintError;
pub use node::ConstraintNode;
pub use normalize::{CnfNormalizer, Normalizer, RewriteRule};
pub use predicate::Predicate;
