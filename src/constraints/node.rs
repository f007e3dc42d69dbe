//! Composable filter trees with AND/OR/NOT logic.
use crate::constraints::predicate::Predicate;
use crate::region::Axis;
use crate::{Item, ItemValue};
use std::ops::Not;
use std::sync::Arc;

/// Filter tree node: leaf predicate, combinator (AND/OR), negation or TRUE.
///
/// - **Leaf**: wraps a concrete [`Predicate`]
/// - **Not**: negates its child
/// - **Intersection**: AND logic – all children must hold
/// - **Union**: OR logic – at least one child must hold
/// - **True**: holds for every item; `Not(True)` is the false filter
///
/// Note: `Not` children are held in an `Arc` so negated subtrees can be
/// shared between trees without deep cloning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintNode {
    Leaf(Predicate),
    Not(Arc<ConstraintNode>),
    Intersection(Vec<ConstraintNode>),
    Union(Vec<ConstraintNode>),
    True,
}

impl ConstraintNode {
    pub fn leaf(predicate: Predicate) -> Self {
        ConstraintNode::Leaf(predicate)
    }

    /// Leaf testing `axis = value`.
    pub fn equals(axis: Axis, value: ItemValue) -> Self {
        ConstraintNode::Leaf(Predicate::Equals { axis, value })
    }

    /// Leaf testing that `axis` is one of `values`.
    pub fn any_of(axis: Axis, values: impl IntoIterator<Item = ItemValue>) -> Self {
        ConstraintNode::Leaf(Predicate::AnyOf {
            axis,
            values: values.into_iter().collect(),
        })
    }

    /// Leaf testing `min <= axis <= max`.
    pub fn range(axis: Axis, min: ItemValue, max: ItemValue) -> Self {
        ConstraintNode::Leaf(Predicate::Range { axis, min, max })
    }

    /// Creates intersection node (AND logic).
    pub fn intersection(children: Vec<ConstraintNode>) -> Self {
        ConstraintNode::Intersection(children)
    }

    /// Creates union node (OR logic).
    pub fn union(children: Vec<ConstraintNode>) -> Self {
        ConstraintNode::Union(children)
    }

    /// The filter no item satisfies.
    pub fn always_false() -> Self {
        !ConstraintNode::True
    }

    /// Returns true for `Not(True)`.
    pub fn is_false(&self) -> bool {
        matches!(self, ConstraintNode::Not(child) if matches!(child.as_ref(), ConstraintNode::True))
    }

    pub fn stringify(&self) -> String {
        match self {
            ConstraintNode::Leaf(predicate) => predicate.stringify(),
            ConstraintNode::Not(child) => format!("Not({})", child.stringify()),
            ConstraintNode::Intersection(children) => format!(
                "Intersection({})",
                children
                    .iter()
                    .map(|c| c.stringify())
                    .collect::<Vec<_>>()
                    .join(" ∩ ")
            ),
            ConstraintNode::Union(children) => format!(
                "Union({})",
                children
                    .iter()
                    .map(|c| c.stringify())
                    .collect::<Vec<_>>()
                    .join(" ∪ ")
            ),
            ConstraintNode::True => "True".to_string(),
        }
    }

    /// Recursively evaluates the tree against an item.
    ///
    /// An empty intersection holds; an empty union does not.
    pub fn evaluate(&self, item: &Item) -> bool {
        match self {
            ConstraintNode::Leaf(predicate) => predicate.evaluate(item),
            ConstraintNode::Not(child) => !child.evaluate(item),
            ConstraintNode::Intersection(children) => children.iter().all(|c| c.evaluate(item)),
            ConstraintNode::Union(children) => children.iter().any(|c| c.evaluate(item)),
            ConstraintNode::True => true,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ConstraintNode::Leaf(_))
    }

    pub fn is_not(&self) -> bool {
        matches!(self, ConstraintNode::Not(_))
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self, ConstraintNode::Intersection(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, ConstraintNode::Union(_))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, ConstraintNode::True)
    }

    /// Prints the tree structure in a human-readable format.
    ///
    /// # Arguments
    ///
    /// * `indent` - The current indentation level (use 0 for the root)
    pub fn print_tree(&self, indent: usize) {
        let prefix = "  ".repeat(indent);
        match self {
            ConstraintNode::Leaf(predicate) => {
                println!("{}└─ Leaf: {}", prefix, predicate);
            }
            ConstraintNode::Not(child) => {
                println!("{}└─ Not", prefix);
                child.print_tree(indent + 1);
            }
            ConstraintNode::Intersection(children) => {
                println!("{}└─ Intersection", prefix);
                for child in children {
                    child.print_tree(indent + 1);
                }
            }
            ConstraintNode::Union(children) => {
                println!("{}└─ Union", prefix);
                for child in children {
                    child.print_tree(indent + 1);
                }
            }
            ConstraintNode::True => {
                println!("{}└─ True", prefix);
            }
        }
    }
}

impl Not for ConstraintNode {
    type Output = Self;

    fn not(self) -> Self {
        ConstraintNode::Not(Arc::new(self))
    }
}

impl From<Predicate> for ConstraintNode {
    fn from(predicate: Predicate) -> Self {
        ConstraintNode::Leaf(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Axis {
        Axis::new("status")
    }

    fn item(status: ItemValue, priority: ItemValue) -> Item {
        Item::from([(Axis::new("status"), status), (Axis::new("priority"), priority)])
    }

    #[test]
    fn test_intersection_node() {
        let tree = ConstraintNode::intersection(vec![
            ConstraintNode::equals(status(), 1),
            ConstraintNode::equals(Axis::new("priority"), 5),
        ]);
        assert!(tree.evaluate(&item(1, 5)));
        assert!(!tree.evaluate(&item(1, 4)));
    }

    #[test]
    fn test_union_node() {
        let tree = ConstraintNode::union(vec![
            ConstraintNode::equals(status(), 1),
            ConstraintNode::equals(status(), 2),
        ]);
        assert!(tree.evaluate(&item(2, 0)));
        assert!(!tree.evaluate(&item(3, 0)));
    }

    #[test]
    fn test_not_node() {
        let tree = !ConstraintNode::equals(status(), 1);
        assert!(tree.is_not());
        assert!(tree.evaluate(&item(2, 0)));
        assert!(!tree.evaluate(&item(1, 0)));
    }

    #[test]
    fn test_node_kind_checks() {
        let leaf = ConstraintNode::equals(status(), 1);
        assert!(leaf.is_leaf());
        assert!(!leaf.is_not());

        let both = ConstraintNode::intersection(vec![leaf.clone(), ConstraintNode::True]);
        assert!(both.is_intersection());
        assert!(!both.is_union());

        let either = ConstraintNode::union(vec![leaf]);
        assert!(either.is_union());
        assert!(!either.is_true());
        assert!(ConstraintNode::True.is_true());
    }

    #[test]
    fn test_true_and_false() {
        assert!(ConstraintNode::True.evaluate(&Item::new()));
        assert!(!ConstraintNode::always_false().evaluate(&Item::new()));
        assert!(ConstraintNode::always_false().is_false());
        assert!(!ConstraintNode::True.is_false());
    }

    #[test]
    fn test_empty_combinators() {
        assert!(ConstraintNode::intersection(vec![]).evaluate(&Item::new()));
        assert!(!ConstraintNode::union(vec![]).evaluate(&Item::new()));
    }

    #[test]
    fn test_stringify() {
        let tree = ConstraintNode::intersection(vec![
            ConstraintNode::equals(status(), 1),
            !ConstraintNode::True,
        ]);
        assert_eq!(tree.stringify(), "Intersection(status = 1 ∩ Not(True))");
    }

    #[test]
    fn print_does_not_panic() {
        let tree = ConstraintNode::union(vec![
            ConstraintNode::range(Axis::new("votes"), 1, 9),
            !ConstraintNode::any_of(status(), [1, 2]),
        ]);
        tree.print_tree(0);
    }
}
