//! Region dimensions.

use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable id of the axis that carries the connection an item belongs to.
pub const CONNECTION_AXIS_ID: &str = "sync:connection";

/// A dimension of a region, identified with one item attribute.
///
/// Equality, hashing and ordering look at the stable `id` only; the name is
/// for display. Ids are ordered case-insensitively; ids differing only in
/// case are distinct axes and fall back to plain string order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Axis {
    id: Id,
    name: Option<String>,
}

impl Axis {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Creates an axis with a human-readable name.
    pub fn named(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// The axis holding connection items.
    pub fn connection() -> Self {
        Self::named(CONNECTION_AXIS_ID, "Connection")
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, falling back to the id.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl PartialEq for Axis {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Axis {}

impl Hash for Axis {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Ord for Axis {
    fn cmp(&self, other: &Self) -> Ordering {
        let folded = |id: &str| id.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
        folded(&self.id)
            .cmp(&folded(&other.id))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Axis {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
