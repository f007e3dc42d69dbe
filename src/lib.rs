//! syncube - axis-aligned coverage regions for lazily synchronized item data
//!
//! A disconnected client pulls remote items matching boolean filters. To know
//! which attribute-value combinations are already fully synchronized it
//! approximates each filter as a [`Region`](region::Region): one axis per
//! attribute, each axis restricted by an included and/or excluded value set.
//!
//! - [`constraints`] - the boolean filter tree and its CNF normalizer.
//! - [`region`] - regions, their intersection, and the tree-to-region builder.
//! - [`registry`] - the coverage registry that stores synchronized regions.

pub mod constraints;
pub mod region;
pub mod registry;

use std::collections::BTreeMap;

pub use region::{build_region, Axis, AxisConstraint, Region, RegionBuilder, RegionError};
pub use registry::{CoverageRegistry, CubeRegistry, RegistryConfig};

/// Identifier type used for axes.
pub type Id = String;

/// Attribute value; values are item keys on the remote side.
pub type ItemValue = u64;

/// A single-valued assignment of attribute values, used to evaluate
/// predicates and regions against a concrete item.
pub type Item = BTreeMap<Axis, ItemValue>;
