//! Coverage registries: which regions have been fully synchronized.
//!
//! [`CoverageRegistry`] is the boundary the synchronizer talks to.
//! [`CubeRegistry`] is an in-memory implementation that stores cubes
//! bucketed by dimension.

mod config;
mod cube_registry;
mod cube_set;

pub use config::RegistryConfig;
pub use cube_registry::CubeRegistry;

use crate::region::Region;

/// Records which regions are fully synchronized.
///
/// Implementations copy what they retain; callers keep ownership of the
/// regions they pass in.
pub trait CoverageRegistry {
    /// Returns true if every item `region` admits is already synchronized.
    fn is_synced(&self, region: &Region) -> bool;

    /// Records `region` as synchronized. Returns true if the recorded
    /// coverage grew.
    fn set_synced(&mut self, region: &Region) -> bool;

    /// Forgets every recorded coverage that may share an item with
    /// `region`. Returns true if anything was forgotten.
    fn set_unsynced(&mut self, region: &Region) -> bool;
}
