//! Capacity limits of the in-memory coverage registry.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`CubeRegistry`](super::CubeRegistry).
///
/// When a limit is exceeded the oldest cubes are forgotten. Forgetting
/// coverage only causes a refetch, so eviction never makes the registry
/// claim data it does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegistryConfig {
    /// Maximum number of stored cubes over all dimensions.
    pub max_cubes: usize,
    /// Maximum number of stored values (included plus excluded) over all cubes.
    pub max_values: usize,
}

impl RegistryConfig {
    pub const DEFAULT_MAX_CUBES: usize = 10_000;
    pub const DEFAULT_MAX_VALUES: usize = 100_000;

    /// A configuration that never evicts.
    pub fn unbounded() -> Self {
        Self {
            max_cubes: usize::MAX,
            max_values: usize::MAX,
        }
    }

    /// Returns true if `cubes` cubes holding `values` values fit.
    pub fn fits(&self, cubes: usize, values: usize) -> bool {
        cubes <= self.max_cubes && values <= self.max_values
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_cubes: Self::DEFAULT_MAX_CUBES,
            max_values: Self::DEFAULT_MAX_VALUES,
        }
    }
}
