use std::collections::BTreeMap;

use super::cube_set::{CubeSet, StoredCube};
use super::{CoverageRegistry, RegistryConfig};
use crate::region::Region;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// In-memory coverage registry.
///
/// Synchronized regions are stored as cubes grouped by the number of axes
/// they constrain. A query is synced if some stored cube encompasses it;
/// only cubes with at most as many axes as the query can do that.
///
/// # Examples
///
/// ```
/// use syncube::{Axis, CoverageRegistry, CubeRegistry, Region};
///
/// let project = Axis::new("project");
/// let mut synced = Region::new();
/// synced.add_included(&project, [1, 2]);
///
/// let mut registry = CubeRegistry::new();
/// assert!(registry.set_synced(&synced));
///
/// let mut query = Region::new();
/// query.add_included(&project, [2]);
/// assert!(registry.is_synced(&query));
///
/// registry.set_unsynced(&query);
/// assert!(!registry.is_synced(&query));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Snapshot", into = "Snapshot"))]
pub struct CubeRegistry {
    config: RegistryConfig,
    sets: BTreeMap<usize, CubeSet>,
    next_seq: u64,
    values: usize,
}

impl Default for CubeRegistry {
    fn default() -> Self {
        Self::with_config(RegistryConfig::default())
    }
}

impl CubeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            sets: BTreeMap::new(),
            next_seq: 0,
            values: 0,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of stored cubes.
    pub fn len(&self) -> usize {
        self.sets.values().map(CubeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Number of values held by all stored cubes.
    pub fn value_count(&self) -> usize {
        self.values
    }

    /// Forgets all coverage.
    pub fn clear(&mut self) {
        self.sets.clear();
        self.values = 0;
    }

    /// Stored cubes by ascending dimension, oldest first within a dimension.
    pub fn cubes(&self) -> impl Iterator<Item = &Region> + '_ {
        self.sets.values().flat_map(|s| s.iter().map(|c| &c.region))
    }

    /// Logs every stored cube at debug level.
    pub fn dump(&self) {
        for set in self.sets.values() {
            tracing::debug!(dimensions = set.dimensions(), cubes = set.len(), "cube set");
            for (i, cube) in set.iter().enumerate() {
                tracing::debug!(index = i, seq = cube.seq, "{}", cube.region);
            }
        }
    }

    fn insert(&mut self, region: Region) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.values += region.value_count();
        let dimensions = region.axis_count();
        self.sets
            .entry(dimensions)
            .or_insert_with(|| CubeSet::new(dimensions))
            .push(seq, region);
        self.enforce_capacity();
    }

    fn forget(&mut self, removed: &[StoredCube]) {
        self.values -= removed.iter().map(|c| c.region.value_count()).sum::<usize>();
    }

    fn drop_empty_sets(&mut self) {
        self.sets.retain(|_, set| !set.is_empty());
    }

    /// Evicts the oldest cubes until the configured limits hold.
    fn enforce_capacity(&mut self) {
        while !self.config.fits(self.len(), self.values) {
            let oldest = self
                .sets
                .iter()
                .filter_map(|(dims, set)| set.oldest().map(|seq| (seq, *dims)))
                .min();
            let Some((_, dims)) = oldest else {
                break;
            };
            let Some(evicted) = self.sets.get_mut(&dims).and_then(CubeSet::pop_oldest) else {
                break;
            };
            self.values -= evicted.region.value_count();
            tracing::warn!(
                cube = %evicted.region,
                max_cubes = self.config.max_cubes,
                max_values = self.config.max_values,
                "coverage registry full, evicting oldest cube"
            );
            self.drop_empty_sets();
        }
    }
}

impl CoverageRegistry for CubeRegistry {
    fn is_synced(&self, region: &Region) -> bool {
        if region.is_contradiction() {
            return true;
        }
        self.sets
            .range(..=region.axis_count())
            .any(|(_, set)| set.encompasses(region))
    }

    fn set_synced(&mut self, region: &Region) -> bool {
        if region.is_contradiction() {
            tracing::trace!(%region, "region admits no item, nothing to record");
            return false;
        }
        let cube = region.copy();
        if self.is_synced(&cube) {
            return false;
        }
        let mut replaced = Vec::new();
        for set in self.sets.range_mut(cube.axis_count()..).map(|(_, s)| s) {
            replaced.extend(set.remove_encompassed_by(&cube));
        }
        self.forget(&replaced);
        self.drop_empty_sets();
        tracing::debug!(%cube, replaced = replaced.len(), "region synced");
        self.insert(cube);
        true
    }

    fn set_unsynced(&mut self, region: &Region) -> bool {
        let mut removed = Vec::new();
        for set in self.sets.values_mut() {
            removed.extend(set.remove_overlapping(region));
        }
        self.forget(&removed);
        self.drop_empty_sets();
        if !removed.is_empty() {
            tracing::debug!(%region, removed = removed.len(), "region unsynced");
        }
        !removed.is_empty()
    }
}

/// Persisted form: the configuration and the cubes in insertion order.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct Snapshot {
    config: RegistryConfig,
    cubes: Vec<Region>,
}

#[cfg(feature = "serde")]
impl From<CubeRegistry> for Snapshot {
    fn from(registry: CubeRegistry) -> Self {
        let mut stored: Vec<StoredCube> = registry
            .sets
            .into_values()
            .flat_map(|set| set.iter().cloned().collect::<Vec<_>>())
            .collect();
        stored.sort_by_key(|c| c.seq);
        Self {
            config: registry.config,
            cubes: stored.into_iter().map(|c| c.region).collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Snapshot> for CubeRegistry {
    fn from(snapshot: Snapshot) -> Self {
        let mut registry = CubeRegistry::with_config(snapshot.config);
        for cube in snapshot.cubes {
            registry.insert(cube);
        }
        registry
    }
}
