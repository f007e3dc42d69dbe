//! Cubes of equal dimension.

use crate::region::Region;

/// A stored cube tagged with its insertion sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct StoredCube {
    pub(super) seq: u64,
    pub(super) region: Region,
}

/// Cubes that all constrain the same number of axes, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct CubeSet {
    dimensions: usize,
    cubes: Vec<StoredCube>,
}

impl CubeSet {
    pub(super) fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            cubes: Vec::new(),
        }
    }

    pub(super) fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub(super) fn len(&self) -> usize {
        self.cubes.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = &StoredCube> + '_ {
        self.cubes.iter()
    }

    /// Appends a cube; `seq` must be larger than every stored sequence number.
    pub(super) fn push(&mut self, seq: u64, region: Region) {
        debug_assert_eq!(region.axis_count(), self.dimensions, "{region}");
        debug_assert!(self.cubes.last().map_or(true, |c| c.seq < seq));
        self.cubes.push(StoredCube { seq, region });
    }

    /// Returns true if some cube encompasses `sample`.
    pub(super) fn encompasses(&self, sample: &Region) -> bool {
        self.cubes.iter().any(|c| c.region.encompasses(sample))
    }

    /// Removes the cubes `sample` encompasses.
    pub(super) fn remove_encompassed_by(&mut self, sample: &Region) -> Vec<StoredCube> {
        self.remove_where(|c| sample.encompasses(c))
    }

    /// Removes the cubes that may share an item with `sample`.
    pub(super) fn remove_overlapping(&mut self, sample: &Region) -> Vec<StoredCube> {
        self.remove_where(|c| c.intersect(sample, true).is_some())
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&Region) -> bool) -> Vec<StoredCube> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.cubes)
            .into_iter()
            .partition(|c| predicate(&c.region));
        self.cubes = kept;
        removed
    }

    /// Sequence number of the oldest cube.
    pub(super) fn oldest(&self) -> Option<u64> {
        self.cubes.first().map(|c| c.seq)
    }

    pub(super) fn pop_oldest(&mut self) -> Option<StoredCube> {
        if self.cubes.is_empty() {
            return None;
        }
        Some(self.cubes.remove(0))
    }

    pub(super) fn value_count(&self) -> usize {
        self.cubes.iter().map(|c| c.region.value_count()).sum()
    }
}
