//! Symmetric collision-filter relation over geometry pairs.

use indexmap::IndexSet;
use scenic_core::GeometryId;

/// Set of unordered geometry pairs excluded from collision consideration.
///
/// Pairs are stored with the smaller ID first. A geometry is always filtered
/// against itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionFilter {
    pairs: IndexSet<(GeometryId, GeometryId)>,
}

fn ordered(a: GeometryId, b: GeometryId) -> (GeometryId, GeometryId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl CollisionFilter {
    /// An empty relation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude every pair of distinct members of `ids`.
    ///
    /// Returns the number of newly recorded pairs.
    pub fn exclude_within(&mut self, ids: &[GeometryId]) -> usize {
        let before = self.pairs.len();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                if a != b {
                    self.pairs.insert(ordered(a, b));
                }
            }
        }
        self.pairs.len() - before
    }

    /// Exclude every pair `(a, b)` with `a` in `set_a`, `b` in `set_b`, `a != b`.
    ///
    /// Returns the number of newly recorded pairs.
    pub fn exclude_between(&mut self, set_a: &[GeometryId], set_b: &[GeometryId]) -> usize {
        let before = self.pairs.len();
        for &a in set_a {
            for &b in set_b {
                if a != b {
                    self.pairs.insert(ordered(a, b));
                }
            }
        }
        self.pairs.len() - before
    }

    /// Whether the pair is excluded. Symmetric; reflexive.
    pub fn is_filtered(&self, a: GeometryId, b: GeometryId) -> bool {
        a == b || self.pairs.contains(&ordered(a, b))
    }

    /// Drop every pair involving `id`.
    pub fn remove_geometry(&mut self, id: GeometryId) {
        self.pairs.retain(|&(a, b)| a != id && b != id);
    }

    /// Number of recorded pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs are recorded.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Recorded pairs in insertion order, smaller ID first.
    pub fn pairs(&self) -> impl Iterator<Item = (GeometryId, GeometryId)> + '_ {
        self.pairs.iter().copied()
    }
}
