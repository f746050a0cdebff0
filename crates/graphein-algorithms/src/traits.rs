//! Shared helpers for the algorithm library.

use std::cmp::Ordering;
use std::hash::Hash;

use graphein_common::Ring;
use graphein_common::utils::hash::FxHashMap;

/// Min-heap entry scoring a payload through a [`Ring`] comparison.
///
/// `std::collections::BinaryHeap` is a max-heap, so the ordering here is
/// reversed. Entries with ring-equal scores compare equal and pop in
/// whatever order the heap holds them.
pub struct MinScored<'r, W, T, R> {
    /// Score the entry is ordered by.
    pub score: W,
    /// Scored payload.
    pub item: T,
    /// Ring used to compare scores.
    pub ring: &'r R,
}

impl<'r, W, T, R: Ring<W>> MinScored<'r, W, T, R> {
    /// Creates a heap entry scored through `ring`.
    pub fn new(score: W, item: T, ring: &'r R) -> Self {
        Self { score, item, ring }
    }
}

impl<W, T, R: Ring<W>> PartialEq for MinScored<'_, W, T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.ring.cmp(&self.score, &other.score) == Ordering::Equal
    }
}

impl<W, T, R: Ring<W>> Eq for MinScored<'_, W, T, R> {}

impl<W, T, R: Ring<W>> PartialOrd for MinScored<'_, W, T, R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W, T, R: Ring<W>> Ord for MinScored<'_, W, T, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ring.cmp(&self.score, &other.score).reverse()
    }
}

/// Dense id mapping over a graph's vertex values.
///
/// Several algorithms keep per-vertex state in flat vectors instead of
/// hashing vertex values in their inner loops; this assigns each value an
/// id in `0..len` following the graph's enumeration order.
pub struct VertexIndex<'g, V> {
    values: Vec<&'g V>,
    ids: FxHashMap<&'g V, usize>,
}

impl<'g, V: Eq + Hash> VertexIndex<'g, V> {
    /// Builds the mapping from a vertex-value iterator.
    pub fn new(values: impl Iterator<Item = &'g V>) -> Self {
        let values: Vec<&'g V> = values.collect();
        let mut ids = FxHashMap::default();
        for (i, v) in values.iter().enumerate() {
            ids.insert(*v, i);
        }
        Self { values, ids }
    }

    /// Number of mapped vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no vertices are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The dense id of a vertex value.
    #[must_use]
    pub fn id_of(&self, value: &V) -> Option<usize> {
        self.ids.get(value).copied()
    }

    /// The vertex value holding a dense id.
    #[must_use]
    pub fn value_of(&self, id: usize) -> &'g V {
        self.values[id]
    }
}
