//! Vertex representation.

use smallvec::SmallVec;

/// A graph vertex: a user-supplied value plus the neighbor values recorded
/// when edges were inserted.
///
/// Vertex identity is value equality; a graph never holds two vertices with
/// equal values. Directed graphs record only outgoing neighbors here, while
/// undirected graphs record both endpoints in each other's list.
#[derive(Debug, Clone)]
pub struct Vertex<V> {
    value: V,
    neighbors: SmallVec<[V; 4]>,
}

impl<V> Vertex<V> {
    pub(crate) fn new(value: V) -> Self {
        Self {
            value,
            neighbors: SmallVec::new(),
        }
    }

    /// The user value identifying this vertex.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The recorded neighbor values, in insertion order.
    ///
    /// Parallel edges contribute one entry each, and an undirected self-loop
    /// contributes two (one per symmetric append).
    pub fn neighbors(&self) -> impl Iterator<Item = &V> {
        self.neighbors.iter()
    }

    /// Number of recorded neighbor entries.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub(crate) fn push_neighbor(&mut self, value: V) {
        self.neighbors.push(value);
    }
}
