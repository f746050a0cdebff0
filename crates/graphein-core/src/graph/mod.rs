//! The generic weighted graph store.
//!
//! [`Graph`] owns the vertex set (keyed by vertex value) and the edge set
//! (keyed by edge key), plus the adjacency indexes algorithms traverse.
//! Directed and undirected graphs share one surface; the behavioral
//! difference is isolated to the adjacency-mutation rule applied in
//! [`Graph::add_edge`] and the pair-lookup rule in [`Graph::get_edge`].
//!
//! Algorithms borrow the graph read-only for their whole run; the borrow
//! checker enforces the engine's exclusive-access contract, so the store
//! carries no interior locking.

mod edge;
mod vertex;

pub use edge::Edge;
pub use vertex::Vertex;

use std::fmt;
use std::hash::Hash;

use graphein_common::utils::hash::{FxHashMap, FxIndexMap};
use graphein_common::{Error, Result, Ring};
use smallvec::SmallVec;

/// Whether edges run one way or both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Edges connect start to end only.
    Directed,
    /// Edges connect both endpoints symmetrically.
    Undirected,
}

/// A weighted graph over vertex values `V`, edge keys `K`, weights `W`, and
/// a [`Ring`] `R` supplying the weight algebra.
///
/// Vertices and edges are created through [`add_vertex`](Graph::add_vertex)
/// and [`add_edge`](Graph::add_edge) and never removed. Enumeration order
/// follows insertion order.
pub struct Graph<V, K, W, R> {
    orientation: Orientation,

    /// Weight algebra, fixed at construction.
    ring: R,

    /// Vertices keyed by their value.
    vertices: FxIndexMap<V, Vertex<V>>,

    /// Edges keyed by their unique key.
    edges: FxIndexMap<K, Edge<V, K, W>>,

    /// Keys of the edges incident to each vertex: outgoing edges for
    /// directed graphs, all incident edges for undirected ones. A
    /// self-loop is recorded once so traversals see it a single time.
    incident: FxHashMap<V, SmallVec<[K; 4]>>,

    /// Most recently inserted edge key per ordered endpoint pair.
    pairs: FxHashMap<(V, V), K>,
}

impl<V, K, W, R> Graph<V, K, W, R>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: Clone + Eq + Hash,
    R: Ring<W>,
{
    /// Creates an empty directed graph using `ring` for weight arithmetic.
    #[must_use]
    pub fn directed(ring: R) -> Self {
        Self::new(Orientation::Directed, ring)
    }

    /// Creates an empty undirected graph using `ring` for weight arithmetic.
    #[must_use]
    pub fn undirected(ring: R) -> Self {
        Self::new(Orientation::Undirected, ring)
    }

    /// Creates an empty graph with the given orientation.
    #[must_use]
    pub fn new(orientation: Orientation, ring: R) -> Self {
        Self {
            orientation,
            ring,
            vertices: FxIndexMap::default(),
            edges: FxIndexMap::default(),
            incident: FxHashMap::default(),
            pairs: FxHashMap::default(),
        }
    }

    // === Accessors ===

    /// The graph's orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// True for directed graphs.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.orientation == Orientation::Directed
    }

    /// The ring supplying this graph's weight algebra.
    #[must_use]
    pub fn ring(&self) -> &R {
        &self.ring
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V>> {
        self.vertices.values()
    }

    /// Iterates over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<V, K, W>> {
        self.edges.values()
    }

    /// Looks up a vertex by value.
    #[must_use]
    pub fn get_vertex(&self, value: &V) -> Option<&Vertex<V>> {
        self.vertices.get(value)
    }

    /// True when a vertex with this value exists.
    #[must_use]
    pub fn contains_vertex(&self, value: &V) -> bool {
        self.vertices.contains_key(value)
    }

    /// Looks up an edge by key.
    #[must_use]
    pub fn get_edge_by_key(&self, key: &K) -> Option<&Edge<V, K, W>> {
        self.edges.get(key)
    }

    /// Looks up the most recently inserted edge between two endpoints.
    ///
    /// Directed graphs resolve the ordered pair; undirected graphs also try
    /// the reversed pair before reporting absence.
    #[must_use]
    pub fn get_edge(&self, start: &V, end: &V) -> Option<&Edge<V, K, W>> {
        let forward = self.pairs.get(&(start.clone(), end.clone()));
        let key = match self.orientation {
            Orientation::Directed => forward,
            Orientation::Undirected => {
                forward.or_else(|| self.pairs.get(&(end.clone(), start.clone())))
            }
        }?;
        self.edges.get(key)
    }

    /// Like [`get_edge`](Graph::get_edge), but a miss is an error for
    /// callers that expect the edge to exist.
    pub fn require_edge(&self, start: &V, end: &V) -> Result<&Edge<V, K, W>> {
        self.get_edge(start, end)
            .ok_or_else(|| Error::NoSuchEdge(format!("{start:?} -> {end:?}")))
    }

    /// Iterates over the edges incident to `v`: outgoing edges for directed
    /// graphs, all incident edges for undirected ones. Every parallel edge
    /// appears individually; a self-loop appears once.
    pub fn incident_edges(&self, v: &V) -> impl Iterator<Item = &Edge<V, K, W>> {
        self.incident
            .get(v)
            .into_iter()
            .flatten()
            .filter_map(|key| self.edges.get(key))
    }

    // === Mutation ===

    /// Inserts a vertex if absent and returns it; a vertex with an equal
    /// value already in the graph is returned unchanged.
    pub fn add_vertex(&mut self, value: V) -> &Vertex<V> {
        self.vertices
            .entry(value.clone())
            .or_insert_with(|| Vertex::new(value))
    }

    /// Inserts an edge between two existing vertices.
    ///
    /// Fails with [`Error::NoSuchVertex`] when either endpoint is absent,
    /// leaving the graph unchanged. Inserting a key that already exists is
    /// a no-op returning the existing edge: neither adjacency nor the pair
    /// index is touched again.
    pub fn add_edge(&mut self, start: &V, end: &V, key: K, weight: W) -> Result<&Edge<V, K, W>> {
        if !self.vertices.contains_key(start) {
            return Err(Error::NoSuchVertex(format!("{start:?}")));
        }
        if !self.vertices.contains_key(end) {
            return Err(Error::NoSuchVertex(format!("{end:?}")));
        }
        if self.edges.contains_key(&key) {
            return Ok(&self.edges[&key]);
        }

        match self.orientation {
            Orientation::Directed => {
                if let Some(vx) = self.vertices.get_mut(start) {
                    vx.push_neighbor(end.clone());
                }
            }
            Orientation::Undirected => {
                if let Some(vx) = self.vertices.get_mut(start) {
                    vx.push_neighbor(end.clone());
                }
                if let Some(vx) = self.vertices.get_mut(end) {
                    vx.push_neighbor(start.clone());
                }
            }
        }

        self.incident
            .entry(start.clone())
            .or_default()
            .push(key.clone());
        if self.orientation == Orientation::Undirected && start != end {
            self.incident
                .entry(end.clone())
                .or_default()
                .push(key.clone());
        }
        self.pairs
            .insert((start.clone(), end.clone()), key.clone());

        let edge = Edge::new(start.clone(), end.clone(), key.clone(), weight);
        Ok(self.edges.entry(key).or_insert(edge))
    }
}
