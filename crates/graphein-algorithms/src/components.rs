//! Connectivity: weak components, strongly connected components, and the
//! union-find structure backing Kruskal's algorithm.

use std::collections::VecDeque;
use std::hash::Hash;

use graphein_common::Ring;
use graphein_core::Graph;
use rand::{Rng, RngExt};

use crate::traits::VertexIndex;

/// Partition of the vertex set into connected components, ignoring edge
/// orientation (weak connectivity). Components are discovered by BFS in
/// vertex enumeration order.
pub fn connected_components<V, K, W, R>(graph: &Graph<V, K, W, R>) -> Vec<Vec<V>>
where
    V: Clone + Eq + Hash + std::fmt::Debug,
    K: Clone + Eq + Hash,
    R: Ring<W>,
{
    let index = VertexIndex::new(graph.vertices().map(|vx| vx.value()));
    let adj = symmetric_adjacency(graph, &index);
    let n = index.len();

    let mut component_of: Vec<Option<usize>> = vec![None; n];
    let mut components = Vec::new();

    for root in 0..n {
        if component_of[root].is_some() {
            continue;
        }
        let id = components.len();
        let mut members = Vec::new();
        let mut queue = VecDeque::new();
        component_of[root] = Some(id);
        queue.push_back(root);

        while let Some(u) = queue.pop_front() {
            members.push(index.value_of(u).clone());
            for &v in &adj[u] {
                if component_of[v].is_none() {
                    component_of[v] = Some(id);
                    queue.push_back(v);
                }
            }
        }
        components.push(members);
    }
    components
}

/// Adjacency over dense ids with orientation ignored.
pub(crate) fn symmetric_adjacency<V, K, W, R>(
    graph: &Graph<V, K, W, R>,
    index: &VertexIndex<'_, V>,
) -> Vec<Vec<usize>>
where
    V: Clone + Eq + Hash + std::fmt::Debug,
    K: Clone + Eq + Hash,
    R: Ring<W>,
{
    let mut adj = vec![Vec::new(); index.len()];
    for edge in graph.edges() {
        let (Some(u), Some(v)) = (index.id_of(edge.start()), index.id_of(edge.end())) else {
            continue;
        };
        adj[u].push(v);
        if u != v {
            adj[v].push(u);
        }
    }
    adj
}

/// Strongly connected components via Tarjan's algorithm.
///
/// Runs on an explicit work stack so deep adjacency chains cannot overflow
/// the call stack; each frame carries the vertex and its next adjacency
/// position, and a component closes when a vertex's low-link equals its
/// own discovery index. The output partitions the vertex set; component
/// order follows DFS completion and carries no meaning.
///
/// Undirected graphs store symmetric adjacency, so there every connected
/// component comes back as one SCC.
pub fn strongly_connected_components<V, K, W, R>(graph: &Graph<V, K, W, R>) -> Vec<Vec<V>>
where
    V: Clone + Eq + Hash + std::fmt::Debug,
    K: Clone + Eq + Hash,
    R: Ring<W>,
{
    let index = VertexIndex::new(graph.vertices().map(|vx| vx.value()));
    let n = index.len();

    // Adjacency as the graph stores it: outgoing for directed graphs,
    // symmetric for undirected ones.
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    for u in 0..n {
        let value = index.value_of(u);
        for edge in graph.incident_edges(value) {
            if let Some(v) = index.id_of(edge.opposite(value)) {
                adj[u].push(v);
            }
        }
    }

    const UNVISITED: usize = usize::MAX;
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut timer = 0usize;
    let mut components = Vec::new();

    // Explicit DFS frames: (vertex, next adjacency index).
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }
        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        on_stack[root] = true;
        stack.push(root);
        frames.push((root, 0));

        while let Some(&(u, next)) = frames.last() {
            if next < adj[u].len() {
                if let Some(frame) = frames.last_mut() {
                    frame.1 += 1;
                }
                let v = adj[u][next];
                if disc[v] == UNVISITED {
                    disc[v] = timer;
                    low[v] = timer;
                    timer += 1;
                    on_stack[v] = true;
                    stack.push(v);
                    frames.push((v, 0));
                } else if on_stack[v] {
                    low[u] = low[u].min(disc[v]);
                }
            } else {
                frames.pop();
                if let Some(&(p, _)) = frames.last() {
                    low[p] = low[p].min(low[u]);
                }
                if low[u] == disc[u] {
                    let mut members = Vec::new();
                    while let Some(w) = stack.pop() {
                        on_stack[w] = false;
                        members.push(index.value_of(w).clone());
                        if w == u {
                            break;
                        }
                    }
                    components.push(members);
                }
            }
        }
    }

    tracing::debug!(components = components.len(), "tarjan scc complete");
    components
}

/// Disjoint-set forest with path compression.
///
/// The union direction is decided by a caller-supplied random source, so
/// a fixed seed reproduces the exact forest shape run after run.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    /// Creates `size` singleton sets.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    /// Representative of `x`'s set, compressing the path on the way.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Joins the sets holding `x` and `y`. Returns false when they already
    /// share a representative.
    pub fn union<G: Rng>(&mut self, x: usize, y: usize, rng: &mut G) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }
        if rng.random_bool(0.5) {
            self.parent[ry] = rx;
        } else {
            self.parent[rx] = ry;
        }
        true
    }
}
