//! Structural analysis: bridge detection and elementary cycle enumeration.

use std::fmt;
use std::hash::Hash;

use graphein_common::utils::hash::{FxHashMap, FxHashSet};
use graphein_common::{Error, Result, Ring};
use graphein_core::{Edge, Graph};

use crate::traits::VertexIndex;

/// Finds all bridges of an undirected graph.
///
/// A bridge is an edge whose removal disconnects its component: on the DFS
/// tree, edge `(u, v)` is a bridge iff `low[v] > disc[u]`. The DFS runs on
/// an explicit stack. Only the specific edge instance used to enter a
/// vertex is excluded from re-traversal, so a parallel edge between the
/// same endpoints keeps that pair bridge-free, and self-loops are dropped
/// up front. Pairs come back lower endpoint first.
///
/// Fails with [`Error::RequiresUndirected`] on directed graphs.
pub fn bridges<V, K, W, R>(graph: &Graph<V, K, W, R>) -> Result<Vec<(V, V)>>
where
    V: Clone + Ord + Eq + Hash + fmt::Debug,
    K: Clone + Eq + Hash,
    R: Ring<W>,
{
    if graph.is_directed() {
        return Err(Error::RequiresUndirected {
            algorithm: "bridge detection",
        });
    }

    let index = VertexIndex::new(graph.vertices().map(|vx| vx.value()));
    let n = index.len();

    // (neighbor id, edge key) per vertex; self-loops contribute nothing to
    // connectivity and are dropped here.
    let mut adj: Vec<Vec<(usize, &K)>> = vec![Vec::new(); n];
    for u in 0..n {
        let value = index.value_of(u);
        for edge in graph.incident_edges(value) {
            if edge.is_self_loop() {
                continue;
            }
            if let Some(v) = index.id_of(edge.opposite(value)) {
                adj[u].push((v, edge.key()));
            }
        }
    }

    const UNVISITED: usize = usize::MAX;
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut timer = 0usize;
    let mut found = Vec::new();

    // Frame: (vertex, edge key used to enter it, next adjacency index).
    let mut frames: Vec<(usize, Option<&K>, usize)> = Vec::new();

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }
        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        frames.push((root, None, 0));

        while let Some(&(u, entering, next)) = frames.last() {
            if next < adj[u].len() {
                if let Some(frame) = frames.last_mut() {
                    frame.2 += 1;
                }
                let (v, key) = adj[u][next];
                if entering.is_some_and(|k| k == key) {
                    // The one edge instance that was used to reach u.
                    continue;
                }
                if disc[v] == UNVISITED {
                    disc[v] = timer;
                    low[v] = timer;
                    timer += 1;
                    frames.push((v, Some(key), 0));
                } else {
                    low[u] = low[u].min(disc[v]);
                }
            } else {
                frames.pop();
                if let Some(&(p, _, _)) = frames.last() {
                    low[p] = low[p].min(low[u]);
                    if low[u] > disc[p] {
                        let a = index.value_of(p).clone();
                        let b = index.value_of(u).clone();
                        let pair = if a <= b { (a, b) } else { (b, a) };
                        found.push(pair);
                    }
                }
            }
        }
    }

    tracing::debug!(bridges = found.len(), "bridge detection complete");
    Ok(found)
}

/// Enumerates the elementary cycles through `start` discoverable by one
/// DFS over the graph.
///
/// A cycle is recorded whenever an edge leads back to the start vertex and
/// is reconstructed from the predecessor-edge map along the current DFS
/// path, so its edges come back in reverse-discovery order with the
/// closing edge first. For undirected graphs only the edge instance used
/// to enter the current vertex is excluded from re-traversal, keyed by
/// edge key: a single undirected edge never reports the trivial two-step
/// cycle over itself, while genuine parallel edges do form two-edge
/// cycles.
pub fn elementary_cycles<V, K, W, R>(
    graph: &Graph<V, K, W, R>,
    start: &V,
) -> Result<Vec<Vec<Edge<V, K, W>>>>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: Clone + Eq + Hash,
    W: Clone,
    R: Ring<W>,
{
    if !graph.contains_vertex(start) {
        return Err(Error::NoSuchVertex(format!("{start:?}")));
    }

    struct Frame<V, K, W> {
        value: V,
        entering: Option<K>,
        edges: Vec<Edge<V, K, W>>,
        next: usize,
    }

    let undirected = !graph.is_directed();
    let mut visited: FxHashSet<V> = FxHashSet::default();
    let mut pred: FxHashMap<V, Edge<V, K, W>> = FxHashMap::default();
    let mut cycles = Vec::new();

    visited.insert(start.clone());
    let mut frames: Vec<Frame<V, K, W>> = vec![Frame {
        value: start.clone(),
        entering: None,
        edges: graph.incident_edges(start).cloned().collect(),
        next: 0,
    }];

    loop {
        let Some(top) = frames.last_mut() else {
            break;
        };
        if top.next >= top.edges.len() {
            frames.pop();
            continue;
        }
        let edge = top.edges[top.next].clone();
        top.next += 1;
        let u = top.value.clone();
        let entering = top.entering.clone();

        if undirected && entering.as_ref().is_some_and(|k| k == edge.key()) {
            continue;
        }
        let v = edge.opposite(&u).clone();
        if v == *start {
            // Closing edge: walk the predecessor chain back to the start.
            let mut cycle = vec![edge.clone()];
            let mut cur = u;
            while cur != *start {
                let Some(pe) = pred.get(&cur) else {
                    break;
                };
                cycle.push(pe.clone());
                cur = pe.opposite(&cur).clone();
            }
            cycles.push(cycle);
        } else if !visited.contains(&v) {
            visited.insert(v.clone());
            pred.insert(v.clone(), edge.clone());
            let edges = graph.incident_edges(&v).cloned().collect();
            frames.push(Frame {
                value: v,
                entering: Some(edge.key().clone()),
                edges,
                next: 0,
            });
        }
    }

    tracing::debug!(cycles = cycles.len(), "cycle enumeration complete");
    Ok(cycles)
}
