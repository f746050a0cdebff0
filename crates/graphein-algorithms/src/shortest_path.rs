//! Shortest path algorithms.
//!
//! [`dijkstra`] for non-negative weights and [`bellman_ford`] for general
//! weights with negative-cycle detection. Both produce a [`ShortestPaths`]
//! value; [`reconstruct_path`] turns its predecessor map into an ordered
//! edge sequence.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;

use graphein_common::utils::hash::{FxHashMap, FxHashSet};
use graphein_common::{Error, Result, Ring};
use graphein_core::{Edge, Graph};

use crate::traits::MinScored;

/// Single-source shortest path result.
///
/// Both maps omit unreached vertices. The start vertex carries the ring's
/// zero distance and has no predecessor entry.
#[derive(Debug, Clone)]
pub struct ShortestPaths<V, K, W> {
    /// Shortest known distance from the start per reached vertex.
    pub distances: FxHashMap<V, W>,
    /// Incoming shortest-tree edge per reached vertex.
    pub predecessors: FxHashMap<V, Edge<V, K, W>>,
}

/// Single-source shortest paths for graphs whose weights are all
/// ring-non-negative.
///
/// Classic priority-queue relaxation: the frontier is ordered by running
/// distance through the graph's ring, settled vertices are skipped on
/// revisit, and every parallel edge between a pair is relaxed
/// individually. Ties between equal distances are broken by heap order,
/// which is arbitrary.
///
/// Fails with [`Error::InvalidWeight`] on the first negative edge weight
/// encountered, and with [`Error::NoSuchVertex`] when `start` is absent.
pub fn dijkstra<V, K, W, R>(
    graph: &Graph<V, K, W, R>,
    start: &V,
) -> Result<ShortestPaths<V, K, W>>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: Clone + Eq + Hash + fmt::Debug,
    W: Clone + fmt::Debug,
    R: Ring<W>,
{
    if !graph.contains_vertex(start) {
        return Err(Error::NoSuchVertex(format!("{start:?}")));
    }

    let ring = graph.ring();
    let zero = ring.zero();

    let mut distances: FxHashMap<V, W> = FxHashMap::default();
    let mut predecessors: FxHashMap<V, Edge<V, K, W>> = FxHashMap::default();
    let mut settled: FxHashSet<V> = FxHashSet::default();
    let mut heap: BinaryHeap<MinScored<'_, W, V, R>> = BinaryHeap::new();

    distances.insert(start.clone(), ring.zero());
    heap.push(MinScored::new(ring.zero(), start.clone(), ring));

    while let Some(entry) = heap.pop() {
        let u = entry.item;
        let dist_u = entry.score;
        if !settled.insert(u.clone()) {
            continue;
        }

        for edge in graph.incident_edges(&u) {
            // The weight precondition is checked eagerly, edge by edge.
            if ring.cmp(edge.weight(), &zero) == Ordering::Less {
                return Err(Error::InvalidWeight(format!(
                    "{:?} on edge {:?}",
                    edge.weight(),
                    edge.key()
                )));
            }
            let v = edge.opposite(&u);
            if settled.contains(v) {
                continue;
            }
            let candidate = ring.add(&dist_u, edge.weight());
            let better = match distances.get(v) {
                Some(current) => ring.cmp(&candidate, current) == Ordering::Less,
                None => true,
            };
            if better {
                distances.insert(v.clone(), candidate.clone());
                predecessors.insert(v.clone(), edge.clone());
                heap.push(MinScored::new(candidate, v.clone(), ring));
            }
        }
    }

    tracing::debug!(reached = distances.len(), "dijkstra complete");
    Ok(ShortestPaths {
        distances,
        predecessors,
    })
}

/// Single-source shortest paths for general ring-ordered weights,
/// including negative ones.
///
/// Relaxes the full edge set for up to `|V|` passes; undirected edges are
/// relaxed in both directions since each is logically two directed edges.
/// A pass that changes nothing ends the run early. A change surviving into
/// the final pass means a negative cycle is reachable from the start, and
/// the call fails with [`Error::NegativeCycle`]; the graph itself is
/// untouched either way.
///
/// On graphs whose weights are all non-negative, the distance map matches
/// [`dijkstra`]'s exactly.
pub fn bellman_ford<V, K, W, R>(
    graph: &Graph<V, K, W, R>,
    start: &V,
) -> Result<ShortestPaths<V, K, W>>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: Clone + Eq + Hash,
    W: Clone,
    R: Ring<W>,
{
    if !graph.contains_vertex(start) {
        return Err(Error::NoSuchVertex(format!("{start:?}")));
    }

    let ring = graph.ring();
    let mut distances: FxHashMap<V, W> = FxHashMap::default();
    let mut predecessors: FxHashMap<V, Edge<V, K, W>> = FxHashMap::default();
    distances.insert(start.clone(), ring.zero());

    let passes = graph.vertex_count();
    for pass in 0..passes {
        let mut changed = false;
        for edge in graph.edges() {
            changed |= relax(ring, &mut distances, &mut predecessors, edge, edge.start(), edge.end());
            if !graph.is_directed() && !edge.is_self_loop() {
                changed |= relax(ring, &mut distances, &mut predecessors, edge, edge.end(), edge.start());
            }
        }
        if !changed {
            tracing::trace!(passes = pass + 1, "bellman-ford converged");
            return Ok(ShortestPaths {
                distances,
                predecessors,
            });
        }
    }

    // Still relaxing after |V| passes: a reachable negative cycle.
    Err(Error::NegativeCycle)
}

fn relax<V, K, W, R>(
    ring: &R,
    distances: &mut FxHashMap<V, W>,
    predecessors: &mut FxHashMap<V, Edge<V, K, W>>,
    edge: &Edge<V, K, W>,
    from: &V,
    to: &V,
) -> bool
where
    V: Clone + Eq + Hash,
    K: Clone,
    W: Clone,
    R: Ring<W>,
{
    let Some(dist_from) = distances.get(from) else {
        return false;
    };
    let candidate = ring.add(dist_from, edge.weight());
    let better = match distances.get(to) {
        Some(current) => ring.cmp(&candidate, current) == Ordering::Less,
        None => true,
    };
    if better {
        distances.insert(to.clone(), candidate);
        predecessors.insert(to.clone(), edge.clone());
    }
    better
}

/// Walks a predecessor map backwards from `target` and returns the edge
/// sequence from the source in forward order.
///
/// Returns an empty sequence when the target is unreached or is the source
/// itself. The walk is bounded by the map size as a guard against
/// malformed predecessor maps.
pub fn reconstruct_path<V, K, W>(
    predecessors: &FxHashMap<V, Edge<V, K, W>>,
    target: &V,
) -> Vec<Edge<V, K, W>>
where
    V: Clone + Eq + Hash,
    K: Clone,
    W: Clone,
{
    let mut path = Vec::new();
    let mut current = target.clone();
    for _ in 0..=predecessors.len() {
        match predecessors.get(&current) {
            Some(edge) => {
                current = edge.opposite(&current).clone();
                path.push(edge.clone());
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Shortest path between two vertices: [`dijkstra`] composed with
/// [`reconstruct_path`].
pub fn dijkstra_path<V, K, W, R>(
    graph: &Graph<V, K, W, R>,
    start: &V,
    target: &V,
) -> Result<Vec<Edge<V, K, W>>>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: Clone + Eq + Hash + fmt::Debug,
    W: Clone + fmt::Debug,
    R: Ring<W>,
{
    let paths = dijkstra(graph, start)?;
    Ok(reconstruct_path(&paths.predecessors, target))
}
