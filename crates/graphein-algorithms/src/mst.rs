//! Minimum spanning forests via Kruskal's algorithm.

use std::hash::Hash;

use graphein_common::Ring;
use graphein_core::{Edge, Graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::{UnionFind, connected_components};
use crate::traits::VertexIndex;

/// Spanning forest of one connected component.
#[derive(Debug, Clone)]
pub struct SpanningForest<V, K, W> {
    /// The component's vertices.
    pub vertices: Vec<V>,
    /// Accepted tree edges, in acceptance order.
    pub edges: Vec<Edge<V, K, W>>,
    /// Ring-sum of the accepted edge weights.
    pub total_weight: W,
}

/// Computes a minimum spanning forest per connected component.
///
/// The vertex set is partitioned into components first (edge orientation
/// ignored; spanning structure is a connectivity notion). Within each
/// component the incident edges are sorted by ring-compared weight
/// ascending (stable for ties) and union-find greedily accepts every edge
/// joining two previously separate subtrees. Self-loops and redundant
/// parallel edges never join anything, so they are rejected naturally.
///
/// The union direction inside the disjoint-set forest is driven by `rng`;
/// pass a seeded generator (or use [`kruskal_msf_seeded`]) for
/// reproducible forests.
pub fn kruskal_msf<V, K, W, R, G>(
    graph: &Graph<V, K, W, R>,
    rng: &mut G,
) -> Vec<SpanningForest<V, K, W>>
where
    V: Clone + Eq + Hash + std::fmt::Debug,
    K: Clone + Eq + Hash,
    W: Clone,
    R: Ring<W>,
    G: Rng,
{
    let index = VertexIndex::new(graph.vertices().map(|vx| vx.value()));
    let n = index.len();
    let components = connected_components(graph);

    // Component id per dense vertex id.
    let mut comp_of = vec![0usize; n];
    for (cid, members) in components.iter().enumerate() {
        for value in members {
            if let Some(v) = index.id_of(value) {
                comp_of[v] = cid;
            }
        }
    }

    // Bucket edges by the component of their start endpoint.
    let mut edges_by_comp: Vec<Vec<&Edge<V, K, W>>> = vec![Vec::new(); components.len()];
    for edge in graph.edges() {
        if let Some(u) = index.id_of(edge.start()) {
            edges_by_comp[comp_of[u]].push(edge);
        }
    }

    let ring = graph.ring();
    let mut uf = UnionFind::new(n);
    let mut forests = Vec::with_capacity(components.len());

    for (cid, members) in components.into_iter().enumerate() {
        let mut candidates = std::mem::take(&mut edges_by_comp[cid]);
        candidates.sort_by(|a, b| ring.cmp(a.weight(), b.weight()));

        let mut accepted = Vec::new();
        let mut total = ring.zero();
        for edge in candidates {
            let (Some(u), Some(v)) = (index.id_of(edge.start()), index.id_of(edge.end())) else {
                continue;
            };
            if uf.union(u, v, rng) {
                total = ring.add(&total, edge.weight());
                accepted.push(edge.clone());
            }
        }

        tracing::trace!(
            component = cid,
            accepted = accepted.len(),
            "kruskal component done"
        );
        forests.push(SpanningForest {
            vertices: members,
            edges: accepted,
            total_weight: total,
        });
    }
    forests
}

/// [`kruskal_msf`] with a fixed RNG seed, for fully deterministic output.
pub fn kruskal_msf_seeded<V, K, W, R>(
    graph: &Graph<V, K, W, R>,
    seed: u64,
) -> Vec<SpanningForest<V, K, W>>
where
    V: Clone + Eq + Hash + std::fmt::Debug,
    K: Clone + Eq + Hash,
    W: Clone,
    R: Ring<W>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    kruskal_msf(graph, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphein_common::NativeRing;

    type TestGraph = Graph<&'static str, u32, i64, NativeRing>;

    fn undirected(
        vertices: &[&'static str],
        edges: &[(&'static str, &'static str, u32, i64)],
    ) -> TestGraph {
        let mut g = Graph::undirected(NativeRing);
        for v in vertices {
            g.add_vertex(*v);
        }
        for (u, v, key, w) in edges {
            g.add_edge(u, v, *key, *w).unwrap();
        }
        g
    }

    #[test]
    fn test_connected_graph_yields_spanning_tree() {
        // Square with one heavy diagonal; the tree takes the three
        // lightest edges.
        let g = undirected(
            &["a", "b", "c", "d"],
            &[
                ("a", "b", 1, 1),
                ("b", "c", 2, 2),
                ("c", "d", 3, 3),
                ("d", "a", 4, 4),
                ("a", "c", 5, 10),
            ],
        );
        let forests = kruskal_msf_seeded(&g, 42);
        assert_eq!(forests.len(), 1);
        let forest = &forests[0];
        assert_eq!(forest.edges.len(), g.vertex_count() - 1);
        assert_eq!(forest.total_weight, 6);
        let mut keys: Vec<u32> = forest.edges.iter().map(|e| *e.key()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_disconnected_vertices_yield_empty_forests() {
        let g = undirected(&["a", "b"], &[]);
        let forests = kruskal_msf_seeded(&g, 42);
        assert_eq!(forests.len(), 2);
        for forest in &forests {
            assert!(forest.edges.is_empty());
            assert_eq!(forest.total_weight, 0);
            assert_eq!(forest.vertices.len(), 1);
        }
    }

    #[test]
    fn test_self_loop_contributes_nothing() {
        let g = undirected(&["a"], &[("a", "a", 1, 7)]);
        let forests = kruskal_msf_seeded(&g, 42);
        assert_eq!(forests.len(), 1);
        assert!(forests[0].edges.is_empty());
        assert_eq!(forests[0].total_weight, 0);
    }

    #[test]
    fn test_parallel_edges_accept_only_the_lightest() {
        let g = undirected(
            &["a", "b"],
            &[("a", "b", 1, 9), ("a", "b", 2, 3), ("a", "b", 3, 5)],
        );
        let forests = kruskal_msf_seeded(&g, 42);
        assert_eq!(forests[0].edges.len(), 1);
        assert_eq!(*forests[0].edges[0].key(), 2);
        assert_eq!(forests[0].total_weight, 3);
    }

    #[test]
    fn test_two_components_get_independent_forests() {
        let g = undirected(
            &["a", "b", "c", "x", "y"],
            &[
                ("a", "b", 1, 1),
                ("b", "c", 2, 2),
                ("a", "c", 3, 9),
                ("x", "y", 4, 4),
            ],
        );
        let mut forests = kruskal_msf_seeded(&g, 42);
        forests.sort_by_key(|f| f.vertices.len());
        assert_eq!(forests.len(), 2);
        assert_eq!(forests[0].edges.len(), 1);
        assert_eq!(forests[0].total_weight, 4);
        assert_eq!(forests[1].edges.len(), 2);
        assert_eq!(forests[1].total_weight, 3);
    }

    #[test]
    fn test_directed_edges_count_as_connections() {
        let mut g: TestGraph = Graph::directed(NativeRing);
        for v in ["a", "b", "c"] {
            g.add_vertex(v);
        }
        g.add_edge(&"a", &"b", 1, 1).unwrap();
        g.add_edge(&"c", &"b", 2, 2).unwrap();
        let forests = kruskal_msf_seeded(&g, 42);
        assert_eq!(forests.len(), 1);
        assert_eq!(forests[0].edges.len(), 2);
        assert_eq!(forests[0].total_weight, 3);
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let g = undirected(
            &["a", "b", "c", "d"],
            &[
                ("a", "b", 1, 1),
                ("b", "c", 2, 1),
                ("c", "d", 3, 1),
                ("d", "a", 4, 1),
            ],
        );
        let first: Vec<Vec<u32>> = kruskal_msf_seeded(&g, 7)
            .iter()
            .map(|f| f.edges.iter().map(|e| *e.key()).collect())
            .collect();
        let second: Vec<Vec<u32>> = kruskal_msf_seeded(&g, 7)
            .iter()
            .map(|f| f.edges.iter().map(|e| *e.key()).collect())
            .collect();
        assert_eq!(first, second);
    }
}
