//! Force-directed layout (Kamada-Kawai).
//!
//! Embeds a graph in the plane by modeling every vertex pair as a spring
//! whose rest length is proportional to their graph-theoretic distance.
//! The solver repeatedly picks the vertex with the strongest residual
//! force and relaxes it with a local 2-D Newton step until every residual
//! falls below the convergence threshold.
//!
//! The position map is owned by the caller (typically a presentation
//! layer); the solver only fills in missing seeds and moves vertices, it
//! never touches the graph itself.

use std::fmt;
use std::hash::Hash;

use graphein_common::utils::hash::FxHashMap;
use graphein_common::{Error, Result, Ring};
use graphein_core::Graph;
use serde::{Deserialize, Serialize};

use crate::traits::VertexIndex;

/// A 2-D position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Tuning knobs for the Kamada-Kawai solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KamadaKawaiConfig {
    /// Diameter of the drawing: the longest graph distance is scaled to
    /// this length.
    pub length_scale: f64,
    /// Global spring stiffness; per-pair strength is this over the
    /// squared graph distance.
    pub spring_constant: f64,
    /// Convergence threshold on the residual force magnitude.
    pub epsilon: f64,
    /// Safety bound on Newton steps. The convergence loop has no natural
    /// termination guarantee on pathological configurations, so the
    /// solver reports non-convergence instead of spinning forever.
    pub max_iterations: usize,
}

impl Default for KamadaKawaiConfig {
    fn default() -> Self {
        Self {
            length_scale: 1.0,
            spring_constant: 1.0,
            epsilon: 1e-4,
            max_iterations: 5_000,
        }
    }
}

/// Outcome of a layout run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Newton steps performed.
    pub iterations: usize,
    /// True when every residual force fell below the threshold.
    pub converged: bool,
}

/// Runs the Kamada-Kawai solver over `graph`, mutating the caller-owned
/// position map in place.
///
/// Vertices missing from `positions` are seeded deterministically on a
/// circle first; positions the caller already owns are used as the
/// starting configuration. Pairs in different components get no spring.
///
/// A Newton step that comes out non-finite (coincident points, singular
/// Hessian) is rejected: the vertex keeps its position and is frozen out
/// of further selection. That recovery stays local unless every vertex
/// still above the threshold is frozen, which fails with
/// [`Error::DegenerateLayout`]. Weights reach the distance pass through
/// the ring's real projection ([`Error::IncompatibleWeightType`]
/// otherwise).
pub fn kamada_kawai<V, K, W, R>(
    graph: &Graph<V, K, W, R>,
    positions: &mut FxHashMap<V, Point>,
    config: &KamadaKawaiConfig,
) -> Result<LayoutStats>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: Clone + Eq + Hash,
    R: Ring<W>,
{
    let index = VertexIndex::new(graph.vertices().map(|vx| vx.value()));
    let n = index.len();
    if n <= 1 {
        seed_missing_positions(&index, positions, config.length_scale);
        return Ok(LayoutStats {
            iterations: 0,
            converged: true,
        });
    }

    let dist = all_pairs_distances(graph, &index)?;

    // Scale the longest finite distance to the configured drawing length.
    let mut max_dist = 0.0f64;
    for row in &dist {
        for &d in row {
            if d.is_finite() {
                max_dist = max_dist.max(d);
            }
        }
    }
    if max_dist == 0.0 {
        // No springs at all: seed and leave everything where it is.
        seed_missing_positions(&index, positions, config.length_scale);
        return Ok(LayoutStats {
            iterations: 0,
            converged: true,
        });
    }
    let scale = config.length_scale / max_dist;

    // Per-pair spring rest length and stiffness.
    let mut length = vec![vec![0.0f64; n]; n];
    let mut strength = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in 0..n {
            let d = dist[i][j];
            if i != j && d.is_finite() && d > 0.0 {
                length[i][j] = scale * d;
                strength[i][j] = config.spring_constant / (d * d);
            }
        }
    }

    seed_missing_positions(&index, positions, config.length_scale);
    let mut pos: Vec<Point> = (0..n).map(|i| positions[index.value_of(i)]).collect();

    let mut frozen = vec![false; n];
    let mut iterations = 0usize;
    let mut converged = false;

    while iterations < config.max_iterations {
        // Select the unfrozen vertex with the largest residual force.
        let mut best: Option<(usize, f64)> = None;
        let mut frozen_above_threshold = false;
        for m in 0..n {
            let (gx, gy) = gradient(m, &pos, &length, &strength);
            let raw = (gx * gx + gy * gy).sqrt();
            // A non-finite residual means a degenerate configuration; it
            // is maximally urgent so the step rejection below can freeze
            // the vertex.
            let delta = if raw.is_finite() { raw } else { f64::INFINITY };
            if delta < config.epsilon {
                continue;
            }
            if frozen[m] {
                frozen_above_threshold = true;
                continue;
            }
            if best.is_none_or(|(_, d)| delta > d) {
                best = Some((m, delta));
            }
        }

        let Some((m, _)) = best else {
            if frozen_above_threshold {
                return Err(Error::DegenerateLayout);
            }
            converged = true;
            break;
        };

        iterations += 1;
        match newton_step(m, &pos, &length, &strength) {
            Some((dx, dy)) => {
                pos[m].x += dx;
                pos[m].y += dy;
            }
            None => {
                tracing::trace!(vertex = m, "degenerate layout step skipped");
                frozen[m] = true;
            }
        }
    }

    // Write the final coordinates back into the caller-owned map.
    for i in 0..n {
        positions.insert(index.value_of(i).clone(), pos[i]);
    }
    tracing::debug!(iterations, converged, "kamada-kawai finished");
    Ok(LayoutStats {
        iterations,
        converged,
    })
}

/// All-pairs shortest graph distances by Floyd-style relaxation over the
/// symmetrized edge view. Unreachable pairs stay infinite.
fn all_pairs_distances<V, K, W, R>(
    graph: &Graph<V, K, W, R>,
    index: &VertexIndex<'_, V>,
) -> Result<Vec<Vec<f64>>>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: Clone + Eq + Hash,
    R: Ring<W>,
{
    let n = index.len();
    let ring = graph.ring();
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0.0;
    }

    for edge in graph.edges() {
        let w = ring
            .to_real(edge.weight())
            .ok_or(Error::IncompatibleWeightType)?;
        let u = index
            .id_of(edge.start())
            .ok_or_else(|| Error::MissingVertex(format!("{:?}", edge.start())))?;
        let v = index
            .id_of(edge.end())
            .ok_or_else(|| Error::MissingVertex(format!("{:?}", edge.end())))?;
        if u == v {
            continue;
        }
        // The drawing needs a symmetric metric, so orientation is ignored
        // and parallel edges keep the lightest connection.
        if w < dist[u][v] {
            dist[u][v] = w;
            dist[v][u] = w;
        }
    }

    for k in 0..n {
        for i in 0..n {
            if dist[i][k].is_infinite() {
                continue;
            }
            for j in 0..n {
                let through = dist[i][k] + dist[k][j];
                if through < dist[i][j] {
                    dist[i][j] = through;
                }
            }
        }
    }
    Ok(dist)
}

/// Seeds vertices without a caller-provided position on a circle.
fn seed_missing_positions<V>(
    index: &VertexIndex<'_, V>,
    positions: &mut FxHashMap<V, Point>,
    diameter: f64,
) where
    V: Clone + Eq + Hash,
{
    let n = index.len().max(1);
    let radius = diameter * 0.5;
    for i in 0..index.len() {
        let value = index.value_of(i);
        if positions.contains_key(value) {
            continue;
        }
        let angle = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
        positions.insert(
            value.clone(),
            Point::new(radius * angle.cos(), radius * angle.sin()),
        );
    }
}

/// Energy gradient at vertex `m`: the residual spring force acting on it.
fn gradient(m: usize, pos: &[Point], length: &[Vec<f64>], strength: &[Vec<f64>]) -> (f64, f64) {
    let mut gx = 0.0;
    let mut gy = 0.0;
    for i in 0..pos.len() {
        if i == m || strength[m][i] == 0.0 {
            continue;
        }
        let dx = pos[m].x - pos[i].x;
        let dy = pos[m].y - pos[i].y;
        let d = (dx * dx + dy * dy).sqrt();
        let k = strength[m][i];
        let l = length[m][i];
        gx += k * (dx - l * dx / d);
        gy += k * (dy - l * dy / d);
    }
    (gx, gy)
}

/// One local Newton step for vertex `m`, from the pairwise partial second
/// derivatives of the spring energy. Returns `None` when the computed
/// displacement is non-finite.
fn newton_step(
    m: usize,
    pos: &[Point],
    length: &[Vec<f64>],
    strength: &[Vec<f64>],
) -> Option<(f64, f64)> {
    let (gx, gy) = gradient(m, pos, length, strength);
    let mut hxx = 0.0;
    let mut hxy = 0.0;
    let mut hyy = 0.0;
    for i in 0..pos.len() {
        if i == m || strength[m][i] == 0.0 {
            continue;
        }
        let dx = pos[m].x - pos[i].x;
        let dy = pos[m].y - pos[i].y;
        let d2 = dx * dx + dy * dy;
        let d3 = d2 * d2.sqrt();
        let k = strength[m][i];
        let l = length[m][i];
        hxx += k * (1.0 - l * dy * dy / d3);
        hxy += k * l * dx * dy / d3;
        hyy += k * (1.0 - l * dx * dx / d3);
    }

    // Solve H * delta = -g.
    let det = hxx * hyy - hxy * hxy;
    let dx = (hxy * gy - hyy * gx) / det;
    let dy = (hxy * gx - hxx * gy) / det;
    if dx.is_finite() && dy.is_finite() {
        Some((dx, dy))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphein_common::NativeRing;
    use std::cmp::Ordering;

    type TestGraph = Graph<&'static str, u32, f64, NativeRing>;

    fn undirected(
        vertices: &[&'static str],
        edges: &[(&'static str, &'static str, u32, f64)],
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
    fn test_triangle_converges_to_equal_sides() {
        let g = undirected(
            &["a", "b", "c"],
            &[("a", "b", 1, 1.0), ("b", "c", 2, 1.0), ("c", "a", 3, 1.0)],
        );
        let mut positions = FxHashMap::default();
        let stats = kamada_kawai(&g, &mut positions, &KamadaKawaiConfig::default()).unwrap();
        assert!(stats.converged);

        let ab = positions[&"a"].distance_to(&positions[&"b"]);
        let bc = positions[&"b"].distance_to(&positions[&"c"]);
        let ca = positions[&"c"].distance_to(&positions[&"a"]);
        assert!((ab - bc).abs() < 0.05 * ab, "ab={ab} bc={bc}");
        assert!((bc - ca).abs() < 0.05 * bc, "bc={bc} ca={ca}");
    }

    #[test]
    fn test_two_vertices_settle_at_spring_length() {
        let g = undirected(&["a", "b"], &[("a", "b", 1, 1.0)]);
        let mut positions = FxHashMap::default();
        let stats = kamada_kawai(&g, &mut positions, &KamadaKawaiConfig::default()).unwrap();
        assert!(stats.converged);
        let d = positions[&"a"].distance_to(&positions[&"b"]);
        assert!((d - 1.0).abs() < 1e-3, "distance {d}");
    }

    #[test]
    fn test_square_cycle_is_symmetric() {
        let g = undirected(
            &["a", "b", "c", "d"],
            &[
                ("a", "b", 1, 1.0),
                ("b", "c", 2, 1.0),
                ("c", "d", 3, 1.0),
                ("d", "a", 4, 1.0),
            ],
        );
        let mut positions = FxHashMap::default();
        let stats = kamada_kawai(&g, &mut positions, &KamadaKawaiConfig::default()).unwrap();
        assert!(stats.converged);

        let sides = [
            positions[&"a"].distance_to(&positions[&"b"]),
            positions[&"b"].distance_to(&positions[&"c"]),
            positions[&"c"].distance_to(&positions[&"d"]),
            positions[&"d"].distance_to(&positions[&"a"]),
        ];
        let min = sides.iter().copied().fold(f64::INFINITY, f64::min);
        let max = sides.iter().copied().fold(0.0, f64::max);
        assert!(max - min < 0.1 * max, "sides {sides:?}");
    }

    #[test]
    fn test_caller_positions_are_respected_as_seeds() {
        let g = undirected(&["a", "b"], &[("a", "b", 1, 1.0)]);
        let mut positions = FxHashMap::default();
        positions.insert("a", Point::new(3.0, 4.0));
        kamada_kawai(&g, &mut positions, &KamadaKawaiConfig::default()).unwrap();
        // Every vertex has a finite position afterwards.
        assert_eq!(positions.len(), 2);
        assert!(positions.values().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_edgeless_graph_only_seeds() {
        let g = undirected(&["a", "b", "c"], &[]);
        let mut positions = FxHashMap::default();
        let stats = kamada_kawai(&g, &mut positions, &KamadaKawaiConfig::default()).unwrap();
        assert!(stats.converged);
        assert_eq!(stats.iterations, 0);
        assert_eq!(positions.len(), 3);
    }

    #[test]
    fn test_coincident_positions_fail_without_corruption() {
        // Both endpoints of a spring on the same spot: no step direction
        // exists, so the solver freezes both and reports degeneracy
        // instead of writing NaN coordinates.
        let g = undirected(&["a", "b"], &[("a", "b", 1, 1.0)]);
        let mut positions = FxHashMap::default();
        positions.insert("a", Point::new(1.0, 1.0));
        positions.insert("b", Point::new(1.0, 1.0));
        let err = kamada_kawai(&g, &mut positions, &KamadaKawaiConfig::default()).unwrap_err();
        assert_eq!(err, Error::DegenerateLayout);
        assert!(positions.values().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let g = undirected(
            &["a", "b", "c"],
            &[("a", "b", 1, 1.0), ("b", "c", 2, 1.0), ("c", "a", 3, 1.0)],
        );
        let mut positions = FxHashMap::default();
        // Displace one vertex so work is needed, then forbid all of it.
        positions.insert("a", Point::new(10.0, 10.0));
        let config = KamadaKawaiConfig {
            max_iterations: 0,
            ..KamadaKawaiConfig::default()
        };
        let stats = kamada_kawai(&g, &mut positions, &config).unwrap();
        assert!(!stats.converged);
        assert_eq!(stats.iterations, 0);
    }

    #[test]
    fn test_disconnected_components_have_no_cross_springs() {
        let g = undirected(
            &["a", "b", "x", "y"],
            &[("a", "b", 1, 1.0), ("x", "y", 2, 1.0)],
        );
        let mut positions = FxHashMap::default();
        let stats = kamada_kawai(&g, &mut positions, &KamadaKawaiConfig::default()).unwrap();
        assert!(stats.converged);
        // Springs exist only inside each pair, so both settle at their
        // rest length independently.
        let ab = positions[&"a"].distance_to(&positions[&"b"]);
        let xy = positions[&"x"].distance_to(&positions[&"y"]);
        assert!((ab - 1.0).abs() < 1e-3);
        assert!((xy - 1.0).abs() < 1e-3);
    }

    /// Ordering-only weights: comparable, but not numbers.
    struct LexRing;

    impl Ring<String> for LexRing {
        fn zero(&self) -> String {
            String::new()
        }

        fn add(&self, a: &String, b: &String) -> String {
            let mut out = a.clone();
            out.push_str(b);
            out
        }

        fn cmp(&self, a: &String, b: &String) -> Ordering {
            Ord::cmp(a, b)
        }
    }

    #[test]
    fn test_non_numeric_weights_are_rejected() {
        let mut g: Graph<&'static str, u32, String, LexRing> = Graph::undirected(LexRing);
        g.add_vertex("a");
        g.add_vertex("b");
        g.add_edge(&"a", &"b", 1, "w".to_string()).unwrap();
        let mut positions = FxHashMap::default();
        assert_eq!(
            kamada_kawai(&g, &mut positions, &KamadaKawaiConfig::default()).unwrap_err(),
            Error::IncompatibleWeightType
        );
    }
}
