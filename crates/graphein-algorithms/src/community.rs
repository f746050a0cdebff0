//! Community detection by greedy modularity optimization.
//!
//! A Louvain-style local-move pass over a weighted undirected view of the
//! graph: every vertex starts in its own community and keeps moving to the
//! neighboring community with the best modularity gain until a full sweep
//! changes nothing. Weights reach the optimizer through the ring's real
//! projection, so any numerically interpretable weight type works.

use std::fmt;
use std::hash::Hash;

use graphein_common::utils::hash::FxHashMap;
use graphein_common::{Error, Result, Ring};
use graphein_core::Graph;
use serde::{Deserialize, Serialize};

use crate::traits::VertexIndex;

/// Tuning knobs for the local-move loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LouvainConfig {
    /// Resolution parameter: values above 1.0 favor more, smaller
    /// communities; values below favor fewer, larger ones.
    pub resolution: f64,
    /// Upper bound on full local-move sweeps.
    pub max_sweeps: usize,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_sweeps: 100,
        }
    }
}

/// Result of community detection.
#[derive(Debug, Clone)]
pub struct Communities<V> {
    /// Community id per vertex value; ids are contiguous from zero.
    pub assignments: FxHashMap<V, u32>,
    /// Vertex groups, largest community first.
    pub groups: Vec<Vec<V>>,
    /// Newman modularity of the reported partition.
    pub modularity: f64,
}

/// Partitions the graph into communities by greedy modularity
/// optimization.
///
/// Edge orientation is ignored; every edge contributes its projected
/// weight symmetrically. Fails with [`Error::IncompatibleWeightType`] when
/// a weight refuses real projection, and with [`Error::MissingVertex`]
/// when an edge endpoint has no id mapping (a broken-invariant guard, not
/// an expected condition).
pub fn louvain_communities<V, K, W, R>(
    graph: &Graph<V, K, W, R>,
    config: &LouvainConfig,
) -> Result<Communities<V>>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: Clone + Eq + Hash,
    R: Ring<W>,
{
    let index = VertexIndex::new(graph.vertices().map(|vx| vx.value()));
    let n = index.len();
    if n == 0 {
        return Ok(Communities {
            assignments: FxHashMap::default(),
            groups: Vec::new(),
            modularity: 0.0,
        });
    }

    // Weighted undirected link view over projected weights.
    let ring = graph.ring();
    let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    let mut strengths: Vec<f64> = vec![0.0; n];
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
        adj[u].push((v, w));
        adj[v].push((u, w));
        strengths[u] += w;
        strengths[v] += w;
    }

    let total_weight: f64 = strengths.iter().sum::<f64>() / 2.0;
    if total_weight == 0.0 {
        // No weighted links: every vertex is its own community.
        let mut assignments = FxHashMap::default();
        let mut groups = Vec::with_capacity(n);
        for u in 0..n {
            let value = index.value_of(u).clone();
            assignments.insert(value.clone(), u as u32);
            groups.push(vec![value]);
        }
        return Ok(Communities {
            assignments,
            groups,
            modularity: 0.0,
        });
    }

    // Every vertex starts in its own community; community strengths are
    // maintained incrementally across moves.
    let mut community: Vec<usize> = (0..n).collect();
    let mut comm_strength: Vec<f64> = strengths.clone();
    let m2 = 2.0 * total_weight;

    let mut improved = true;
    let mut sweeps = 0usize;
    while improved && sweeps < config.max_sweeps {
        improved = false;
        sweeps += 1;

        for u in 0..n {
            let current = community[u];

            // Link weight from u into each neighboring community.
            let mut link_weights: FxHashMap<usize, f64> = FxHashMap::default();
            for &(v, w) in &adj[u] {
                *link_weights.entry(community[v]).or_insert(0.0) += w;
            }
            let w_current = link_weights.get(&current).copied().unwrap_or(0.0);

            let ku = strengths[u];
            let remove_cost = w_current / m2
                - config.resolution * ku * (comm_strength[current] - ku) / (m2 * m2);

            let mut best = current;
            let mut best_gain = 0.0;
            for (&target, &w_target) in &link_weights {
                if target == current {
                    continue;
                }
                let insert_gain =
                    w_target / m2 - config.resolution * ku * comm_strength[target] / (m2 * m2);
                let gain = insert_gain - remove_cost;
                if gain > best_gain {
                    best_gain = gain;
                    best = target;
                }
            }

            if best != current {
                comm_strength[current] -= ku;
                comm_strength[best] += ku;
                community[u] = best;
                improved = true;
            }
        }
    }
    tracing::debug!(sweeps, "modularity sweeps finished");

    // Renumber communities contiguously in first-seen order.
    let mut remap: FxHashMap<usize, u32> = FxHashMap::default();
    let mut next = 0u32;
    for &c in &community {
        remap.entry(c).or_insert_with(|| {
            let id = next;
            next += 1;
            id
        });
    }

    let mut assignments = FxHashMap::default();
    let mut groups: Vec<Vec<V>> = vec![Vec::new(); next as usize];
    for u in 0..n {
        let cid = remap[&community[u]];
        let value = index.value_of(u).clone();
        assignments.insert(value.clone(), cid);
        groups[cid as usize].push(value);
    }
    groups.sort_by_key(|g| std::cmp::Reverse(g.len()));

    let modularity = newman_modularity(&community, &adj, &strengths, total_weight);
    Ok(Communities {
        assignments,
        groups,
        modularity,
    })
}

/// Newman's Q over the community-aggregated form:
/// `Q = sum_c (w_in_c / 2m - (s_c / 2m)^2)`.
fn newman_modularity(
    community: &[usize],
    adj: &[Vec<(usize, f64)>],
    strengths: &[f64],
    total_weight: f64,
) -> f64 {
    if total_weight == 0.0 {
        return 0.0;
    }
    let m2 = 2.0 * total_weight;
    let ncomm = community.iter().max().map_or(0, |c| c + 1);
    let mut internal = vec![0.0f64; ncomm];
    let mut total = vec![0.0f64; ncomm];

    for (u, links) in adj.iter().enumerate() {
        total[community[u]] += strengths[u];
        for &(v, w) in links {
            if community[u] == community[v] {
                // The symmetric view counts each internal link twice.
                internal[community[u]] += w;
            }
        }
    }

    internal
        .iter()
        .zip(&total)
        .map(|(i, t)| i / m2 - (t / m2) * (t / m2))
        .sum()
}
