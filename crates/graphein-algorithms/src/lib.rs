//! Graph algorithms for Graphein.
//!
//! Every weight-aware algorithm here goes through the graph's
//! [`Ring`](graphein_common::Ring), so the same code serves integer,
//! float, and caller-defined weight types. Algorithms borrow the graph
//! read-only; the only mutation anywhere is the layout solver writing into
//! the caller-owned position map.
//!
//! ## Algorithm Categories
//!
//! - [`shortest_path`](crate::dijkstra) - Dijkstra, Bellman-Ford, path reconstruction
//! - [`components`](crate::strongly_connected_components) - Connected components, SCC, union-find
//! - [`structure`](crate::bridges) - Bridge detection, elementary cycle enumeration
//! - [`mst`](crate::kruskal_msf) - Kruskal minimum spanning forest
//! - [`community`](crate::louvain_communities) - Greedy modularity partitioning
//! - [`layout`](crate::kamada_kawai) - Kamada-Kawai force-directed layout
//!
//! ## Usage
//!
//! ```ignore
//! use graphein_algorithms::{dijkstra, bridges, kruskal_msf_seeded};
//! use graphein_core::Graph;
//! use graphein_common::NativeRing;
//!
//! let mut graph = Graph::undirected(NativeRing);
//! // ... populate graph ...
//!
//! let paths = dijkstra(&graph, &start)?;
//! let cut_edges = bridges(&graph)?;
//! let forests = kruskal_msf_seeded(&graph, 42);
//! ```

mod community;
mod components;
mod layout;
mod mst;
mod shortest_path;
mod structure;
mod traits;

// Core helpers
pub use traits::{MinScored, VertexIndex};

// Shortest path algorithms
pub use shortest_path::{
    ShortestPaths, bellman_ford, dijkstra, dijkstra_path, reconstruct_path,
};

// Component algorithms
pub use components::{UnionFind, connected_components, strongly_connected_components};

// Structure analysis algorithms
pub use structure::{bridges, elementary_cycles};

// Minimum Spanning Forest algorithms
pub use mst::{SpanningForest, kruskal_msf, kruskal_msf_seeded};

// Community detection algorithms
pub use community::{Communities, LouvainConfig, louvain_communities};

// Force-directed layout
pub use layout::{KamadaKawaiConfig, LayoutStats, Point, kamada_kawai};
