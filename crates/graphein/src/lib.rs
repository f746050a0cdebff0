//! # Graphein
//!
//! A generic weighted-graph engine: one [`Graph`] type parameterized over
//! vertex, edge-key, and weight types, plus a library of classical graph
//! algorithms that do all weight arithmetic through a [`Ring`] capability.
//! The bundled [`NativeRing`] covers the numeric primitives; supply your
//! own ring to run the same algorithms over custom weight types.
//!
//! ## Quick Start
//!
//! ```rust
//! use graphein::{Graph, NativeRing};
//! use graphein::algorithms::{dijkstra, reconstruct_path};
//!
//! let mut g = Graph::undirected(NativeRing);
//! for v in ["a", "b", "c"] {
//!     g.add_vertex(v);
//! }
//! g.add_edge(&"a", &"b", 1, 4_i64)?;
//! g.add_edge(&"b", &"c", 2, 1)?;
//! g.add_edge(&"a", &"c", 3, 9)?;
//!
//! let paths = dijkstra(&g, &"a")?;
//! assert_eq!(paths.distances.get(&"c"), Some(&5));
//!
//! let route = reconstruct_path(&paths.predecessors, &"c");
//! assert_eq!(route.len(), 2);
//! # Ok::<(), graphein::Error>(())
//! ```
//!
//! Algorithms never mutate the graph; the one side-effecting entry point
//! is [`algorithms::kamada_kawai`], which moves vertices inside a
//! caller-owned position map.

// Re-export the algorithm library as a module
pub use graphein_algorithms as algorithms;

// Re-export core types - you'll need these for building graphs
pub use graphein_common::{Error, NativeRing, Result, Ring};
pub use graphein_core::{Edge, Graph, Orientation, Vertex};
