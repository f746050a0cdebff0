//! Error types shared across the Graphein crates.
//!
//! Structural and precondition violations (missing vertices, negative
//! cycles, bad weights) are always surfaced to the caller through these
//! variants; they are never silently recovered or defaulted.

use thiserror::Error;

/// Convenience alias for results produced by the graph engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the graph engine and its algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation referenced a vertex value that is not in the graph.
    #[error("vertex not found: {0}")]
    NoSuchVertex(String),

    /// A lookup expected an edge that does not exist. Undirected lookups
    /// try both endpoint orderings before reporting this.
    #[error("edge not found: {0}")]
    NoSuchEdge(String),

    /// An algorithm restricted to non-negative weights encountered a
    /// negative edge weight.
    #[error("negative weight not allowed here: {0}")]
    InvalidWeight(String),

    /// A negative cycle is reachable from the start vertex, so shortest
    /// distances are unbounded below.
    #[error("graph contains a negative cycle reachable from the start vertex")]
    NegativeCycle,

    /// The weight type cannot be projected onto a real number.
    #[error("weight type cannot be interpreted as a real number")]
    IncompatibleWeightType,

    /// An edge endpoint was missing from the dense vertex id mapping.
    /// This indicates a broken graph invariant, not ordinary misuse.
    #[error("edge endpoint missing from vertex mapping: {0}")]
    MissingVertex(String),

    /// The algorithm is only defined for undirected graphs.
    #[error("{algorithm} requires an undirected graph")]
    RequiresUndirected {
        /// Name of the algorithm that rejected the graph.
        algorithm: &'static str,
    },

    /// The layout solver cannot make progress: every vertex still above the
    /// convergence threshold produced a degenerate Newton step.
    #[error("layout cannot make progress: all remaining steps are degenerate")]
    DegenerateLayout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoSuchVertex("\"a\"".to_string());
        assert_eq!(err.to_string(), "vertex not found: \"a\"");

        let err = Error::RequiresUndirected { algorithm: "bridges" };
        assert_eq!(err.to_string(), "bridges requires an undirected graph");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::NegativeCycle, Error::NegativeCycle);
        assert_ne!(Error::NegativeCycle, Error::IncompatibleWeightType);
    }
}
