//! Error taxonomy for graph construction, solving and benchmarking.
//!
//! Every variant is a precondition violation detected before any state is
//! mutated, so a returned error never leaves a partial graph or matrix behind.

use crate::graph::{Vertex, Weight};

/// Errors raised by the library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApspError {
    /// The generator was asked for a graph with no vertices.
    #[error("invalid graph size: num_vertices must be at least 1, got {num_vertices}")]
    InvalidSize {
        /// Requested vertex count.
        num_vertices: usize,
    },
    /// A solver source index fell outside the graph.
    #[error("invalid source vertex {vertex}: graph has {num_vertices} vertices")]
    InvalidSource {
        /// Offending source index.
        vertex: Vertex,
        /// Vertex count of the graph being solved.
        num_vertices: usize,
    },
    /// An edge endpoint is out of range, or the edge is a self-loop.
    #[error("invalid edge ({u}, {v}) in a graph of {num_vertices} vertices")]
    InvalidEdge {
        /// First endpoint.
        u: Vertex,
        /// Second endpoint.
        v: Vertex,
        /// Vertex count of the graph being built.
        num_vertices: usize,
    },
    /// Weight 0 encodes "no edge" and cannot be stored explicitly.
    #[error("edge ({u}, {v}) has zero weight")]
    ZeroWeight {
        /// First endpoint.
        u: Vertex,
        /// Second endpoint.
        v: Vertex,
    },
    /// Weight is large enough for a simple path to sum to the unreachable sentinel.
    #[error("edge ({u}, {v}) weight {weight} is too large")]
    WeightOverflow {
        /// First endpoint.
        u: Vertex,
        /// Second endpoint.
        v: Vertex,
        /// Rejected weight.
        weight: Weight,
    },
    /// Benchmark configuration asked for zero repetitions.
    #[error("benchmark repetitions must be at least 1")]
    ZeroRepetitions,
    /// Benchmark configuration listed no graph sizes.
    #[error("benchmark configuration lists no graph sizes")]
    EmptySizes,
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, ApspError>;
