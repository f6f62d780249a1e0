//! apsp: all-pairs shortest paths on dense random graphs.
//! Generates connected undirected graphs with positive integer weights, runs
//! an O(n^2) array-based Dijkstra from every vertex, and times the result
//! across graph sizes.
pub mod dijkstra;
pub mod error;
pub mod generate;
pub mod graph;
pub mod harness;
pub mod logging;

pub use dijkstra::{all_pairs, shortest_paths, shortest_paths_with_stats, DistanceMatrix, SsspResult};
pub use error::{ApspError, Result};
pub use generate::{generate, MAX_WEIGHT, MIN_WEIGHT};
pub use graph::{Graph, Vertex, Weight, INFINITY};
pub use harness::{
    run_benchmark, run_size, BenchConfig, BenchObserver, BenchmarkRecord, BenchmarkReport, ParseSizeError, Silent,
    SizeConfig,
};
