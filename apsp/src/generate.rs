//! Random connected graph generator.
//!
//! A path `0 - 1 - ... - n-1` guarantees connectivity, then every vertex gets
//! a batch of random insertion attempts sized from its degree deficit plus a
//! random extra. Attempts that hit a self-loop or an existing edge are not
//! retried, so a vertex can finish below `min_edges`.
use rand::Rng;
use tracing::{debug, instrument};

use crate::error::{ApspError, Result};
use crate::graph::{Graph, Weight};

/// Smallest weight the generator assigns.
pub const MIN_WEIGHT: Weight = 1;
/// Largest weight the generator assigns.
pub const MAX_WEIGHT: Weight = 20;

/// Generates a connected undirected graph on `num_vertices` vertices.
///
/// `min_edges` is a best-effort degree target. The caller owns `rng`, so a
/// seeded generator reproduces the same graph.
#[instrument(level = "debug", skip(rng))]
pub fn generate<R: Rng + ?Sized>(num_vertices: usize, min_edges: usize, rng: &mut R) -> Result<Graph> {
    if num_vertices == 0 {
        return Err(ApspError::InvalidSize { num_vertices });
    }
    let n = num_vertices;
    let mut g = Graph::new(n);

    for i in 0..n - 1 {
        let w = rng.gen_range(MIN_WEIGHT..=MAX_WEIGHT);
        g.add_undirected_edge(i, i + 1, w);
    }

    let mut attempted = 0usize;
    let mut added = 0usize;
    for i in 0..n {
        let deficit = min_edges.saturating_sub(g.degree(i));
        let edges_to_add = deficit + rng.gen_range(0..=n / 4);
        attempted += edges_to_add;
        for _ in 0..edges_to_add {
            let j = rng.gen_range(0..n);
            if i != j && !g.has_edge(i, j) {
                let w = rng.gen_range(MIN_WEIGHT..=MAX_WEIGHT);
                g.add_undirected_edge(i, j, w);
                added += 1;
            }
        }
    }

    debug!(n, edges = g.edge_count(), attempted, added, "generated graph");
    Ok(g)
}
